/// Preview — interactive story shell for trying word lists and templates.
///
/// Usage: preview [--catalog <path>] [--seed <n>]
///
/// Commands:
///   adjectives <a, b, ...>  — set adjectives (also: nouns, verbs)
///   words                   — show the current word lists
///   random                  — generate a random built-in story
///   story <kind>            — generate a specific built-in story
///   template <text>         — fill a custom template
///   fav                     — save the last story to favorites
///   unfav <n>               — remove favorite number n
///   favs                    — list favorites
///   clear                   — clear all word lists
///   stories                 — list built-in stories
///   seed <n>                — set RNG seed
///   bulk <n>                — generate n random stories with selection stats
///   help                    — list commands
///   quit                    — exit

use madlibs_engine::core::engine::StoryEngine;
use madlibs_engine::core::favorites::Favorites;
use madlibs_engine::schema::story_kind::StoryKind;
use madlibs_engine::schema::word_bank::WordBank;
use madlibs_engine::MISSING_WORDS_MESSAGE;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        print_usage();
        return;
    }

    let mut catalog_path = None;
    let mut seed: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--catalog" if i + 1 < args.len() => {
                i += 1;
                catalog_path = Some(args[i].clone());
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                match args[i].parse() {
                    Ok(s) => seed = Some(s),
                    Err(_) => {
                        eprintln!("Invalid seed: {}", args[i]);
                        std::process::exit(1);
                    }
                }
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut builder = StoryEngine::builder();
    if let Some(ref path) = catalog_path {
        builder = builder.catalog_path(path);
    }
    if let Some(s) = seed {
        builder = builder.seed(s);
    }
    let mut engine = match builder.build() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    println!("Loaded {} stories", engine.catalog().len());
    match seed {
        Some(s) => println!("Seed: {}", s),
        None => println!("Seed: random"),
    }
    println!("Type 'help' for commands.\n");

    // Session state
    let mut adjectives = String::new();
    let mut nouns = String::new();
    let mut verbs = String::new();
    let mut last_story: Option<String> = None;
    let mut favorites = Favorites::new();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("madlibs> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
            None => (line.to_lowercase(), ""),
        };

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => {
                print_help();
            }
            "adjectives" | "adj" => {
                adjectives = rest.to_string();
                print_words(&bank_from(&adjectives, &nouns, &verbs));
            }
            "nouns" | "noun" => {
                nouns = rest.to_string();
                print_words(&bank_from(&adjectives, &nouns, &verbs));
            }
            "verbs" | "verb" => {
                verbs = rest.to_string();
                print_words(&bank_from(&adjectives, &nouns, &verbs));
            }
            "words" => {
                print_words(&bank_from(&adjectives, &nouns, &verbs));
            }
            "clear" => {
                adjectives.clear();
                nouns.clear();
                verbs.clear();
                println!("Word lists cleared.");
            }
            "random" | "r" => {
                let bank = bank_from(&adjectives, &nouns, &verbs);
                match engine.try_generate_random(&bank) {
                    Ok((kind, story)) => {
                        print_story(&format!("{} story", kind), &story);
                        last_story = Some(story);
                    }
                    Err(e) => println!("{}", e),
                }
            }
            "story" => {
                if rest.is_empty() {
                    println!("Usage: story <kind>");
                    print_story_kinds();
                    continue;
                }
                let kind = match rest.parse::<StoryKind>() {
                    Ok(kind) => kind,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                let bank = bank_from(&adjectives, &nouns, &verbs);
                match engine.generate(kind, &bank) {
                    Ok(story) => {
                        print_story(&format!("{} story", kind), &story);
                        last_story = Some(story);
                    }
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            "template" | "t" => {
                if rest.is_empty() {
                    println!("Usage: template <text>");
                    println!("  Use {{adjective}}, {{noun}} and {{verb}} as placeholders.");
                    continue;
                }
                let bank = bank_from(&adjectives, &nouns, &verbs);
                let story = engine.generate_from_template(rest, &bank);
                print_story("Custom story", &story);
                last_story = Some(story);
            }
            "fav" => match last_story {
                Some(ref story) => {
                    if favorites.add(story.as_str()) {
                        println!("Added to favorites!");
                    } else {
                        println!("Already in favorites.");
                    }
                }
                None => println!("Nothing to save yet. Generate a story first."),
            },
            "unfav" => {
                let position: usize = match rest.parse() {
                    Ok(n) if n > 0 => n,
                    _ => {
                        println!("Usage: unfav <n>  (see 'favs' for numbers)");
                        continue;
                    }
                };
                match favorites.remove_at(position - 1) {
                    Some(_) => println!("Removed favorite {}.", position),
                    None => println!("No favorite numbered {}.", position),
                }
            }
            "favs" | "favorites" => {
                if favorites.is_empty() {
                    println!("No favorites yet!");
                    continue;
                }
                for (i, story) in favorites.iter().enumerate() {
                    println!("{:>3}. {}", i + 1, story);
                }
            }
            "stories" => {
                print_story_kinds();
            }
            "seed" => match rest.parse::<u64>() {
                Ok(s) => {
                    engine.reseed(s);
                    println!("Seed set to {}", s);
                }
                Err(_) => println!("Usage: seed <n>"),
            },
            "bulk" => {
                let count: usize = match rest.parse() {
                    Ok(n) if n > 0 => n,
                    _ => {
                        println!("Usage: bulk <n>");
                        continue;
                    }
                };
                let bank = bank_from(&adjectives, &nouns, &verbs);
                if !bank.is_complete() {
                    println!("{}", MISSING_WORDS_MESSAGE);
                    continue;
                }

                let mut counts = [0usize; StoryKind::COUNT];
                let mut total_len = 0usize;
                for _ in 0..count {
                    if let Ok((kind, story)) = engine.try_generate_random(&bank) {
                        counts[kind.index()] += 1;
                        total_len += story.len();
                    }
                }

                println!("\n=== Selection Stats ({} stories) ===", count);
                for kind in StoryKind::ALL {
                    let n = counts[kind.index()];
                    println!(
                        "  {:<14} {:>6}  ({:.1}%)",
                        kind.name(),
                        n,
                        n as f64 * 100.0 / count as f64
                    );
                }
                println!("  Average length: {} chars\n", total_len / count);
            }
            _ => {
                println!("Unknown command: {}. Type 'help' for commands.", cmd);
            }
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn bank_from(adjectives: &str, nouns: &str, verbs: &str) -> WordBank {
    WordBank::from_raw(adjectives, nouns, verbs)
}

fn print_words(bank: &WordBank) {
    println!("  adjectives: {}", bank.adjectives.join(", "));
    println!("  nouns:      {}", bank.nouns.join(", "));
    println!("  verbs:      {}", bank.verbs.join(", "));
    if !bank.is_complete() {
        println!("  (random stories need at least one word in every list)");
    } else {
        println!("  shortest list: {} words", bank.min_len());
    }
}

fn print_story(title: &str, story: &str) {
    println!("\n--- {} ---", title);
    println!("{}", story);
    println!("--- End ---\n");
}

fn print_story_kinds() {
    let names: Vec<&str> = StoryKind::ALL.iter().map(|k| k.name()).collect();
    println!("Stories: {}", names.join(", "));
}

fn print_usage() {
    println!("Preview — interactive story shell for trying word lists and templates.");
    println!();
    println!("Usage: preview [--catalog <path>] [--seed <n>]");
    println!();
    println!("  --catalog <path>  RON file overriding built-in stories (optional)");
    println!("  --seed <n>        RNG seed for story selection (default: random)");
    println!();
    println!("Set RUST_LOG=debug to trace story selection.");
}

fn print_help() {
    println!("Commands:");
    println!("  adjectives <a, b, ...>  Set adjectives (comma-separated)");
    println!("  nouns <a, b, ...>       Set nouns");
    println!("  verbs <a, b, ...>       Set verbs");
    println!("  words                   Show current word lists");
    println!("  random                  Generate a random built-in story");
    println!("  story <kind>            Generate a specific built-in story");
    println!("  template <text>         Fill a custom template");
    println!("  fav                     Save the last story to favorites");
    println!("  unfav <n>               Remove favorite number n");
    println!("  favs                    List favorites");
    println!("  clear                   Clear all word lists");
    println!("  stories                 List built-in stories");
    println!("  seed <n>                Set RNG seed");
    println!("  bulk <n>                Generate n random stories with selection stats");
    println!("  help                    Show this help");
    println!("  quit                    Exit");
    println!();
    println!("Templates use {{adjective}}, {{noun}} and {{verb}} placeholders.");
}
