/// Catalog Linter — validates story catalog coverage and gating.
///
/// Usage: catalog_linter [<catalog.ron>]
///
/// Without a path, lints the built-in catalog.

use madlibs_engine::core::catalog::{Catalog, StoryTemplate};
use madlibs_engine::core::template::Gate;
use madlibs_engine::schema::story_kind::StoryKind;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        println!("Usage: catalog_linter [<catalog.ron>]");
        process::exit(0);
    }

    let loaded = match args.get(1) {
        Some(path) => Catalog::load_from_ron(Path::new(path)),
        None => Catalog::builtin(),
    };
    let catalog = match loaded {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("ERROR: Failed to load catalog: {}", e);
            process::exit(1);
        }
    };

    println!("Loaded {} stories", catalog.len());

    let (warnings, notes) = lint_catalog(&catalog);

    println!("\n=== Catalog Lint Report ===\n");

    if warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for note in &notes {
        println!("NOTE: {}", note);
    }

    println!(
        "\nSummary: {} warnings, {} notes",
        warnings.len(),
        notes.len()
    );
}

fn lint_catalog(catalog: &Catalog) -> (Vec<String>, Vec<String>) {
    let mut warnings = Vec::new();
    let mut notes = Vec::new();

    // Coverage: partial catalogs are fine as overrides
    for kind in StoryKind::ALL {
        if catalog.get(kind).is_none() {
            warnings.push(format!("No story for '{}'", kind));
        }
    }

    for kind in catalog.kinds() {
        let Some(story) = catalog.get(kind) else {
            continue;
        };
        lint_story(story, &mut warnings, &mut notes);
    }

    (warnings, notes)
}

fn lint_story(story: &StoryTemplate, warnings: &mut Vec<String>, notes: &mut Vec<String>) {
    let kind = story.kind;

    if story.body.len() < 2 {
        warnings.push(format!(
            "Story '{}' has only {} body entries (minimum 2 recommended)",
            kind,
            story.body.len()
        ));
    }

    if story.opening.is_none() && story.closing.is_none() && story.fallback.is_none() {
        warnings.push(format!(
            "Story '{}' has no opening, closing or fallback and can render empty",
            kind
        ));
    }

    let mut previous: Option<Gate> = None;
    for (k, entry) in story.body.iter().enumerate() {
        let gate = entry.gate();

        if let Some(prev) = previous {
            // A later entry should never need fewer words than an earlier one
            if prev.union(gate) != gate {
                warnings.push(format!(
                    "Story '{}' body entry {} is gated below entry {}, so it can appear while the earlier one is skipped",
                    kind,
                    k,
                    k - 1
                ));
            }
        }

        let standard = (0..=k + 1).any(|i| gate == Gate::at_index(i));
        if !standard {
            notes.push(format!(
                "Story '{}' body entry {} uses a non-standard gate (adjectives {}, nouns {}, verbs {})",
                kind, k, gate.adjectives, gate.nouns, gate.verbs
            ));
        }

        previous = Some(gate);
    }
}
