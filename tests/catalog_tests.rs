/// Catalog integration tests — built-in stories load, gate and render.

use madlibs_engine::core::catalog::Catalog;
use madlibs_engine::core::engine::StoryEngine;
use madlibs_engine::core::template::Gate;
use madlibs_engine::{StoryKind, WordBank};

/// Distinct, recognizable words: `adj0`, `noun0`, `verb0`, ...
fn numbered_bank(adjectives: usize, nouns: usize, verbs: usize) -> WordBank {
    let words = |prefix: &str, n: usize| -> Vec<String> {
        (0..n).map(|i| format!("{prefix}{i}")).collect()
    };
    WordBank::new(words("adj", adjectives), words("noun", nouns), words("verb", verbs))
}

#[test]
fn catalog_file_on_disk_matches_builtin() {
    let from_disk = Catalog::load_from_ron(std::path::Path::new("story_data/catalog.ron")).unwrap();
    let builtin = Catalog::builtin().unwrap();
    assert_eq!(from_disk.len(), StoryKind::COUNT);
    for kind in StoryKind::ALL {
        assert_eq!(from_disk.get(kind), builtin.get(kind), "{kind}");
    }
}

#[test]
fn every_story_renders_without_placeholders() {
    let catalog = Catalog::builtin().unwrap();
    for n in 0..7 {
        let words = numbered_bank(n, n, n);
        for kind in StoryKind::ALL {
            let story = catalog.render(kind, &words).unwrap();
            assert!(!story.is_empty(), "{kind} with {n} words is empty");
            for token in ["{adjective}", "{noun}", "{verb}", "{", "}"] {
                assert!(!story.contains(token), "{kind} with {n} words: {story}");
            }
        }
    }
}

#[test]
fn every_story_has_at_least_two_body_entries() {
    let catalog = Catalog::builtin().unwrap();
    for kind in StoryKind::ALL {
        assert!(catalog.get(kind).unwrap().body.len() >= 2, "{kind}");
    }
}

#[test]
fn body_gates_never_decrease() {
    let catalog = Catalog::builtin().unwrap();
    for kind in StoryKind::ALL {
        let story = catalog.get(kind).unwrap();
        for pair in story.body.windows(2) {
            let (earlier, later) = (pair[0].gate(), pair[1].gate());
            assert_eq!(earlier.union(later), later, "{kind}");
        }
    }
}

#[test]
fn standard_sentence_needs_index_k_in_every_list() {
    let catalog = Catalog::builtin().unwrap();
    let standard = [
        StoryKind::Adventure,
        StoryKind::Mystery,
        StoryKind::Robot,
        StoryKind::MagicSchool,
        StoryKind::Vacation,
        StoryKind::Zombies,
    ];

    for kind in standard {
        // Sentence 2 needs three of everything; drop each list to two in turn.
        for short in 0..3 {
            let mut counts = [4, 4, 4];
            counts[short] = 2;
            let words = numbered_bank(counts[0], counts[1], counts[2]);
            let story = catalog.render(kind, &words).unwrap();
            assert!(story.contains("adj1"), "{kind}: {story}");
            for word in ["adj2", "noun2", "verb2", "adj3", "noun3", "verb3"] {
                assert!(!story.contains(word), "{kind} kept {word}: {story}");
            }
        }
    }
}

#[test]
fn body_sentence_appears_exactly_when_its_gate_is_met() {
    let catalog = Catalog::builtin().unwrap();
    for kind in StoryKind::ALL {
        let story = catalog.get(kind).unwrap();
        for adjectives in 0..6 {
            for nouns in 0..7 {
                let words = numbered_bank(adjectives, nouns, 5);
                let included = story.body.iter().filter(|e| e.is_included(&words)).count();
                let expected = story
                    .body
                    .iter()
                    .filter(|e| {
                        let gate = e.gate();
                        adjectives >= gate.adjectives && nouns >= gate.nouns && 5 >= gate.verbs
                    })
                    .count();
                assert_eq!(included, expected, "{kind} {adjectives}/{nouns}");
            }
        }
    }
}

#[test]
fn sci_fi_opening_uses_first_words_and_body_starts_at_second() {
    let story = Catalog::builtin()
        .unwrap()
        .render(StoryKind::SciFi, &numbered_bank(1, 1, 1))
        .unwrap();
    assert_eq!(
        story,
        "In the year 3042, a adj0 scientist discovered a way to verb0 through time using a noun0. \
         The universe was never the same again."
    );
}

#[test]
fn fairy_tale_first_sentence_needs_two_nouns() {
    let catalog = Catalog::builtin().unwrap();

    let one_noun = catalog
        .render(StoryKind::FairyTale, &numbered_bank(1, 1, 1))
        .unwrap();
    assert!(!one_noun.contains("hidden beneath the castle"));

    let two_nouns = catalog
        .render(StoryKind::FairyTale, &numbered_bank(1, 2, 0))
        .unwrap();
    assert!(two_nouns.contains("One morning, the noun0 discovered a adj0 noun1 hidden beneath the castle."));
}

#[test]
fn poem_couplet_renders_both_lines_or_neither() {
    let catalog = Catalog::builtin().unwrap();

    let partial = catalog
        .render(StoryKind::Poem, &numbered_bank(3, 2, 3))
        .unwrap();
    assert!(!partial.contains("so free"));
    assert!(!partial.contains("in harmony"));

    let full = catalog
        .render(StoryKind::Poem, &numbered_bank(3, 3, 3))
        .unwrap();
    assert!(full.contains("Every adj2 day, they verb2 so free, By the noun2, in harmony."));
}

#[test]
fn override_file_replaces_single_story() {
    let ron = r#"{
        "vacation": Story(
            opening: Some("Postcard from the {noun:0|beach}."),
            body: [
                ["the {adjective:0} weather made us {verb:0}."],
                ["we met a {adjective:1} {noun:1}."],
            ],
        ),
    }"#;
    let mut catalog = Catalog::builtin().unwrap();
    catalog.merge(Catalog::parse_ron(ron).unwrap());

    let engine = StoryEngine::builder().with_catalog(catalog).build().unwrap();
    let words = WordBank::from_raw("sunny", "island", "swim");
    assert_eq!(
        engine.generate(StoryKind::Vacation, &words).unwrap(),
        "Postcard from the island. The sunny weather made us swim."
    );
    // Other stories are untouched
    assert!(engine
        .generate(StoryKind::Robot, &words)
        .unwrap()
        .starts_with("In a future overrun by machines"));
}

#[test]
fn gate_helpers_describe_standard_sentences() {
    assert_eq!(Gate::at_index(0), Gate { adjectives: 1, nouns: 1, verbs: 1 });
    assert!(Gate::at_index(1).is_satisfied_by(&numbered_bank(2, 2, 2)));
    assert!(!Gate::at_index(1).is_satisfied_by(&numbered_bank(2, 1, 2)));
}
