/// The story engine: word bank → story orchestration.
///
/// Wires together catalog loading, random story selection, built-in
/// rendering, and custom template substitution.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::catalog::{Catalog, CatalogError};
use crate::core::substitute::generate_from_template;
use crate::schema::story_kind::StoryKind;
use crate::schema::word_bank::WordBank;

/// Shown instead of a story when a word list is empty.
pub const MISSING_WORDS_MESSAGE: &str = "Please enter at least one adjective, noun, and verb.";

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("{}", MISSING_WORDS_MESSAGE)]
    MissingWords,
    #[error("story '{0}' is not in the catalog")]
    StoryNotInCatalog(StoryKind),
}

/// Source of story choices. Returns an index in `[0, len)`.
///
/// The engine draws from a seeded or entropy-backed `StdRng`; tests can
/// supply a fixed sequence instead.
pub trait StoryPicker {
    fn pick(&mut self, len: usize) -> usize;
}

impl StoryPicker for StdRng {
    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Choose a built-in story uniformly at random.
pub fn pick_story<P: StoryPicker + ?Sized>(picker: &mut P) -> StoryKind {
    StoryKind::ALL[picker.pick(StoryKind::COUNT) % StoryKind::COUNT]
}

/// Pick a story and render it from the bank.
///
/// Refuses with `GenerateError::MissingWords` unless every list has at
/// least one word.
pub fn generate_random<P: StoryPicker + ?Sized>(
    catalog: &Catalog,
    bank: &WordBank,
    picker: &mut P,
) -> Result<(StoryKind, String), GenerateError> {
    if !bank.is_complete() {
        debug!(
            adjectives = bank.adjectives.len(),
            nouns = bank.nouns.len(),
            verbs = bank.verbs.len(),
            "refusing to generate from incomplete word bank"
        );
        return Err(GenerateError::MissingWords);
    }

    let kind = pick_story(picker);
    debug!(story = %kind, "picked story");
    let story = catalog
        .render(kind, bank)
        .ok_or(GenerateError::StoryNotInCatalog(kind))?;
    Ok((kind, story))
}

/// The top-level story engine. Built via `StoryEngine::builder()`.
pub struct StoryEngine {
    catalog: Catalog,
    rng: StdRng,
}

/// Builder for constructing a `StoryEngine`.
pub struct StoryEngineBuilder {
    catalog_path: Option<PathBuf>,
    seed: Option<u64>,
    /// Directly provided catalog (for testing without files).
    catalog: Option<Catalog>,
}

impl StoryEngine {
    pub fn builder() -> StoryEngineBuilder {
        StoryEngineBuilder {
            catalog_path: None,
            seed: None,
            catalog: None,
        }
    }

    /// An engine over the built-in catalog with entropy-seeded selection.
    pub fn new() -> Result<StoryEngine, EngineError> {
        Self::builder().build()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Render a specific story. Short lists are handled by the story's
    /// own gating and fallbacks, so this never refuses.
    pub fn generate(&self, kind: StoryKind, bank: &WordBank) -> Result<String, GenerateError> {
        self.catalog
            .render(kind, bank)
            .ok_or(GenerateError::StoryNotInCatalog(kind))
    }

    /// Pick a random story and render it, reporting which one was chosen.
    pub fn try_generate_random(
        &mut self,
        bank: &WordBank,
    ) -> Result<(StoryKind, String), GenerateError> {
        generate_random(&self.catalog, bank, &mut self.rng)
    }

    /// Pick a random story and render it. An incomplete bank yields
    /// [`MISSING_WORDS_MESSAGE`] in place of a story.
    pub fn generate_random_story(&mut self, bank: &WordBank) -> String {
        match self.try_generate_random(bank) {
            Ok((_, story)) => story,
            Err(e) => e.to_string(),
        }
    }

    /// Fill a user-written template. Never fails.
    pub fn generate_from_template(&self, template: &str, bank: &WordBank) -> String {
        generate_from_template(template, bank)
    }

    /// Reseed story selection.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

impl StoryEngineBuilder {
    /// RON file whose stories replace built-in stories of the same kind.
    pub fn catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    /// Make story selection reproducible. Without a seed the engine draws
    /// from system entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Provide a catalog directly (for testing without files).
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn build(self) -> Result<StoryEngine, EngineError> {
        let mut catalog = match self.catalog {
            Some(catalog) => catalog,
            None => Catalog::builtin()?,
        };

        // File stories replace embedded ones of the same kind
        if let Some(ref path) = self.catalog_path {
            catalog.merge(Catalog::load_from_ron(path)?);
        }

        catalog.ensure_complete()?;

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        info!(
            stories = catalog.len(),
            seeded = self.seed.is_some(),
            "story engine ready"
        );

        Ok(StoryEngine { catalog, rng })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of picks.
    struct SequencePicker {
        picks: Vec<usize>,
        next: usize,
    }

    impl SequencePicker {
        fn new(picks: &[usize]) -> Self {
            Self {
                picks: picks.to_vec(),
                next: 0,
            }
        }
    }

    impl StoryPicker for SequencePicker {
        fn pick(&mut self, _len: usize) -> usize {
            let pick = self.picks[self.next % self.picks.len()];
            self.next += 1;
            pick
        }
    }

    fn bank(adj: &[&str], nouns: &[&str], verbs: &[&str]) -> WordBank {
        let owned = |words: &[&str]| -> Vec<String> { words.iter().map(|w| w.to_string()).collect() };
        WordBank::new(owned(adj), owned(nouns), owned(verbs))
    }

    fn full_bank() -> WordBank {
        bank(
            &["fuzzy", "bright", "grumpy", "tiny", "enormous"],
            &["llama", "kettle", "wizard", "comet", "sock", "castle"],
            &["dance", "sneeze", "whistle", "juggle", "swim"],
        )
    }

    #[test]
    fn pick_story_follows_picker() {
        let mut picker = SequencePicker::new(&[3, 8, 0]);
        assert_eq!(pick_story(&mut picker), StoryKind::Poem);
        assert_eq!(pick_story(&mut picker), StoryKind::Zombies);
        assert_eq!(pick_story(&mut picker), StoryKind::Adventure);
    }

    #[test]
    fn pick_story_wraps_out_of_range_picks() {
        let mut picker = SequencePicker::new(&[10]);
        assert_eq!(pick_story(&mut picker), StoryKind::FairyTale);
    }

    #[test]
    fn generate_random_uses_injected_picker() {
        let catalog = Catalog::builtin().unwrap();
        let mut picker = SequencePicker::new(&[StoryKind::Mystery.index()]);
        let (kind, story) = generate_random(&catalog, &full_bank(), &mut picker).unwrap();
        assert_eq!(kind, StoryKind::Mystery);
        assert!(story.starts_with("It was a fuzzy night when the case began."));
    }

    #[test]
    fn incomplete_bank_is_refused_with_message() {
        let mut engine = StoryEngine::builder().seed(7).build().unwrap();
        for words in [
            bank(&[], &["cat"], &["run"]),
            bank(&["big"], &[], &["run"]),
            bank(&["big"], &["cat"], &[]),
            WordBank::default(),
        ] {
            assert_eq!(engine.generate_random_story(&words), MISSING_WORDS_MESSAGE);
            assert_eq!(
                engine.try_generate_random(&words),
                Err(GenerateError::MissingWords)
            );
        }
    }

    #[test]
    fn missing_words_error_displays_message() {
        assert_eq!(GenerateError::MissingWords.to_string(), MISSING_WORDS_MESSAGE);
    }

    #[test]
    fn random_story_has_no_placeholders() {
        let mut engine = StoryEngine::builder().seed(42).build().unwrap();
        for _ in 0..50 {
            let story = engine.generate_random_story(&bank(&["red"], &["hat"], &["hop"]));
            assert!(!story.is_empty());
            assert_ne!(story, MISSING_WORDS_MESSAGE);
            for token in ["{adjective}", "{noun}", "{verb}"] {
                assert!(!story.contains(token), "{story}");
            }
        }
    }

    #[test]
    fn same_seed_same_stories() {
        let words = full_bank();
        let mut a = StoryEngine::builder().seed(99).build().unwrap();
        let mut b = StoryEngine::builder().seed(99).build().unwrap();
        for _ in 0..10 {
            assert_eq!(a.try_generate_random(&words), b.try_generate_random(&words));
        }
    }

    #[test]
    fn reseed_restarts_sequence() {
        let words = full_bank();
        let mut engine = StoryEngine::builder().seed(5).build().unwrap();
        let first: Vec<_> = (0..5)
            .map(|_| engine.try_generate_random(&words).unwrap().0)
            .collect();
        engine.reseed(5);
        let second: Vec<_> = (0..5)
            .map(|_| engine.try_generate_random(&words).unwrap().0)
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn generate_by_kind_does_not_refuse_empty_banks() {
        let engine = StoryEngine::builder().seed(1).build().unwrap();
        let story = engine
            .generate(StoryKind::Mystery, &WordBank::default())
            .unwrap();
        assert_eq!(
            story,
            "It was a dark night when the case began. By sunrise, the mystery was solved, but the city would never be the same."
        );
    }

    #[test]
    fn incomplete_catalog_fails_to_build() {
        let partial = Catalog::parse_ron(r#"{ "poem": Story(body: [["{noun:0}"]]) }"#).unwrap();
        let result = StoryEngine::builder().with_catalog(partial).build();
        assert!(matches!(
            result,
            Err(EngineError::Catalog(CatalogError::MissingStory(_)))
        ));
    }

    #[test]
    fn missing_catalog_file_fails_to_build() {
        let result = StoryEngine::builder()
            .catalog_path("does/not/exist.ron")
            .build();
        assert!(matches!(
            result,
            Err(EngineError::Catalog(CatalogError::Io(_)))
        ));
    }

    #[test]
    fn engine_fills_custom_templates() {
        let engine = StoryEngine::builder().seed(3).build().unwrap();
        assert_eq!(
            engine.generate_from_template("A {adjective} {noun} will {verb}.", &bank(&["big"], &["dog"], &["run"])),
            "A big dog will run."
        );
    }
}
