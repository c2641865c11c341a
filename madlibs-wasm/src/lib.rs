//! WASM bindings for madlibs-engine — powers the interactive web demo.

use wasm_bindgen::prelude::*;

use madlibs_engine::core::engine::StoryEngine;
use madlibs_engine::core::favorites::Favorites;
use madlibs_engine::schema::story_kind::StoryKind;
use madlibs_engine::schema::word_bank::WordBank;

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Deserialize)]
struct WordsInput {
    #[serde(default)]
    adjectives: String,
    #[serde(default)]
    nouns: String,
    #[serde(default)]
    verbs: String,
}

#[derive(serde::Serialize)]
struct StoryOutput {
    kind: Option<String>,
    story: String,
}

#[derive(serde::Serialize)]
struct WordsInfo<'a> {
    #[serde(flatten)]
    bank: &'a WordBank,
    complete: bool,
}

// ---------------------------------------------------------------------------
// MadLibsDemo — the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct MadLibsDemo {
    engine: StoryEngine,
    bank: WordBank,
    favorites: Favorites,
}

#[wasm_bindgen]
impl MadLibsDemo {
    /// Create a new demo instance with the built-in stories.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Result<MadLibsDemo, JsError> {
        let engine = StoryEngine::builder()
            .seed(seed)
            .build()
            .map_err(|e| JsError::new(&format!("Engine build error: {e}")))?;

        Ok(MadLibsDemo {
            engine,
            bank: WordBank::default(),
            favorites: Favorites::new(),
        })
    }

    /// Replace the word lists from raw comma-separated text.
    pub fn set_words(&mut self, adjectives: &str, nouns: &str, verbs: &str) {
        self.bank = WordBank::from_raw(adjectives, nouns, verbs);
    }

    /// Replace the word lists from a JSON object.
    ///
    /// Expected JSON shape:
    /// ```json
    /// { "adjectives": "big, red", "nouns": "dog", "verbs": "run, jump" }
    /// ```
    pub fn set_words_json(&mut self, words_json: &str) -> Result<(), JsError> {
        let input: WordsInput = serde_json::from_str(words_json)
            .map_err(|e| JsError::new(&format!("Invalid words JSON: {e}")))?;
        self.set_words(&input.adjectives, &input.nouns, &input.verbs);
        Ok(())
    }

    /// Clear all three word lists.
    pub fn clear_words(&mut self) {
        self.bank = WordBank::default();
    }

    /// Return the prepared word lists as JSON.
    pub fn words(&self) -> Result<String, JsError> {
        let info = WordsInfo {
            bank: &self.bank,
            complete: self.bank.is_complete(),
        };
        serde_json::to_string(&info)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Generate a random built-in story. Returns the refusal message when
    /// a word list is empty.
    pub fn random_story(&mut self) -> String {
        self.engine.generate_random_story(&self.bank)
    }

    /// Generate a random built-in story. Returns JSON with the chosen kind,
    /// which is null when the words were refused.
    pub fn random_story_json(&mut self) -> Result<String, JsError> {
        let output = match self.engine.try_generate_random(&self.bank) {
            Ok((kind, story)) => StoryOutput {
                kind: Some(kind.name().to_string()),
                story,
            },
            Err(e) => StoryOutput {
                kind: None,
                story: e.to_string(),
            },
        };
        serde_json::to_string(&output)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Generate a specific built-in story by name, e.g. `"magic_school"`.
    pub fn story(&self, kind: &str) -> Result<String, JsError> {
        let kind: StoryKind = kind.parse().map_err(|e| JsError::new(&format!("{e}")))?;
        self.engine
            .generate(kind, &self.bank)
            .map_err(|e| JsError::new(&format!("Generation error: {e}")))
    }

    /// Fill a custom template containing `{adjective}`, `{noun}` and
    /// `{verb}` placeholders.
    pub fn custom_story(&self, template: &str) -> String {
        self.engine.generate_from_template(template, &self.bank)
    }

    /// Save a story to favorites. Returns false if already saved.
    pub fn add_favorite(&mut self, story: &str) -> bool {
        self.favorites.add(story)
    }

    /// Remove a story from favorites. Returns false if it was not saved.
    pub fn remove_favorite(&mut self, story: &str) -> bool {
        self.favorites.remove(story)
    }

    pub fn is_favorite(&self, story: &str) -> bool {
        self.favorites.contains(story)
    }

    /// Return the favorites as a JSON array of strings, oldest first.
    pub fn favorites(&self) -> Result<String, JsError> {
        let stories: Vec<&str> = self.favorites.iter().collect();
        serde_json::to_string(&stories)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Return JSON array of built-in story names, in catalog order.
    pub fn story_kinds() -> String {
        let names: Vec<&str> = StoryKind::ALL.iter().map(|k| k.name()).collect();
        serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
    }

    /// Reseed story selection. Words and favorites are kept.
    pub fn reset(&mut self, seed: u64) {
        self.engine.reseed(seed);
    }
}
