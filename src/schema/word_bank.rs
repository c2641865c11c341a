use serde::Serialize;

use crate::core::words::prepare_words;

/// The three kinds of word a story can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordKind {
    Adjective,
    Noun,
    Verb,
}

impl WordKind {
    pub const ALL: [WordKind; 3] = [WordKind::Adjective, WordKind::Noun, WordKind::Verb];

    /// Name used in slot syntax and placeholders: "adjective", "noun", "verb".
    pub fn name(&self) -> &'static str {
        match self {
            Self::Adjective => "adjective",
            Self::Noun => "noun",
            Self::Verb => "verb",
        }
    }

    /// The literal placeholder token for custom templates, e.g. `{noun}`.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Adjective => "{adjective}",
            Self::Noun => "{noun}",
            Self::Verb => "{verb}",
        }
    }

    pub fn from_name(name: &str) -> Option<WordKind> {
        match name {
            "adjective" => Some(Self::Adjective),
            "noun" => Some(Self::Noun),
            "verb" => Some(Self::Verb),
            _ => None,
        }
    }
}

/// The user's words, in the order they were entered.
///
/// Stories reference words by position, so order matters and duplicates
/// are kept. A bank is built fresh for every generation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WordBank {
    pub adjectives: Vec<String>,
    pub nouns: Vec<String>,
    pub verbs: Vec<String>,
}

impl WordBank {
    pub fn new(adjectives: Vec<String>, nouns: Vec<String>, verbs: Vec<String>) -> Self {
        Self {
            adjectives,
            nouns,
            verbs,
        }
    }

    /// Build a bank from three raw comma-separated inputs.
    pub fn from_raw(adjectives: &str, nouns: &str, verbs: &str) -> Self {
        Self {
            adjectives: prepare_words(adjectives),
            nouns: prepare_words(nouns),
            verbs: prepare_words(verbs),
        }
    }

    pub fn words(&self, kind: WordKind) -> &[String] {
        match kind {
            WordKind::Adjective => &self.adjectives,
            WordKind::Noun => &self.nouns,
            WordKind::Verb => &self.verbs,
        }
    }

    /// Word at `index` of the given list, if the list is long enough.
    pub fn get(&self, kind: WordKind, index: usize) -> Option<&str> {
        self.words(kind).get(index).map(String::as_str)
    }

    /// True when every list has at least one word.
    pub fn is_complete(&self) -> bool {
        WordKind::ALL.iter().all(|kind| !self.words(*kind).is_empty())
    }

    /// Length of the shortest list.
    pub fn min_len(&self) -> usize {
        WordKind::ALL
            .iter()
            .map(|kind| self.words(*kind).len())
            .min()
            .unwrap_or(0)
    }
}
