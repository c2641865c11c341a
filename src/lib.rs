//! Mad Libs Engine — fill-in-the-blank story generation.
//!
//! Turns lists of user-supplied adjectives, nouns and verbs into stories,
//! either by picking one of the built-in story templates at random or by
//! filling a custom template containing `{adjective}`, `{noun}` and
//! `{verb}` placeholders.

pub mod core;
pub mod schema;

pub use crate::core::capitalize::capitalize_sentences;
pub use crate::core::engine::{StoryEngine, MISSING_WORDS_MESSAGE};
pub use crate::core::substitute::generate_from_template;
pub use crate::core::words::prepare_words;
pub use crate::schema::story_kind::StoryKind;
pub use crate::schema::word_bank::{WordBank, WordKind};
