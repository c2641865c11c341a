pub mod story_kind;
pub mod word_bank;
