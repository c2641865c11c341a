pub mod capitalize;
pub mod catalog;
pub mod engine;
pub mod favorites;
pub mod substitute;
pub mod template;
pub mod words;
