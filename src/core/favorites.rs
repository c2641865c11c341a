/// Favorites — the session's list of saved stories.

use rustc_hash::FxHashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// An ordered list of distinct stories.
///
/// Stories keep the order they were added in. Adding a story that is
/// already present does nothing.
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    stories: Vec<String>,
    index: FxHashSet<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a story unless it is already saved. Returns whether it was
    /// added.
    pub fn add(&mut self, story: impl Into<String>) -> bool {
        let story = story.into();
        if self.index.contains(&story) {
            return false;
        }
        self.index.insert(story.clone());
        self.stories.push(story);
        true
    }

    /// Remove a story by value. Returns whether it was present.
    pub fn remove(&mut self, story: &str) -> bool {
        if !self.index.remove(story) {
            return false;
        }
        self.stories.retain(|s| s != story);
        true
    }

    /// Remove the story at `position`, returning it.
    pub fn remove_at(&mut self, position: usize) -> Option<String> {
        if position >= self.stories.len() {
            return None;
        }
        let story = self.stories.remove(position);
        self.index.remove(&story);
        Some(story)
    }

    pub fn contains(&self, story: &str) -> bool {
        self.index.contains(story)
    }

    pub fn get(&self, position: usize) -> Option<&str> {
        self.stories.get(position).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.stories.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    pub fn clear(&mut self) {
        self.stories.clear();
        self.index.clear();
    }
}

/// A favorites list that can be shared across threads.
///
/// Every operation holds the lock for its whole duration, so the
/// contains-check and append inside `add` happen as one step.
#[derive(Debug, Clone, Default)]
pub struct SharedFavorites {
    inner: Arc<Mutex<Favorites>>,
}

impl SharedFavorites {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Favorites> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add(&self, story: impl Into<String>) -> bool {
        self.lock().add(story)
    }

    pub fn remove(&self, story: &str) -> bool {
        self.lock().remove(story)
    }

    pub fn contains(&self, story: &str) -> bool {
        self.lock().contains(story)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the current stories, in order.
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().iter().map(str::to_string).collect()
    }
}
