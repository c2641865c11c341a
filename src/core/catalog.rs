/// Built-in story catalog — types, RON loading, validation, and rendering.

use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::capitalize::capitalize_sentences;
use crate::core::template::{Gate, Segment, Template, TemplateError};
use crate::schema::story_kind::{StoryKind, UnknownStoryKind};
use crate::schema::word_bank::WordBank;

/// The catalog compiled into the crate.
const BUILTIN_CATALOG: &str = include_str!("../../story_data/catalog.ron");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("story '{story}': {source}")]
    Template {
        story: String,
        source: TemplateError,
    },
    #[error(transparent)]
    UnknownStory(#[from] UnknownStoryKind),
    #[error("story '{story}': {part} slot '{slot}' needs a fallback word")]
    MissingFallback {
        story: StoryKind,
        part: &'static str,
        slot: String,
    },
    #[error("story '{story}': body entry {entry} has no lines")]
    EmptyBodyEntry { story: StoryKind, entry: usize },
    #[error("story '{0}' is missing from the catalog")]
    MissingStory(StoryKind),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// An optional group of lines that appear together or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyEntry {
    pub lines: Vec<Template>,
}

impl BodyEntry {
    /// The entry's gate is the union of its lines' gates. For a standard
    /// sentence `k` that is index `k` of every list.
    ///
    /// Poem couplets split index `k` across two lines, neither of which
    /// uses all three lists alone. Gating on the union keeps both lines
    /// tied to index `k` of every list; gating each line separately would
    /// change which poems come out.
    pub fn gate(&self) -> Gate {
        self.lines
            .iter()
            .fold(Gate::default(), |gate, line| gate.union(line.gate()))
    }

    pub fn is_included(&self, bank: &WordBank) -> bool {
        self.gate().is_satisfied_by(bank)
    }
}

/// One story: fixed opening, gated body, fixed closing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryTemplate {
    pub kind: StoryKind,
    pub opening: Option<Template>,
    pub body: Vec<BodyEntry>,
    pub closing: Option<Template>,
    /// Used in place of the body when no body entry is included.
    pub fallback: Option<Template>,
}

impl StoryTemplate {
    /// Fill the story from the bank and capitalize it as one unit.
    pub fn render(&self, bank: &WordBank) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(ref opening) = self.opening {
            parts.push(opening.render(bank));
        }

        let mut included = 0;
        for entry in self.body.iter().filter(|entry| entry.is_included(bank)) {
            parts.extend(entry.lines.iter().map(|line| line.render(bank)));
            included += 1;
        }

        if included == 0 {
            if let Some(ref fallback) = self.fallback {
                parts.push(fallback.render(bank));
            }
        }

        if let Some(ref closing) = self.closing {
            parts.push(closing.render(bank));
        }

        debug!(
            story = %self.kind,
            included,
            available = self.body.len(),
            "rendered story"
        );

        capitalize_sentences(&parts.join(" "))
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let always_rendered = [
            ("opening", &self.opening),
            ("closing", &self.closing),
            ("fallback", &self.fallback),
        ];
        for (part, template) in always_rendered {
            if let Some(template) = template {
                if !template.is_self_sufficient() {
                    return Err(CatalogError::MissingFallback {
                        story: self.kind,
                        part,
                        slot: first_bare_slot(template),
                    });
                }
            }
        }

        for (entry, body) in self.body.iter().enumerate() {
            if body.lines.is_empty() {
                return Err(CatalogError::EmptyBodyEntry {
                    story: self.kind,
                    entry,
                });
            }
        }
        Ok(())
    }
}

fn first_bare_slot(template: &Template) -> String {
    template
        .segments
        .iter()
        .find_map(|segment| match segment {
            Segment::Slot {
                kind,
                index,
                fallback: None,
            } => Some(format!("{}:{}", kind.name(), index)),
            _ => None,
        })
        .unwrap_or_default()
}

/// A set of stories keyed by kind.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    stories: FxHashMap<StoryKind, StoryTemplate>,
}

// Raw RON shape; template strings are parsed after loading.
#[derive(Debug, Deserialize)]
#[serde(rename = "Story")]
struct RonStory {
    #[serde(default)]
    opening: Option<String>,
    #[serde(default)]
    body: Vec<Vec<String>>,
    #[serde(default)]
    closing: Option<String>,
    #[serde(default)]
    fallback: Option<String>,
}

impl Catalog {
    /// The catalog shipped with the crate. Contains every `StoryKind`.
    pub fn builtin() -> Result<Catalog, CatalogError> {
        let catalog = Self::parse_ron(BUILTIN_CATALOG)?;
        catalog.ensure_complete()?;
        Ok(catalog)
    }

    /// Load a catalog from a RON file. The file may hold any subset of
    /// stories.
    pub fn load_from_ron(path: &Path) -> Result<Catalog, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::parse_ron(&contents)?;
        info!(path = %path.display(), stories = catalog.len(), "loaded story catalog");
        Ok(catalog)
    }

    /// Parse a catalog from a RON string.
    pub fn parse_ron(input: &str) -> Result<Catalog, CatalogError> {
        let raw: HashMap<String, RonStory> = ron::from_str(input)?;
        let mut stories = FxHashMap::default();

        for (name, ron_story) in raw {
            let kind: StoryKind = name.parse()?;
            let parse = |text: &str| {
                Template::parse(text).map_err(|source| CatalogError::Template {
                    story: name.clone(),
                    source,
                })
            };

            let opening = ron_story.opening.as_deref().map(&parse).transpose()?;
            let closing = ron_story.closing.as_deref().map(&parse).transpose()?;
            let fallback = ron_story.fallback.as_deref().map(&parse).transpose()?;
            let mut body = Vec::with_capacity(ron_story.body.len());
            for lines in &ron_story.body {
                let lines = lines
                    .iter()
                    .map(String::as_str)
                    .map(&parse)
                    .collect::<Result<Vec<_>, _>>()?;
                body.push(BodyEntry { lines });
            }

            let story = StoryTemplate {
                kind,
                opening,
                body,
                closing,
                fallback,
            };
            story.validate()?;
            stories.insert(kind, story);
        }

        Ok(Catalog { stories })
    }

    /// Merge another catalog into this one. Stories from `other` replace
    /// stories of the same kind in `self`.
    pub fn merge(&mut self, other: Catalog) {
        self.stories.extend(other.stories);
    }

    pub fn get(&self, kind: StoryKind) -> Option<&StoryTemplate> {
        self.stories.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// Stories present, in catalog order.
    pub fn kinds(&self) -> impl Iterator<Item = StoryKind> + '_ {
        StoryKind::ALL
            .into_iter()
            .filter(|kind| self.stories.contains_key(kind))
    }

    /// Fail unless every `StoryKind` has a story.
    pub fn ensure_complete(&self) -> Result<(), CatalogError> {
        match StoryKind::ALL
            .into_iter()
            .find(|kind| !self.stories.contains_key(kind))
        {
            Some(missing) => Err(CatalogError::MissingStory(missing)),
            None => Ok(()),
        }
    }

    /// Render the story of the given kind, if the catalog has it.
    pub fn render(&self, kind: StoryKind, bank: &WordBank) -> Option<String> {
        self.get(kind).map(|story| story.render(bank))
    }
}
