/// Story line templates — slot parsing, gating, and rendering.

use thiserror::Error;

use crate::schema::word_bank::{WordBank, WordKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template parse error: {0}")]
    Parse(String),
    #[error("unknown word kind '{0}' (expected adjective, noun or verb)")]
    UnknownWordKind(String),
    #[error("invalid word index in slot '{0}'")]
    BadIndex(String),
}

/// A segment of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, emitted as-is.
    Literal(String),
    /// Positional word reference: `{noun:2}`, or `{noun:0|corpse}` with a
    /// fallback used when the list is too short.
    Slot {
        kind: WordKind,
        index: usize,
        fallback: Option<String>,
    },
}

/// A parsed story line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

/// Minimum list lengths a line needs before it can be rendered in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gate {
    pub adjectives: usize,
    pub nouns: usize,
    pub verbs: usize,
}

impl Gate {
    /// The gate of a standard body sentence `k`: index `k` in every list.
    pub fn at_index(k: usize) -> Self {
        let count = k.saturating_add(1);
        Self {
            adjectives: count,
            nouns: count,
            verbs: count,
        }
    }

    pub fn get(&self, kind: WordKind) -> usize {
        match kind {
            WordKind::Adjective => self.adjectives,
            WordKind::Noun => self.nouns,
            WordKind::Verb => self.verbs,
        }
    }

    fn raise(&mut self, kind: WordKind, count: usize) {
        let slot = match kind {
            WordKind::Adjective => &mut self.adjectives,
            WordKind::Noun => &mut self.nouns,
            WordKind::Verb => &mut self.verbs,
        };
        *slot = (*slot).max(count);
    }

    /// The stricter of two gates, list by list.
    pub fn union(mut self, other: Gate) -> Gate {
        for kind in WordKind::ALL {
            self.raise(kind, other.get(kind));
        }
        self
    }

    pub fn is_satisfied_by(&self, bank: &WordBank) -> bool {
        WordKind::ALL
            .iter()
            .all(|kind| bank.words(*kind).len() >= self.get(*kind))
    }
}

impl Template {
    /// Parse a template string into a sequence of segments.
    ///
    /// Syntax:
    /// - `{adjective:0}`, `{noun:1}`, `{verb:2}` → `Slot`
    /// - `{noun:0|corpse}` → `Slot` with fallback word
    /// - `{{` / `}}` → literal `{` / `}`
    /// - Everything else → `Literal`
    pub fn parse(input: &str) -> Result<Template, TemplateError> {
        let mut segments = Vec::new();
        let mut literal_buf = String::new();
        let chars: Vec<char> = input.chars().collect();
        let len = chars.len();
        let mut i = 0;

        while i < len {
            if chars[i] == '{' {
                // Escaped brace
                if i + 1 < len && chars[i + 1] == '{' {
                    literal_buf.push('{');
                    i += 2;
                    continue;
                }

                if !literal_buf.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal_buf)));
                }

                let start = i + 1;
                let mut end = start;
                while end < len && chars[end] != '}' {
                    if chars[end] == '{' {
                        return Err(TemplateError::Parse(
                            "nested braces are not allowed".to_string(),
                        ));
                    }
                    end += 1;
                }

                if end == len {
                    return Err(TemplateError::Parse("unclosed brace".to_string()));
                }

                let content: String = chars[start..end].iter().collect();
                if content.is_empty() {
                    return Err(TemplateError::Parse("empty braces".to_string()));
                }

                segments.push(Self::parse_slot(&content)?);
                i = end + 1;
            } else if chars[i] == '}' {
                if i + 1 < len && chars[i + 1] == '}' {
                    literal_buf.push('}');
                    i += 2;
                    continue;
                }
                return Err(TemplateError::Parse(
                    "unmatched closing brace".to_string(),
                ));
            } else {
                literal_buf.push(chars[i]);
                i += 1;
            }
        }

        if !literal_buf.is_empty() {
            segments.push(Segment::Literal(literal_buf));
        }

        Ok(Template { segments })
    }

    fn parse_slot(content: &str) -> Result<Segment, TemplateError> {
        let (reference, fallback) = match content.split_once('|') {
            Some((reference, fallback)) => {
                if fallback.trim().is_empty() {
                    return Err(TemplateError::Parse(format!(
                        "empty fallback in slot '{}'",
                        content
                    )));
                }
                (reference, Some(fallback.to_string()))
            }
            None => (content, None),
        };

        let (kind_name, index) = reference
            .split_once(':')
            .ok_or_else(|| TemplateError::BadIndex(content.to_string()))?;
        let kind = WordKind::from_name(kind_name.trim())
            .ok_or_else(|| TemplateError::UnknownWordKind(kind_name.to_string()))?;
        // Gates count words, so index + 1 must fit in a usize
        let index = index
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|index| index.checked_add(1).is_some())
            .ok_or_else(|| TemplateError::BadIndex(content.to_string()))?;

        Ok(Segment::Slot {
            kind,
            index,
            fallback,
        })
    }

    /// List lengths needed to fill every slot from the bank, ignoring
    /// fallbacks.
    pub fn gate(&self) -> Gate {
        let mut gate = Gate::default();
        for segment in &self.segments {
            if let Segment::Slot { kind, index, .. } = segment {
                gate.raise(*kind, index + 1);
            }
        }
        gate
    }

    /// True when every slot carries a fallback word, so the line renders
    /// completely against any bank.
    pub fn is_self_sufficient(&self) -> bool {
        self.segments.iter().all(|segment| match segment {
            Segment::Slot { fallback, .. } => fallback.is_some(),
            Segment::Literal(_) => true,
        })
    }

    /// Render against a bank. A slot past the end of its list uses its
    /// fallback, or its bare placeholder when it has none.
    pub fn render(&self, bank: &WordBank) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot {
                    kind,
                    index,
                    fallback,
                } => {
                    let word = bank
                        .get(*kind, *index)
                        .or(fallback.as_deref())
                        .unwrap_or(kind.placeholder());
                    out.push_str(word);
                }
            }
        }
        out
    }
}
