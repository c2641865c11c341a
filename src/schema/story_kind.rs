use std::fmt;
use std::str::FromStr;

/// The built-in story catalog, in catalog order.
///
/// Random selection draws an index into [`StoryKind::ALL`], so the order
/// here is the order stories are numbered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoryKind {
    Adventure,
    FairyTale,
    SciFi,
    Poem,
    Mystery,
    Robot,
    MagicSchool,
    Vacation,
    Zombies,
}

impl StoryKind {
    pub const ALL: [StoryKind; 9] = [
        StoryKind::Adventure,
        StoryKind::FairyTale,
        StoryKind::SciFi,
        StoryKind::Poem,
        StoryKind::Mystery,
        StoryKind::Robot,
        StoryKind::MagicSchool,
        StoryKind::Vacation,
        StoryKind::Zombies,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Snake-case name used as the catalog key, e.g. "magic_school".
    pub fn name(&self) -> &'static str {
        match self {
            Self::Adventure => "adventure",
            Self::FairyTale => "fairy_tale",
            Self::SciFi => "sci_fi",
            Self::Poem => "poem",
            Self::Mystery => "mystery",
            Self::Robot => "robot",
            Self::MagicSchool => "magic_school",
            Self::Vacation => "vacation",
            Self::Zombies => "zombies",
        }
    }

    /// Position of this story in [`StoryKind::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for StoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a name matches no built-in story.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown story kind: {0}")]
pub struct UnknownStoryKind(pub String);

impl FromStr for StoryKind {
    type Err = UnknownStoryKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| UnknownStoryKind(s.to_string()))
    }
}
