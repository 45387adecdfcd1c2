//! Prompt levels and the catalogue shown by the form

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Complexity tier selecting which assembly rule applies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Basic,
    Intermediate,
    Advanced,
    Expert,
}

impl Level {
    /// All levels in the order the form lists them
    pub const ALL: [Level; 4] = [
        Level::Basic,
        Level::Intermediate,
        Level::Advanced,
        Level::Expert,
    ];

    /// Parse an exact lowercase level id; returns `None` for anything else
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "basic" => Some(Self::Basic),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            "expert" => Some(Self::Expert),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Basic => "Simple prompts that provide direct instructions to the AI.",
            Self::Intermediate => {
                "More structured prompts with context and specific requirements."
            }
            Self::Advanced => {
                "Complex prompts with detailed context, constraints, and multi-step instructions."
            }
            Self::Expert => {
                "Highly sophisticated prompts with meta-instructions, evaluation criteria, and iterative refinement."
            }
        }
    }

    /// Qualities the form recommends for prompts of this level
    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            Self::Basic => &[
                "Clear and concise instructions",
                "Single, focused request",
                "Minimal context needed",
            ],
            Self::Intermediate => &[
                "Specific context for the AI",
                "Defined output format",
                "Persona or role specification",
                "Tone guidance",
            ],
            Self::Advanced => &[
                "Detailed background information",
                "Step-by-step reasoning process",
                "Specific constraints on output",
                "Multiple interconnected requests",
                "Audience specification",
            ],
            Self::Expert => &[
                "Meta-instructions on how to approach the problem",
                "Multiple perspective consideration",
                "Evaluation criteria for the response",
                "Specific methodologies to apply",
                "Constraints and ethical considerations",
                "Detailed audience and context information",
            ],
        }
    }

    /// Input fields the form shows for this level
    pub fn fields(&self) -> &'static [InputField] {
        match self {
            Self::Basic => &[InputField::Topic, InputField::Requirements],
            Self::Intermediate => &[
                InputField::Topic,
                InputField::Context,
                InputField::Requirements,
                InputField::Tone,
            ],
            Self::Advanced | Self::Expert => &[
                InputField::Topic,
                InputField::Context,
                InputField::Requirements,
                InputField::Audience,
                InputField::Tone,
            ],
        }
    }

    pub fn shows(&self, field: InputField) -> bool {
        self.fields().contains(&field)
    }

    pub fn info(&self) -> LevelInfo {
        LevelInfo {
            id: *self,
            name: self.name(),
            description: self.description(),
            recommendations: self.recommendations().to_vec(),
            fields: self.fields().to_vec(),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown level id
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown prompt level '{0}'")]
pub struct UnknownLevel(pub String);

impl FromStr for Level {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownLevel(s.to_string()))
    }
}

/// Form input fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputField {
    Topic,
    Context,
    Requirements,
    Audience,
    Tone,
}

/// Catalogue entry describing one level
#[derive(Debug, Clone, Serialize)]
pub struct LevelInfo {
    pub id: Level,
    pub name: &'static str,
    pub description: &'static str,
    pub recommendations: Vec<&'static str>,
    pub fields: Vec<InputField>,
}

/// The full level catalogue, in display order
pub fn catalogue() -> Vec<LevelInfo> {
    Level::ALL.iter().map(Level::info).collect()
}
