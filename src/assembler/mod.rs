//! Prompt Assembler
//! Turns the form fields into a prompt using one formatting rule per level

mod level;
mod template;

use serde::{Deserialize, Serialize};

pub use level::{catalogue, InputField, Level, LevelInfo, UnknownLevel};
pub use template::{render_template, PromptTemplate};

/// Separator placed between prompt blocks
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Closing instruction appended to advanced prompts
pub const ADVANCED_CLOSING: &str = "Please provide a comprehensive response addressing all aspects of the topic and following all specified requirements.";

/// Fixed methodology block of expert prompts
pub const EXPERT_METHODOLOGY: &str = "Approach this task as follows:
1. Begin with a concise overview of the key concepts
2. Analyze the topic from multiple perspectives
3. Provide evidence-based insights and examples
4. Address potential counterarguments or limitations
5. Conclude with practical implications or applications";

/// Evaluation criteria closing expert prompts
pub const EXPERT_CLOSING: &str = "Your response will be evaluated based on depth of analysis, logical coherence, evidence quality, and practical relevance.";

/// Raw form fields. Only `topic` is required, and that is checked by the form
/// session, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInput {
    pub topic: String,
    pub context: String,
    pub requirements: String,
    pub audience: String,
    pub tone: String,
}

impl UserInput {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Self::default()
        }
    }
}

type Rule = fn(&UserInput) -> String;

/// Single mapping from level to its formatting rule
fn rule_for(level: Level) -> Rule {
    match level {
        Level::Basic => basic,
        Level::Intermediate => intermediate,
        Level::Advanced => advanced,
        Level::Expert => expert,
    }
}

/// Assemble the prompt for `level`. Never fails; empty fields drop their block.
pub fn assemble(input: &UserInput, level: Level) -> String {
    rule_for(level)(input)
}

/// String-keyed variant of [`assemble`]. Unknown levels produce an empty prompt.
pub fn assemble_for(input: &UserInput, level: &str) -> String {
    match Level::parse(level) {
        Some(level) => assemble(input, level),
        None => String::new(),
    }
}

/// Ordered prompt blocks; empty blocks are skipped when joined
struct Blocks(Vec<String>);

impl Blocks {
    fn new() -> Self {
        Self(Vec::new())
    }

    /// Add `format(value)` when `value` has content
    fn field(mut self, value: &str, format: impl FnOnce(&str) -> String) -> Self {
        if !value.trim().is_empty() {
            self.0.push(format(value));
        }
        self
    }

    fn fixed(mut self, text: &str) -> Self {
        self.0.push(text.to_string());
        self
    }

    fn join(self) -> String {
        self.0.join(BLOCK_SEPARATOR)
    }
}

fn basic(input: &UserInput) -> String {
    Blocks::new()
        .field(&input.topic, |t| t.to_string())
        .field(&input.requirements, |r| r.to_string())
        .join()
}

fn intermediate(input: &UserInput) -> String {
    Blocks::new()
        .field(&input.tone, |t| format!("Please respond in a {} tone.", t))
        .field(&input.topic, |t| t.to_string())
        .field(&input.context, |c| format!("Context: {}", c))
        .field(&input.requirements, |r| format!("Requirements: {}", r))
        .join()
}

fn advanced(input: &UserInput) -> String {
    Blocks::new()
        .field(&input.topic, |t| format!("Topic: {}", t))
        .field(&input.context, |c| format!("Background Information: {}", c))
        .field(&input.audience, |a| format!("Target Audience: {}", a))
        .field(&input.tone, |t| {
            format!("Tone: Please respond in a {} tone.", t)
        })
        .field(&input.requirements, |r| {
            format!("Specific Requirements:\n{}", r)
        })
        .fixed(ADVANCED_CLOSING)
        .join()
}

fn expert(input: &UserInput) -> String {
    Blocks::new()
        .field(&input.topic, |t| {
            format!("I need a detailed analysis on the following topic: {}", t)
        })
        .field(&input.context, |c| format!("Context and Background:\n{}", c))
        .field(&input.audience, |a| {
            format!("This content is intended for: {}", a)
        })
        .field(&input.tone, |t| {
            format!("Please maintain a {} tone throughout your response.", t)
        })
        .fixed(EXPERT_METHODOLOGY)
        .field(&input.requirements, |r| {
            format!("Additional Requirements and Constraints:\n{}", r)
        })
        .fixed(EXPERT_CLOSING)
        .join()
}
