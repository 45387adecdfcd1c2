//! Form session - transient state behind the prompt form
//!
//! `Idle -> Generating -> Success | Degraded | Failed`. Selecting a level
//! always returns to `Idle` and discards the last result.

use serde::Serialize;
use thiserror::Error;

use crate::assembler::{Level, UserInput};
use crate::enhancer::templates::{ADVISORY_FAILED, ADVISORY_UNAVAILABLE};
use crate::enhancer::Enhancement;

/// Errors raised by the form session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("topic is required")]
    TopicRequired,
    #[error("a prompt is already being generated")]
    AlreadyGenerating,
    #[error("no prompt has been generated yet")]
    NothingGenerated,
}

/// A finished prompt and the level it was built for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedPrompt {
    pub prompt: String,
    pub level: Level,
}

/// Generation lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenerationState {
    #[default]
    Idle,
    Generating,
    Success(GeneratedPrompt),
    Degraded {
        generated: GeneratedPrompt,
        advisory: String,
    },
    Failed {
        message: String,
    },
}

impl GenerationState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Generating => "generating",
            Self::Success(_) => "success",
            Self::Degraded { .. } => "degraded",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Handle for one generation; stale tickets are ignored on completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub id: u64,
    pub level: Level,
}

/// Selected level plus generation state
#[derive(Debug, Clone, Default)]
pub struct FormSession {
    level: Level,
    state: GenerationState,
    generation: u64,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    pub fn is_generating(&self) -> bool {
        self.state == GenerationState::Generating
    }

    /// Switch level, discarding any previous or in-flight result
    pub fn select_level(&mut self, level: Level) {
        self.level = level;
        self.state = GenerationState::Idle;
        self.generation += 1;
    }

    /// Enter `Generating`. Acts as the in-flight guard for the submit action.
    pub fn begin(&mut self, input: &UserInput) -> Result<Ticket, SessionError> {
        if self.is_generating() {
            return Err(SessionError::AlreadyGenerating);
        }
        if input.topic.trim().is_empty() {
            return Err(SessionError::TopicRequired);
        }
        self.generation += 1;
        self.state = GenerationState::Generating;
        Ok(Ticket {
            id: self.generation,
            level: self.level,
        })
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.is_generating() && ticket.id == self.generation
    }

    /// Record the outcome of the enhancement chain
    pub fn complete(&mut self, ticket: Ticket, enhancement: Enhancement) {
        if !self.is_current(ticket) {
            return;
        }
        let degraded = enhancement.is_degraded();
        let generated = GeneratedPrompt {
            prompt: enhancement.text,
            level: ticket.level,
        };
        self.state = if degraded {
            GenerationState::Degraded {
                generated,
                advisory: ADVISORY_UNAVAILABLE.to_string(),
            }
        } else {
            GenerationState::Success(generated)
        };
    }

    /// Record that generation itself failed
    pub fn fail(&mut self, ticket: Ticket, message: impl Into<String>) {
        if !self.is_current(ticket) {
            return;
        }
        self.state = GenerationState::Failed {
            message: message.into(),
        };
    }

    /// Latest generated prompt, if any
    pub fn generated(&self) -> Option<&GeneratedPrompt> {
        match &self.state {
            GenerationState::Success(generated) => Some(generated),
            GenerationState::Degraded { generated, .. } => Some(generated),
            _ => None,
        }
    }

    /// User-visible advisory for the current state
    pub fn advisory(&self) -> Option<&str> {
        match &self.state {
            GenerationState::Degraded { advisory, .. } => Some(advisory.as_str()),
            GenerationState::Failed { .. } => Some(ADVISORY_FAILED),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            level: self.level,
            status: self.state.name(),
            generated: self.generated().cloned(),
            advisory: self.advisory().map(str::to_string),
        }
    }
}

/// Serializable view of the session for the Web UI
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub level: Level,
    pub status: &'static str,
    pub generated: Option<GeneratedPrompt>,
    pub advisory: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enhancer::EnhancementSource;

    fn remote(text: &str) -> Enhancement {
        Enhancement {
            text: text.to_string(),
            source: EnhancementSource::Primary,
        }
    }

    #[test]
    fn test_stale_ticket_ignored_after_level_change() {
        let mut session = FormSession::new();
        let ticket = session.begin(&UserInput::new("topic")).unwrap();
        session.select_level(Level::Expert);
        session.complete(ticket, remote("late"));
        assert_eq!(session.state(), &GenerationState::Idle);
    }

    #[test]
    fn test_stale_ticket_does_not_finish_newer_generation() {
        let mut session = FormSession::new();
        let first = session.begin(&UserInput::new("topic")).unwrap();
        session.select_level(Level::Advanced);
        let second = session.begin(&UserInput::new("topic")).unwrap();

        session.complete(first, remote("stale"));
        assert!(session.is_generating());

        session.complete(second, remote("fresh"));
        assert_eq!(session.generated().unwrap().prompt, "fresh");
        assert_eq!(session.generated().unwrap().level, Level::Advanced);
    }

    #[test]
    fn test_fail_sets_advisory() {
        let mut session = FormSession::new();
        let ticket = session.begin(&UserInput::new("topic")).unwrap();
        session.fail(ticket, "join error");
        assert_eq!(session.state().name(), "failed");
        assert_eq!(session.advisory(), Some(ADVISORY_FAILED));
        assert!(session.generated().is_none());
    }
}
