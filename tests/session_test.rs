//! Tests for the form session state machine

use promptcraft::enhancer::templates::{ADVISORY_FAILED, ADVISORY_UNAVAILABLE};
use promptcraft::enhancer::{local_fallback, Enhancement, EnhancementSource};
use promptcraft::{FormSession, GenerationState, Level, SessionError, UserInput};

fn enhancement(text: &str, source: EnhancementSource) -> Enhancement {
    Enhancement {
        text: text.to_string(),
        source,
    }
}

#[test]
fn test_new_session_is_idle_basic() {
    let session = FormSession::new();
    assert_eq!(session.level(), Level::Basic);
    assert_eq!(session.state(), &GenerationState::Idle);
    assert!(session.generated().is_none());
    assert!(session.advisory().is_none());
}

#[test]
fn test_begin_requires_topic() {
    let mut session = FormSession::new();
    for topic in ["", "   ", "\n\t"] {
        assert_eq!(
            session.begin(&UserInput::new(topic)),
            Err(SessionError::TopicRequired)
        );
    }
    assert_eq!(session.state(), &GenerationState::Idle);
}

#[test]
fn test_begin_guards_in_flight_generation() {
    let mut session = FormSession::new();
    session.begin(&UserInput::new("first")).unwrap();
    assert!(session.is_generating());
    assert_eq!(
        session.begin(&UserInput::new("second")),
        Err(SessionError::AlreadyGenerating)
    );
}

#[test]
fn test_remote_enhancement_succeeds() {
    let mut session = FormSession::new();
    session.select_level(Level::Intermediate);
    let ticket = session.begin(&UserInput::new("climate policy")).unwrap();
    assert_eq!(ticket.level, Level::Intermediate);

    session.complete(ticket, enhancement("Better", EnhancementSource::Secondary));

    assert_eq!(session.state().name(), "success");
    let generated = session.generated().unwrap();
    assert_eq!(generated.prompt, "Better");
    assert_eq!(generated.level, Level::Intermediate);
    assert!(session.advisory().is_none());
}

#[test]
fn test_local_fallback_is_degraded_with_advisory() {
    let mut session = FormSession::new();
    let ticket = session.begin(&UserInput::new("topic")).unwrap();
    let text = local_fallback("topic");

    session.complete(ticket, enhancement(&text, EnhancementSource::LocalFallback));

    assert_eq!(session.state().name(), "degraded");
    assert_eq!(session.generated().unwrap().prompt, text);
    assert_eq!(session.advisory(), Some(ADVISORY_UNAVAILABLE));
}

#[test]
fn test_failure_state() {
    let mut session = FormSession::new();
    let ticket = session.begin(&UserInput::new("topic")).unwrap();
    session.fail(ticket, "task panicked");

    assert_eq!(
        session.state(),
        &GenerationState::Failed {
            message: "task panicked".to_string()
        }
    );
    assert_eq!(session.advisory(), Some(ADVISORY_FAILED));

    // a new attempt is allowed after a failure
    assert!(session.begin(&UserInput::new("topic")).is_ok());
}

#[test]
fn test_select_level_clears_result() {
    let mut session = FormSession::new();
    let ticket = session.begin(&UserInput::new("topic")).unwrap();
    session.complete(ticket, enhancement("done", EnhancementSource::Primary));
    assert!(session.generated().is_some());

    session.select_level(Level::Expert);
    assert_eq!(session.level(), Level::Expert);
    assert_eq!(session.state(), &GenerationState::Idle);
    assert!(session.generated().is_none());
}

#[test]
fn test_select_level_discards_in_flight_result() {
    let mut session = FormSession::new();
    let ticket = session.begin(&UserInput::new("topic")).unwrap();
    session.select_level(Level::Advanced);
    assert!(!session.is_generating());

    session.complete(ticket, enhancement("late", EnhancementSource::Primary));
    assert_eq!(session.state(), &GenerationState::Idle);

    session.fail(ticket, "late failure");
    assert_eq!(session.state(), &GenerationState::Idle);
}

#[test]
fn test_snapshot_serializes_for_web_ui() {
    let mut session = FormSession::new();
    session.select_level(Level::Expert);
    let ticket = session.begin(&UserInput::new("topic")).unwrap();
    session.complete(ticket, enhancement("fallback", EnhancementSource::LocalFallback));

    let json = serde_json::to_value(session.snapshot()).unwrap();
    assert_eq!(json["level"], "expert");
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["generated"]["prompt"], "fallback");
    assert_eq!(json["generated"]["level"], "expert");
    assert_eq!(json["advisory"], ADVISORY_UNAVAILABLE);
}
