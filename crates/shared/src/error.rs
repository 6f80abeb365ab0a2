use thiserror::Error;

use crate::domain::{Phase, Vocabulary};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FakeTouchError {
    #[error("no gesture registered under name '{name}'")]
    InvalidGesture { name: String },
    #[error("per-contact delta count {actual} does not match contact count {expected}")]
    MalformedDelta { expected: usize, actual: usize },
    #[error("{operation} is not allowed while the surface is {state}")]
    PhaseViolation {
        operation: Phase,
        state: &'static str,
    },
    #[error("cannot switch vocabulary to {requested} during an active interaction")]
    VocabularyLocked { requested: Vocabulary },
    #[error("unknown event vocabulary '{0}'")]
    UnknownVocabulary(String),
    #[error("unknown pointer type '{0}'")]
    UnknownPointerType(String),
}

impl FakeTouchError {
    pub fn invalid_gesture(name: impl Into<String>) -> Self {
        Self::InvalidGesture { name: name.into() }
    }
}
