//! Error types surfaced by typed blackboard access.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BlackboardError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlackboardError {
    #[error("blackboard key `{key}` is not set")]
    Missing { key: String },

    #[error("blackboard key `{key}` does not hold a value of type {expected}")]
    TypeMismatch { key: String, expected: &'static str },
}
