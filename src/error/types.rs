use thiserror::Error;

/// Unified result type for the layout crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors surfaced by the layout engine.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("container stack is full ({depth} levels), container dropped")]
    StackOverflow { depth: usize },
    #[error("plan holds at most {capacity} tokens, {requested} requested")]
    PlanCapacity { requested: usize, capacity: usize },
    #[error("invalid layout config: {0}")]
    InvalidConfig(String),
    #[error("config serialization error: {0}")]
    Config(#[from] serde_json::Error),
}
