use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum LeadError {
    #[error("Lead not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid lead: {0}")]
    Validation(String),

    #[error("Unknown status: {0} (expected one of new, contacted, qualified, proposal, closed, lost)")]
    InvalidStatus(String),

    #[error("Unknown priority: {0} (expected one of high, medium, low)")]
    InvalidPriority(String),

    #[error("{0}")]
    Selector(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LeadError>;
