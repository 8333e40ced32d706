// tagcloud/src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid tag: {0}")]
    InvalidTag(String),

    #[error("Cannot resolve link: {0}")]
    LinkResolution(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl DomainError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            DomainError::InvalidTag(msg) => {
                DomainError::InvalidTag(format!("{}: {}", context.into(), msg))
            }
            DomainError::LinkResolution(msg) => {
                DomainError::LinkResolution(format!("{}: {}", context.into(), msg))
            }
            DomainError::RepositoryError(msg) => {
                DomainError::RepositoryError(format!("{}: {}", context.into(), msg))
            }
            DomainError::SerializationError(msg) => {
                DomainError::SerializationError(format!("{}: {}", context.into(), msg))
            }
            DomainError::Other(msg) => DomainError::Other(format!("{}: {}", context.into(), msg)),
            err => DomainError::Other(format!("{}: {}", context.into(), err)),
        }
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::SerializationError(e.to_string())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
