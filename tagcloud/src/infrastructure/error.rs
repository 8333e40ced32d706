// tagcloud/src/infrastructure/error.rs
use crate::domain::error::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("File system error: {0}")]
    FileSystem(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Serialization(msg) => DomainError::SerializationError(msg),
            InfrastructureError::FileSystem(msg) => DomainError::RepositoryError(msg),
            InfrastructureError::InvalidUrl(msg) => DomainError::LinkResolution(msg),
            InfrastructureError::Repository(msg) => DomainError::RepositoryError(msg),
        }
    }
}

impl From<url::ParseError> for InfrastructureError {
    fn from(error: url::ParseError) -> Self {
        InfrastructureError::InvalidUrl(error.to_string())
    }
}
