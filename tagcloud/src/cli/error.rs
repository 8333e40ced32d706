// tagcloud/src/cli/error.rs
use crate::application::error::ApplicationError;
use crate::domain::error::DomainError;
use crate::exitcode;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            CliError::CommandFailed(msg) => {
                CliError::CommandFailed(format!("{}: {}", context.into(), msg))
            }
            CliError::InvalidInput(msg) => {
                CliError::InvalidInput(format!("{}: {}", context.into(), msg))
            }
            CliError::Application(err) => CliError::Application(err.context(context)),
            CliError::Other(msg) => CliError::Other(format!("{}: {}", context.into(), msg)),
            err => CliError::Other(format!("{}: {}", context.into(), err)),
        }
    }

    /// Bad tag data maps to DATAERR, everything else to USAGE
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Application(ApplicationError::LinkResolution { .. })
            | CliError::Application(ApplicationError::Domain(
                DomainError::InvalidTag(_)
                | DomainError::SerializationError(_)
                | DomainError::LinkResolution(_),
            )) => exitcode::DATAERR,
            _ => exitcode::USAGE,
        }
    }
}

// Direct conversion from DomainError to CliError (via ApplicationError)
impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        CliError::Application(ApplicationError::Domain(err))
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_link_failure_when_exit_code_then_dataerr() {
        let err = CliError::from(ApplicationError::LinkResolution {
            tag: "1".to_string(),
            reason: "gone".to_string(),
        });
        assert_eq!(err.exit_code(), exitcode::DATAERR);

        let err = CliError::from(DomainError::SerializationError("bad".to_string()));
        assert_eq!(err.exit_code(), exitcode::DATAERR);
    }

    #[test]
    fn given_other_errors_when_exit_code_then_usage() {
        assert_eq!(
            CliError::InvalidInput("x".to_string()).exit_code(),
            exitcode::USAGE
        );
        assert_eq!(
            CliError::from(DomainError::RepositoryError("x".to_string())).exit_code(),
            exitcode::USAGE
        );
    }

    #[test]
    fn given_context_when_applied_then_prefixes_message() {
        let err = CliError::InvalidInput("bad id".to_string()).context("--include");
        assert_eq!(err.to_string(), "Invalid input: --include: bad id");
    }
}
