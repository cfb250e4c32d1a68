//! CLI error handling

use std::fmt;

use modlink_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Configuration, context or resolution error
    Modlink(modlink_errors::Error),
    /// Output could not be written
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Modlink(e) => {
                let message = e.user_message();
                write!(f, "{message}")?;
                if let Some(code) = e.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                if e.is_retryable() {
                    write!(f, "\n  Retry: safe to retry this operation.")?;
                }
                Ok(())
            }
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Modlink(e) => Some(e),
            CliError::Io(e) => Some(e),
        }
    }
}

impl From<modlink_errors::Error> for CliError {
    fn from(e: modlink_errors::Error) -> Self {
        CliError::Modlink(e)
    }
}

impl From<modlink_errors::ContextError> for CliError {
    fn from(e: modlink_errors::ContextError) -> Self {
        CliError::Modlink(e.into())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
