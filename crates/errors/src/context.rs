//! Build context construction errors

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ContextError {
    #[error("module root could not be determined: {message}")]
    ModuleRoot { message: String },

    #[error("invalid target platform: {value}")]
    InvalidPlatform { value: String },
}

impl UserFacingError for ContextError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::ModuleRoot { .. } => Some("Pass the module directory with --module-root."),
            Self::InvalidPlatform { .. } => {
                Some("Use a platform identifier such as `win64`, `linux` or `mac`.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Self::ModuleRoot { .. } => Some("context.module_root"),
            Self::InvalidPlatform { .. } => Some("context.invalid_platform"),
        }
    }
}
