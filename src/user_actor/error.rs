use thiserror::Error;

use crate::actor_framework::FrameworkError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("user validation error: {0}")]
    ValidationError(String),
    #[error(transparent)]
    Framework(#[from] FrameworkError),
}
