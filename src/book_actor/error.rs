use thiserror::Error;

use crate::actor_framework::FrameworkError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BookError {
    #[error("book not found: {0}")]
    NotFound(String),
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },
    #[error("invalid quantity: {0}")]
    InvalidQuantity(u32),
    #[error("invalid rating {0}, must be 1-5")]
    InvalidRating(u8),
    #[error("book is no longer available: {0}")]
    Inactive(String),
    #[error(transparent)]
    Framework(#[from] FrameworkError),
}

impl BookError {
    /// Framework-level NotFound carries only the id; normalize it to the
    /// domain variant so callers match one shape.
    pub fn normalize(self) -> Self {
        match self {
            BookError::Framework(FrameworkError::NotFound(id)) => BookError::NotFound(id),
            other => other,
        }
    }
}
