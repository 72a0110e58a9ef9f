use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::book_actor::BookError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("item not in cart: {book_id}")]
    ItemNotFound { book_id: String },
    #[error("invalid quantity: {0}")]
    InvalidQuantity(u32),
    #[error(transparent)]
    Book(#[from] BookError),
    #[error(transparent)]
    Framework(#[from] FrameworkError),
}
