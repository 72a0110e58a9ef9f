use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::book_actor::BookError;
use crate::cart_actor::CartError;
use crate::domain::OrderStatus;
use crate::user_actor::UserError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("order not found: {0}")]
    NotFound(String),
    #[error("order {order_id} does not belong to user {user_id}")]
    Forbidden { order_id: String, user_id: String },
    #[error("cart is empty")]
    EmptyCart,
    #[error("invalid user: {0}")]
    InvalidUser(String),
    #[error("insufficient stock for {book_id}: requested {requested}, available {available}")]
    InsufficientStock {
        book_id: String,
        requested: u32,
        available: u32,
    },
    #[error("cannot move order from {from} to {to}")]
    InvalidStateTransition { from: OrderStatus, to: OrderStatus },
    #[error("return window of {days} days has expired")]
    ReturnWindowExpired { days: i64 },
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error(transparent)]
    Book(#[from] BookError),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Framework(#[from] FrameworkError),
}
