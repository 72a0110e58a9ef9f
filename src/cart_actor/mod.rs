//! Cart actor wiring. Carts are keyed by their owning user id and created
//! lazily via the framework's `ensure`.

mod actions;
mod dtos;
pub mod entity;
pub mod error;

pub use actions::*;
pub use dtos::*;
pub use error::*;
