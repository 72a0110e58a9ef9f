//! User actor wiring.

mod dtos;
pub mod entity;
pub mod error;

pub use dtos::*;
pub use error::*;
