//! Business domain aggregates. Pure data and aggregate logic, no actor
//! infrastructure; the `*_actor` modules wire these into the framework.

pub mod book;
pub mod cart;
pub mod order;
pub mod user;

pub use book::*;
pub use cart::*;
pub use order::*;
pub use user::*;
