//! System orchestration, startup, and shutdown logic.

pub mod store_system;
pub mod tracing;

pub use self::store_system::*;
pub use self::tracing::*;
