//! Typed clients over the resource actors. These play the controller role:
//! request validation, live-stock checks, ownership checks, and the
//! cross-aggregate checkout orchestration all live here.

pub mod macros;

mod book_client;
mod cart_client;
mod order_client;
mod user_client;

pub use book_client::BookClient;
pub use cart_client::CartClient;
pub use order_client::OrderClient;
pub use user_client::UserClient;
