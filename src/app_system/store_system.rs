use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tracing::{error, info};

use crate::actor_framework::ResourceActor;
use crate::clients::{BookClient, CartClient, OrderClient, UserClient};
use crate::domain::{Book, Cart, Order, User};

const ACTOR_BUFFER: usize = 32;

fn sequential_ids(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    let seq = Arc::new(AtomicU64::new(1));
    move || format!("{}_{}", prefix, seq.fetch_add(1, Ordering::SeqCst))
}

/// Order ids carry the placement timestamp plus a random suffix, so they are
/// recognizable in support conversations without a lookup.
fn order_id() -> String {
    let suffix: u16 = rand::thread_rng().gen_range(0..10_000);
    format!("ORD-{}-{:04}", Utc::now().timestamp_millis(), suffix)
}

/// The main application system that wires all storefront actors together.
///
/// Responsible for starting the actors, injecting clients into one another,
/// and handling shutdown.
pub struct StoreSystem {
    pub user_client: UserClient,
    pub book_client: BookClient,
    pub cart_client: CartClient,
    pub order_client: OrderClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StoreSystem {
    pub fn new() -> Self {
        // 1. User service
        let (user_actor, user_resource_client) =
            ResourceActor::<User>::new(ACTOR_BUFFER, sequential_ids("user"));
        let user_client = UserClient::new(user_resource_client);
        let user_handle = tokio::spawn(user_actor.run());

        // 2. Catalog service
        let (book_actor, book_resource_client) =
            ResourceActor::<Book>::new(ACTOR_BUFFER, sequential_ids("book"));
        let book_client = BookClient::new(book_resource_client);
        let book_handle = tokio::spawn(book_actor.run());

        // 3. Cart service. Carts are keyed by user id through `ensure`; the
        // generated-id path is never taken.
        let (cart_actor, cart_resource_client) =
            ResourceActor::<Cart>::new(ACTOR_BUFFER, sequential_ids("cart"));
        let cart_client = CartClient::new(cart_resource_client, book_client.clone());
        let cart_handle = tokio::spawn(cart_actor.run());

        // 4. Order service, orchestrating the other three at checkout.
        let (order_actor, order_resource_client) =
            ResourceActor::<Order>::new(ACTOR_BUFFER, order_id);
        let order_client = OrderClient::new(
            order_resource_client,
            user_client.clone(),
            book_client.clone(),
            cart_client.clone(),
        );
        let order_handle = tokio::spawn(order_actor.run());

        Self {
            user_client,
            book_client,
            cart_client,
            order_client,
            handles: vec![user_handle, book_handle, cart_handle, order_handle],
        }
    }

    /// Drop the clients to close the channels, then wait for the actors to
    /// drain and exit.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down store system...");

        drop(self.order_client);
        drop(self.cart_client);
        drop(self.book_client);
        drop(self.user_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {e:?}"));
            }
        }

        info!("Store system shutdown complete.");
        Ok(())
    }
}

impl Default for StoreSystem {
    fn default() -> Self {
        Self::new()
    }
}
