use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::instrument;

use crate::book_actor::BookError;
use crate::cart_actor::CartError;
use crate::clients::{BookClient, CartClient};
use crate::domain::Cart;

/// The cart contract, independent of where the cart lives.
///
/// The server-side [`CartClient`] and the in-process [`GuestCart`] (the
/// stand-in for the frontend's localStorage cart) both implement it, so a
/// guest session can be swapped for a logged-in one without touching callers.
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn get(&self, user_id: &str) -> Result<Cart, CartError>;
    async fn add_item(&self, user_id: &str, book_id: &str, quantity: u32)
        -> Result<Cart, CartError>;
    async fn update_item(
        &self,
        user_id: &str,
        book_id: &str,
        quantity: u32,
    ) -> Result<Cart, CartError>;
    async fn remove_item(&self, user_id: &str, book_id: &str) -> Result<Cart, CartError>;
    async fn clear(&self, user_id: &str) -> Result<Cart, CartError>;
}

#[async_trait]
impl CartStore for CartClient {
    async fn get(&self, user_id: &str) -> Result<Cart, CartError> {
        self.get_cart(user_id).await
    }

    async fn add_item(
        &self,
        user_id: &str,
        book_id: &str,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        CartClient::add_item(self, user_id, book_id, quantity).await
    }

    async fn update_item(
        &self,
        user_id: &str,
        book_id: &str,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        CartClient::update_item(self, user_id, book_id, quantity).await
    }

    async fn remove_item(&self, user_id: &str, book_id: &str) -> Result<Cart, CartError> {
        CartClient::remove_item(self, user_id, book_id).await
    }

    async fn clear(&self, user_id: &str) -> Result<Cart, CartError> {
        self.clear_cart(user_id).await
    }
}

/// Guest carts, keyed by session id and held in process. Prices still come
/// from the live catalog, and the same quantity/stock rules apply as on the
/// server side.
#[derive(Clone)]
pub struct GuestCart {
    carts: Arc<Mutex<HashMap<String, Cart>>>,
    books: BookClient,
}

impl GuestCart {
    pub fn new(books: BookClient) -> Self {
        Self { carts: Arc::new(Mutex::new(HashMap::new())), books }
    }

    /// Replay every line of a guest cart into another store (typically the
    /// server cart after login), then clear the guest cart.
    #[instrument(skip(self, target))]
    pub async fn merge_into(
        &self,
        session_id: &str,
        user_id: &str,
        target: &dyn CartStore,
    ) -> Result<Cart, CartError> {
        let guest = self.get(session_id).await?;
        for item in &guest.items {
            target.add_item(user_id, &item.book_id, item.quantity).await?;
        }
        self.clear(session_id).await?;
        target.get(user_id).await
    }
}

#[async_trait]
impl CartStore for GuestCart {
    async fn get(&self, session_id: &str) -> Result<Cart, CartError> {
        let mut carts = self.carts.lock().await;
        Ok(carts
            .entry(session_id.to_string())
            .or_insert_with(|| Cart::new(session_id))
            .clone())
    }

    async fn add_item(
        &self,
        session_id: &str,
        book_id: &str,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        if quantity < 1 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        let book = self
            .books
            .get_book(book_id.to_string())
            .await?
            .ok_or_else(|| BookError::NotFound(book_id.to_string()))?;
        if !book.is_active {
            return Err(BookError::Inactive(book_id.to_string()).into());
        }

        let mut carts = self.carts.lock().await;
        let cart = carts
            .entry(session_id.to_string())
            .or_insert_with(|| Cart::new(session_id));

        let already_in_cart = cart.find_item(book_id).map_or(0, |item| item.quantity);
        let requested = already_in_cart + quantity;
        if requested > book.stock.quantity {
            return Err(BookError::InsufficientStock {
                requested,
                available: book.stock.quantity,
            }
            .into());
        }
        cart.add_item(book_id, quantity, book.price.selling);
        Ok(cart.clone())
    }

    async fn update_item(
        &self,
        session_id: &str,
        book_id: &str,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        if quantity < 1 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        let book = self
            .books
            .get_book(book_id.to_string())
            .await?
            .ok_or_else(|| BookError::NotFound(book_id.to_string()))?;
        if !book.is_active {
            return Err(BookError::Inactive(book_id.to_string()).into());
        }
        if quantity > book.stock.quantity {
            return Err(BookError::InsufficientStock {
                requested: quantity,
                available: book.stock.quantity,
            }
            .into());
        }

        let mut carts = self.carts.lock().await;
        let cart = carts
            .entry(session_id.to_string())
            .or_insert_with(|| Cart::new(session_id));
        cart.update_item_quantity(book_id, quantity, book.price.selling)?;
        Ok(cart.clone())
    }

    async fn remove_item(&self, session_id: &str, book_id: &str) -> Result<Cart, CartError> {
        let mut carts = self.carts.lock().await;
        let cart = carts
            .entry(session_id.to_string())
            .or_insert_with(|| Cart::new(session_id));
        cart.remove_item(book_id)?;
        Ok(cart.clone())
    }

    async fn clear(&self, session_id: &str) -> Result<Cart, CartError> {
        let mut carts = self.carts.lock().await;
        let cart = carts
            .entry(session_id.to_string())
            .or_insert_with(|| Cart::new(session_id));
        cart.clear();
        Ok(cart.clone())
    }
}
