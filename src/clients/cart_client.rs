use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::book_actor::BookError;
use crate::cart_actor::{CartAction, CartCreate, CartError};
use crate::clients::BookClient;
use crate::domain::{Book, Cart};

/// Client for the cart actor.
///
/// This is where the controller-level stock checks live: the cart aggregate
/// itself accepts any quantity, and this client re-checks the book's live
/// stock before every add/update. It also enforces the route-level rule that
/// quantities below 1 are rejected (the aggregate's "0 removes the line"
/// policy stays reachable only through the action enum directly).
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
    books: BookClient,
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>, books: BookClient) -> Self {
        Self { inner, books }
    }

    /// Carts are created lazily: reading a missing cart materializes an empty
    /// one owned by the user.
    #[instrument(skip(self))]
    pub async fn get_cart(&self, user_id: &str) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.inner.ensure(user_id.to_string(), CartCreate).await
    }

    async fn sellable_book(&self, book_id: &str) -> Result<Book, CartError> {
        let book = self
            .books
            .get_book(book_id.to_string())
            .await?
            .ok_or_else(|| BookError::NotFound(book_id.to_string()))?;
        if !book.is_active {
            return Err(BookError::Inactive(book_id.to_string()).into());
        }
        Ok(book)
    }

    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        user_id: &str,
        book_id: &str,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        if quantity < 1 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        let book = self.sellable_book(book_id).await?;
        let cart = self.get_cart(user_id).await?;

        // The line this add would produce must fit within live stock.
        let already_in_cart = cart.find_item(book_id).map_or(0, |item| item.quantity);
        let requested = already_in_cart + quantity;
        if requested > book.stock.quantity {
            return Err(BookError::InsufficientStock {
                requested,
                available: book.stock.quantity,
            }
            .into());
        }

        self.inner
            .perform_action(
                user_id.to_string(),
                CartAction::AddItem {
                    book_id: book_id.to_string(),
                    quantity,
                    unit_price: book.price.selling,
                },
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        user_id: &str,
        book_id: &str,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        if quantity < 1 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        let book = self.sellable_book(book_id).await?;
        if quantity > book.stock.quantity {
            return Err(BookError::InsufficientStock {
                requested: quantity,
                available: book.stock.quantity,
            }
            .into());
        }
        self.get_cart(user_id).await?;

        self.inner
            .perform_action(
                user_id.to_string(),
                CartAction::UpdateItemQuantity {
                    book_id: book_id.to_string(),
                    quantity,
                    unit_price: book.price.selling,
                },
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, user_id: &str, book_id: &str) -> Result<Cart, CartError> {
        self.get_cart(user_id).await?;
        self.inner
            .perform_action(
                user_id.to_string(),
                CartAction::RemoveItem { book_id: book_id.to_string() },
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn clear_cart(&self, user_id: &str) -> Result<Cart, CartError> {
        self.get_cart(user_id).await?;
        self.inner
            .perform_action(user_id.to_string(), CartAction::Clear)
            .await
    }
}
