use tracing::{debug, error, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::book_actor::BookError;
use crate::clients::{BookClient, CartClient, UserClient};
use crate::domain::{
    Book, Order, OrderItem, OrderStatus, OrderSummary, PaymentMethod, ShippingAddress,
};
use crate::order_actor::{OrderAction, OrderCreate, OrderError};

/// Client for the order actor.
///
/// Owns the order-from-cart conversion: it validates the purchaser, re-checks
/// live stock, reserves it, freezes catalog snapshots into the order, and
/// clears the cart. Stock reservation happens before the order is persisted,
/// so a failed reservation never leaves an order behind.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    users: UserClient,
    books: BookClient,
    carts: CartClient,
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        users: UserClient,
        books: BookClient,
        carts: CartClient,
    ) -> Self {
        Self { inner, users, books, carts }
    }

    #[instrument(skip(self, shipping_address))]
    pub async fn place_order(
        &self,
        user_id: &str,
        shipping_address: ShippingAddress,
        payment_method: PaymentMethod,
    ) -> Result<String, OrderError> {
        info!("Processing checkout");

        // Step 1: the purchaser must exist.
        match self.users.get_user(user_id.to_string()).await {
            Ok(Some(user)) => info!(user_name = %user.name, "User validation successful"),
            Ok(None) => {
                error!("User not found");
                return Err(OrderError::InvalidUser(user_id.to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        // Step 2: a non-empty cart.
        let cart = self.carts.get_cart(user_id).await?;
        if cart.is_empty() {
            error!("Cart is empty");
            return Err(OrderError::EmptyCart);
        }

        // Step 3: validate every line against live stock, not the cart's
        // snapshot, and keep the books for the order snapshot.
        let mut books: Vec<Book> = Vec::with_capacity(cart.items.len());
        for item in &cart.items {
            let book = self
                .books
                .get_book(item.book_id.clone())
                .await?
                .ok_or_else(|| BookError::NotFound(item.book_id.clone()))?;
            let available = if book.is_active { book.stock.quantity } else { 0 };
            if item.quantity > available {
                error!(book_id = %item.book_id, "Insufficient stock");
                return Err(OrderError::InsufficientStock {
                    book_id: item.book_id.clone(),
                    requested: item.quantity,
                    available,
                });
            }
            books.push(book);
        }

        // Step 4: reserve stock. Each reservation is a conditional decrement
        // inside the book actor, so it cannot oversell; a failure partway
        // leaves earlier reservations applied with no compensation.
        for item in &cart.items {
            self.books
                .reserve_stock(item.book_id.clone(), item.quantity)
                .await
                .map_err(|e| match e {
                    BookError::InsufficientStock { requested, available } => {
                        OrderError::InsufficientStock {
                            book_id: item.book_id.clone(),
                            requested,
                            available,
                        }
                    }
                    other => OrderError::Book(other),
                })?;
        }
        info!("Stock reserved successfully");

        // Step 5: freeze the snapshot and persist the order. Line prices are
        // copied from the live catalog at this instant; the summary keeps the
        // cart's totals.
        let items: Vec<OrderItem> = cart
            .items
            .iter()
            .zip(&books)
            .map(|(line, book)| OrderItem {
                book_id: line.book_id.clone(),
                title: book.title.clone(),
                author: book.author.clone(),
                image: book.image.clone(),
                price: book.price.selling,
                mrp: book.price.mrp,
                quantity: line.quantity,
            })
            .collect();

        let order_id = self
            .inner
            .create(OrderCreate {
                user_id: user_id.to_string(),
                items,
                summary: OrderSummary::from_cart(&cart),
                shipping_address,
                payment_method,
            })
            .await?;

        // Step 6: the cart has been converted; empty it.
        self.carts.clear_cart(user_id).await?;

        info!(order_id = %order_id, "Order placed");
        Ok(order_id)
    }

    /// Fetch an order on behalf of a user. Ownership is enforced here, not in
    /// the store.
    #[instrument(skip(self))]
    pub async fn get_order(&self, order_id: &str, user_id: &str) -> Result<Order, OrderError> {
        debug!("Sending request");
        let order = self
            .inner
            .get(order_id.to_string())
            .await?
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;
        if order.user_id != user_id {
            return Err(OrderError::Forbidden {
                order_id: order_id.to_string(),
                user_id: user_id.to_string(),
            });
        }
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn cancel_order(
        &self,
        order_id: &str,
        user_id: &str,
        reason: &str,
    ) -> Result<Order, OrderError> {
        self.get_order(order_id, user_id).await?;

        let order = self
            .inner
            .perform_action(
                order_id.to_string(),
                OrderAction::Cancel { reason: reason.to_string(), actor: user_id.to_string() },
            )
            .await?;

        self.restore_order_stock(&order).await?;
        info!(order_id = %order_id, "Order cancelled, stock restored");
        Ok(order)
    }

    /// Put a cancelled order's stock back, one book at a time. These are
    /// independent updates; a failure here propagates without undoing the
    /// cancel.
    async fn restore_order_stock(&self, order: &Order) -> Result<(), OrderError> {
        for item in &order.items {
            self.books
                .restore_stock(item.book_id.clone(), item.quantity)
                .await?;
        }
        Ok(())
    }

    #[instrument(skip(self))]
    #[allow(dead_code)]
    pub async fn return_order(
        &self,
        order_id: &str,
        user_id: &str,
        reason: &str,
    ) -> Result<Order, OrderError> {
        self.get_order(order_id, user_id).await?;
        self.inner
            .perform_action(
                order_id.to_string(),
                OrderAction::RequestReturn {
                    reason: reason.to_string(),
                    actor: user_id.to_string(),
                },
            )
            .await
    }

    /// Admin surface: march an order along the state machine. Authorization
    /// happens upstream of this crate. Stock restoration is attached to the
    /// cancellation transition itself, whichever surface drives it.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
        comment: Option<String>,
        actor: &str,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        let order = self
            .inner
            .perform_action(
                order_id.to_string(),
                OrderAction::UpdateStatus { status, comment, actor: actor.to_string() },
            )
            .await?;
        if status == OrderStatus::Cancelled {
            self.restore_order_stock(&order).await?;
            info!(order_id = %order_id, "Order cancelled, stock restored");
        }
        Ok(order)
    }

    /// Admin surface: attach courier details.
    #[instrument(skip(self))]
    pub async fn set_tracking(
        &self,
        order_id: &str,
        courier: &str,
        tracking_number: &str,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(
                order_id.to_string(),
                OrderAction::SetTracking {
                    courier: courier.to_string(),
                    tracking_number: tracking_number.to_string(),
                },
            )
            .await
    }
}
