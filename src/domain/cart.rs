use chrono::{DateTime, Utc};

use crate::cart_actor::CartError;

/// Orders of at least this amount ship free.
pub const FREE_DELIVERY_THRESHOLD: f64 = 499.0;
pub const DELIVERY_CHARGE: f64 = 40.0;

/// One line of a cart: book reference, quantity, and the selling price as it
/// was when the line was added.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub book_id: String,
    pub quantity: u32,
    pub price: f64,
    pub added_at: DateTime<Utc>,
}

/// The mutable pre-purchase collection of line items for one user.
///
/// The totals fields are derived: every mutator ends with [`recalculate`],
/// and nothing else writes them. Stock limits are not enforced here; the
/// `CartClient` re-checks live stock before sending mutations.
///
/// [`recalculate`]: Cart::recalculate
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub user_id: String,
    pub items: Vec<CartItem>,
    pub total_items: u32,
    pub total_amount: f64,
    pub delivery_charges: f64,
    pub final_amount: f64,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn new(user_id: impl Into<String>) -> Self {
        let mut cart = Self {
            user_id: user_id.into(),
            items: Vec::new(),
            total_items: 0,
            total_amount: 0.0,
            delivery_charges: 0.0,
            final_amount: 0.0,
            updated_at: Utc::now(),
        };
        cart.recalculate();
        cart
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find_item(&self, book_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.book_id == book_id)
    }

    /// Merge into an existing line by incrementing its quantity (the original
    /// price snapshot is kept), or append a new line at `unit_price`.
    pub fn add_item(&mut self, book_id: impl Into<String>, quantity: u32, unit_price: f64) {
        let book_id = book_id.into();
        match self.items.iter_mut().find(|item| item.book_id == book_id) {
            Some(item) => item.quantity += quantity,
            None => self.items.push(CartItem {
                book_id,
                quantity,
                price: unit_price,
                added_at: Utc::now(),
            }),
        }
        self.recalculate();
    }

    /// Set a line's quantity, refreshing its price snapshot. Quantity 0 means
    /// "remove the line".
    pub fn update_item_quantity(
        &mut self,
        book_id: &str,
        quantity: u32,
        unit_price: f64,
    ) -> Result<(), CartError> {
        let Some(item) = self.items.iter_mut().find(|item| item.book_id == book_id) else {
            return Err(CartError::ItemNotFound { book_id: book_id.to_string() });
        };
        if quantity == 0 {
            self.items.retain(|item| item.book_id != book_id);
        } else {
            item.quantity = quantity;
            item.price = unit_price;
        }
        self.recalculate();
        Ok(())
    }

    pub fn remove_item(&mut self, book_id: &str) -> Result<(), CartError> {
        let before = self.items.len();
        self.items.retain(|item| item.book_id != book_id);
        if self.items.len() == before {
            return Err(CartError::ItemNotFound { book_id: book_id.to_string() });
        }
        self.recalculate();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.recalculate();
    }

    /// Full recompute of the derived totals from `items`. No incremental
    /// accounting.
    fn recalculate(&mut self) {
        self.total_items = self.items.iter().map(|item| item.quantity).sum();
        self.total_amount = self
            .items
            .iter()
            .map(|item| item.price * f64::from(item.quantity))
            .sum();
        self.delivery_charges = if self.total_amount >= FREE_DELIVERY_THRESHOLD {
            0.0
        } else {
            DELIVERY_CHARGE
        };
        self.final_amount = self.total_amount + self.delivery_charges;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals_hold(cart: &Cart) {
        let expected: f64 = cart
            .items
            .iter()
            .map(|item| item.price * f64::from(item.quantity))
            .sum();
        assert_eq!(cart.total_amount, expected);
        let delivery = if cart.total_amount >= FREE_DELIVERY_THRESHOLD {
            0.0
        } else {
            DELIVERY_CHARGE
        };
        assert_eq!(cart.delivery_charges, delivery);
        assert_eq!(cart.final_amount, cart.total_amount + delivery);
    }

    #[test]
    fn new_cart_is_empty_with_derived_totals() {
        let cart = Cart::new("user_1");
        assert!(cart.is_empty());
        assert_eq!(cart.total_items, 0);
        assert_eq!(cart.total_amount, 0.0);
        // The delivery formula applies even to an empty cart.
        assert_eq!(cart.final_amount, DELIVERY_CHARGE);
    }

    #[test]
    fn totals_recomputed_after_every_mutation() {
        let mut cart = Cart::new("user_1");
        cart.add_item("book_1", 2, 150.0);
        totals_hold(&cart);
        cart.add_item("book_2", 1, 100.0);
        totals_hold(&cart);
        cart.update_item_quantity("book_1", 3, 140.0).unwrap();
        totals_hold(&cart);
        cart.remove_item("book_2").unwrap();
        totals_hold(&cart);
        cart.clear();
        totals_hold(&cart);
    }

    #[test]
    fn adding_same_book_twice_merges_the_line() {
        let mut cart = Cart::new("user_1");
        cart.add_item("book_1", 1, 200.0);
        // Price changed in the catalog in between; the merge keeps the
        // original snapshot.
        cart.add_item("book_1", 2, 180.0);

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 3);
        assert_eq!(cart.items[0].price, 200.0);
        assert_eq!(cart.total_amount, 600.0);
    }

    #[test]
    fn update_refreshes_price_snapshot() {
        let mut cart = Cart::new("user_1");
        cart.add_item("book_1", 1, 200.0);
        cart.update_item_quantity("book_1", 2, 180.0).unwrap();
        assert_eq!(cart.items[0].price, 180.0);
        assert_eq!(cart.total_amount, 360.0);
    }

    #[test]
    fn update_to_zero_removes_the_line() {
        let mut cart = Cart::new("user_1");
        cart.add_item("book_1", 2, 100.0);
        cart.update_item_quantity("book_1", 0, 100.0).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.final_amount, DELIVERY_CHARGE);
    }

    #[test]
    fn update_or_remove_missing_line_fails() {
        let mut cart = Cart::new("user_1");
        assert_eq!(
            cart.update_item_quantity("book_9", 1, 10.0).unwrap_err(),
            CartError::ItemNotFound { book_id: "book_9".into() }
        );
        assert_eq!(
            cart.remove_item("book_9").unwrap_err(),
            CartError::ItemNotFound { book_id: "book_9".into() }
        );
    }

    #[test]
    fn delivery_is_free_at_the_threshold() {
        let mut cart = Cart::new("user_1");
        cart.add_item("book_1", 1, 498.0);
        assert_eq!(cart.delivery_charges, DELIVERY_CHARGE);
        assert_eq!(cart.final_amount, 538.0);

        cart.update_item_quantity("book_1", 1, 499.0).unwrap();
        assert_eq!(cart.delivery_charges, 0.0);
        assert_eq!(cart.final_amount, 499.0);
    }
}
