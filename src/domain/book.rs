use chrono::{DateTime, Utc};

use crate::book_actor::BookError;

/// MRP plus the actual selling price. Every catalog item carries this record,
/// whatever its category, so cart and order logic never sees a bare number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price {
    pub mrp: f64,
    pub selling: f64,
}

impl Price {
    pub fn new(mrp: f64, selling: f64) -> Self {
        Self { mrp, selling }
    }

    /// Discount is derived, never stored.
    pub fn discount_percent(&self) -> f64 {
        if self.mrp <= 0.0 {
            return 0.0;
        }
        ((self.mrp - self.selling) / self.mrp * 100.0).round()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

/// Stock level with a derived status. The status is recomputed by every
/// mutation path; callers never set it.
#[derive(Debug, Clone, PartialEq)]
pub struct Stock {
    pub quantity: u32,
    pub threshold: u32,
    pub status: StockStatus,
}

impl Stock {
    pub fn new(quantity: u32, threshold: u32) -> Self {
        let mut stock = Self { quantity, threshold, status: StockStatus::InStock };
        stock.recompute_status();
        stock
    }

    fn recompute_status(&mut self) {
        self.status = if self.quantity == 0 {
            StockStatus::OutOfStock
        } else if self.quantity <= self.threshold {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        };
    }

    fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.recompute_status();
    }
}

/// What kind of catalog item this is. Book World also sells stationery and
/// school supplies; they all share the same price/stock shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Book,
    Stationery,
    SchoolSupply,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub user_id: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating {
    pub average: f64,
    pub count: u32,
}

/// A catalog item. Soft-deleted via `is_active`, never removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub category: Category,
    pub image: String,
    pub price: Price,
    pub stock: Stock,
    pub rating: Rating,
    pub reviews: Vec<Review>,
    pub sales_count: u32,
    pub is_active: bool,
}

impl Book {
    /// Conditional stock decrement. Checks and decrements in one step so the
    /// owning actor can treat it as atomic; the quantity never goes below
    /// zero.
    pub fn reserve_stock(&mut self, quantity: u32) -> Result<(), BookError> {
        if quantity == 0 {
            return Err(BookError::InvalidQuantity(quantity));
        }
        if !self.is_active {
            return Err(BookError::Inactive(self.id.clone()));
        }
        if quantity > self.stock.quantity {
            return Err(BookError::InsufficientStock {
                requested: quantity,
                available: self.stock.quantity,
            });
        }
        self.stock.set_quantity(self.stock.quantity - quantity);
        self.sales_count += quantity;
        Ok(())
    }

    /// Puts cancelled quantities back. Sales count saturates at zero rather
    /// than erroring, matching restore being best-effort.
    pub fn restore_stock(&mut self, quantity: u32) {
        self.stock.set_quantity(self.stock.quantity + quantity);
        self.sales_count = self.sales_count.saturating_sub(quantity);
    }

    pub fn set_stock(&mut self, quantity: u32) {
        self.stock.set_quantity(quantity);
    }

    pub fn add_review(
        &mut self,
        user_id: impl Into<String>,
        rating: u8,
        comment: impl Into<String>,
    ) -> Result<Rating, BookError> {
        if !(1..=5).contains(&rating) {
            return Err(BookError::InvalidRating(rating));
        }
        self.reviews.push(Review {
            user_id: user_id.into(),
            rating,
            comment: comment.into(),
            created_at: Utc::now(),
        });
        self.recompute_rating();
        Ok(self.rating)
    }

    fn recompute_rating(&mut self) {
        let count = self.reviews.len() as u32;
        let sum: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        self.rating = Rating {
            average: if count == 0 { 0.0 } else { f64::from(sum) / f64::from(count) },
            count,
        };
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}
