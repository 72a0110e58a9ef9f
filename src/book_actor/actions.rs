use crate::domain::Rating;

/// Domain-specific operations on a catalog item beyond CRUD.
#[derive(Debug, Clone)]
pub enum BookAction {
    /// Read the live stock level without modifying it.
    CheckStock,
    /// Conditionally decrement stock and bump the sales count. Fails with
    /// `InsufficientStock` instead of going below zero.
    ReserveStock(u32),
    /// Put cancelled quantities back.
    RestoreStock(u32),
    AddReview {
        user_id: String,
        rating: u8,
        comment: String,
    },
    /// Soft delete. The book stays in the store with `is_active = false`.
    Deactivate,
}

/// Results from [`BookAction`], matching the actions 1:1.
#[derive(Debug, Clone)]
pub enum BookActionResult {
    StockLevel(u32),
    Reserved,
    Restored,
    ReviewAdded(Rating),
    Deactivated,
}
