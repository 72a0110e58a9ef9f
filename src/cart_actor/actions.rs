/// Cart mutations. Every one of them ends in a full totals recompute inside
/// the aggregate; stock limits are the calling client's concern.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Merge into an existing line (keeping its price snapshot) or append a
    /// new line priced at `unit_price`.
    AddItem {
        book_id: String,
        quantity: u32,
        unit_price: f64,
    },
    /// Set a line's quantity and refresh its price snapshot. Quantity 0
    /// removes the line.
    UpdateItemQuantity {
        book_id: String,
        quantity: u32,
        unit_price: f64,
    },
    RemoveItem { book_id: String },
    Clear,
}
