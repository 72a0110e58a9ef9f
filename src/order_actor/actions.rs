use crate::domain::OrderStatus;

/// Post-checkout mutations. Orders only ever change through these; each
/// status change lands in the append-only history inside the aggregate.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Admin transition along the state machine.
    UpdateStatus {
        status: OrderStatus,
        comment: Option<String>,
        actor: String,
    },
    /// User cancellation; allowed from placed/confirmed/processing only.
    Cancel { reason: String, actor: String },
    /// User return; allowed from delivered, within the return window.
    RequestReturn { reason: String, actor: String },
    SetTracking {
        courier: String,
        tracking_number: String,
    },
}
