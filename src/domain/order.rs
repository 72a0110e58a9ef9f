use std::fmt;

use chrono::{DateTime, Duration, Utc};

use crate::domain::Cart;
use crate::order_actor::OrderError;

/// Days after delivery during which a return is accepted.
pub const RETURN_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Placed,
    Confirmed,
    Processing,
    Packed,
    Shipped,
    OutForDelivery,
    Delivered,
    Cancelled,
    Returned,
    Refunded,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Packed => "packed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::OutForDelivery => "out-for-delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Returned => "returned",
            OrderStatus::Refunded => "refunded",
        };
        f.write_str(s)
    }
}

impl OrderStatus {
    /// The states reachable from this one. Forward pipeline plus the
    /// cancel/return/refund side branches.
    pub fn allowed_transitions(&self) -> &'static [OrderStatus] {
        use OrderStatus::*;
        match self {
            Placed => &[Confirmed, Cancelled],
            Confirmed => &[Processing, Cancelled],
            Processing => &[Packed, Cancelled],
            Packed => &[Shipped],
            Shipped => &[OutForDelivery],
            OutForDelivery => &[Delivered],
            Delivered => &[Returned],
            Cancelled => &[Refunded],
            Returned => &[Refunded],
            Refunded => &[],
        }
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Cod,
    Card,
    Upi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Completed,
    Refunded,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentInfo {
    pub method: PaymentMethod,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShippingAddress {
    pub name: String,
    pub phone: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

/// One entry of the append-only status log.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusEntry {
    pub status: OrderStatus,
    pub comment: Option<String>,
    pub actor: String,
    pub at: DateTime<Utc>,
}

/// A line frozen at checkout. Title, author, image and prices are copied from
/// the live book at that instant; later catalog changes do not reach past
/// orders.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub image: String,
    pub price: f64,
    pub mrp: f64,
    pub quantity: u32,
}

/// Cart totals as they stood at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub total_items: u32,
    pub total_amount: f64,
    pub delivery_charges: f64,
    pub final_amount: f64,
}

impl OrderSummary {
    pub fn from_cart(cart: &Cart) -> Self {
        Self {
            total_items: cart.total_items,
            total_amount: cart.total_amount,
            delivery_charges: cart.delivery_charges,
            final_amount: cart.final_amount,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackingInfo {
    pub courier: Option<String>,
    pub tracking_number: Option<String>,
}

/// The immutable post-checkout snapshot derived from a cart. Mutated only
/// through the status transitions below; never deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub summary: OrderSummary,
    pub shipping_address: ShippingAddress,
    pub payment: PaymentInfo,
    pub status: OrderStatus,
    pub status_history: Vec<StatusEntry>,
    pub tracking: TrackingInfo,
    pub created_at: DateTime<Utc>,
    pub actual_delivery: Option<DateTime<Utc>>,
}

impl Order {
    /// Build a freshly placed order from checkout snapshots. Records the
    /// first status-history entry (`placed`) on the way in.
    pub fn place(
        id: impl Into<String>,
        user_id: impl Into<String>,
        items: Vec<OrderItem>,
        summary: OrderSummary,
        shipping_address: ShippingAddress,
        payment_method: PaymentMethod,
    ) -> Self {
        let mut order = Self {
            id: id.into(),
            user_id: user_id.into(),
            items,
            summary,
            shipping_address,
            payment: PaymentInfo { method: payment_method, status: PaymentStatus::Pending },
            status: OrderStatus::Placed,
            status_history: Vec::new(),
            tracking: TrackingInfo::default(),
            created_at: Utc::now(),
            actual_delivery: None,
        };
        order.record_status(OrderStatus::Placed, None, "system");
        order
    }

    /// The only path that writes `status`, so every change lands in the
    /// history log.
    fn record_status(&mut self, status: OrderStatus, comment: Option<String>, actor: &str) {
        self.status = status;
        self.status_history.push(StatusEntry {
            status,
            comment,
            actor: actor.to_string(),
            at: Utc::now(),
        });
    }

    /// Admin-driven transition. Validates against the state machine, appends
    /// to the history, and on delivery stamps `actual_delivery` and settles
    /// COD payment.
    pub fn update_status(
        &mut self,
        status: OrderStatus,
        comment: Option<String>,
        actor: &str,
    ) -> Result<(), OrderError> {
        if !self.status.can_transition_to(status) {
            return Err(OrderError::InvalidStateTransition { from: self.status, to: status });
        }
        self.record_status(status, comment, actor);
        if status == OrderStatus::Delivered {
            self.actual_delivery = Some(Utc::now());
            if self.payment.method == PaymentMethod::Cod {
                self.payment.status = PaymentStatus::Completed;
            }
        }
        Ok(())
    }

    pub fn can_cancel(&self) -> bool {
        matches!(
            self.status,
            OrderStatus::Placed | OrderStatus::Confirmed | OrderStatus::Processing
        )
    }

    pub fn cancel(&mut self, reason: impl Into<String>, actor: &str) -> Result<(), OrderError> {
        if !self.can_cancel() {
            return Err(OrderError::InvalidStateTransition {
                from: self.status,
                to: OrderStatus::Cancelled,
            });
        }
        self.record_status(OrderStatus::Cancelled, Some(reason.into()), actor);
        Ok(())
    }

    /// Return, accepted only for delivered orders inside the return window.
    /// The window is measured from `actual_delivery`, falling back to
    /// `created_at` for legacy orders delivered before that field existed.
    pub fn request_return(
        &mut self,
        reason: impl Into<String>,
        actor: &str,
    ) -> Result<(), OrderError> {
        if self.status != OrderStatus::Delivered {
            return Err(OrderError::InvalidStateTransition {
                from: self.status,
                to: OrderStatus::Returned,
            });
        }
        let delivered_at = self.actual_delivery.unwrap_or(self.created_at);
        if Utc::now() - delivered_at > Duration::days(RETURN_WINDOW_DAYS) {
            return Err(OrderError::ReturnWindowExpired { days: RETURN_WINDOW_DAYS });
        }
        self.record_status(OrderStatus::Returned, Some(reason.into()), actor);
        self.payment.status = PaymentStatus::Refunded;
        Ok(())
    }

    pub fn set_tracking(&mut self, courier: impl Into<String>, tracking_number: impl Into<String>) {
        self.tracking = TrackingInfo {
            courier: Some(courier.into()),
            tracking_number: Some(tracking_number.into()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order(method: PaymentMethod) -> Order {
        let mut order = Order {
            id: "ORD-1".into(),
            user_id: "user_1".into(),
            items: vec![OrderItem {
                book_id: "book_1".into(),
                title: "Dune".into(),
                author: "Frank Herbert".into(),
                image: "dune.jpg".into(),
                price: 350.0,
                mrp: 450.0,
                quantity: 2,
            }],
            summary: OrderSummary {
                total_items: 2,
                total_amount: 700.0,
                delivery_charges: 0.0,
                final_amount: 700.0,
            },
            shipping_address: ShippingAddress {
                name: "Asha".into(),
                phone: "9999999999".into(),
                line1: "12 MG Road".into(),
                line2: None,
                city: "Pune".into(),
                state: "MH".into(),
                pincode: "411001".into(),
            },
            payment: PaymentInfo { method, status: PaymentStatus::Pending },
            status: OrderStatus::Placed,
            status_history: Vec::new(),
            tracking: TrackingInfo::default(),
            created_at: Utc::now(),
            actual_delivery: None,
        };
        order.record_status(OrderStatus::Placed, None, "system");
        order
    }

    fn march_to(order: &mut Order, target: OrderStatus) {
        use OrderStatus::*;
        for status in [Confirmed, Processing, Packed, Shipped, OutForDelivery, Delivered] {
            order.update_status(status, None, "admin").unwrap();
            if status == target {
                return;
            }
        }
    }

    #[test]
    fn every_transition_appends_history() {
        let mut order = sample_order(PaymentMethod::Card);
        assert_eq!(order.status_history.len(), 1);
        assert_eq!(order.status_history[0].status, OrderStatus::Placed);

        march_to(&mut order, OrderStatus::Delivered);
        assert_eq!(order.status_history.len(), 7);
        assert_eq!(order.status, OrderStatus::Delivered);
        let logged: Vec<_> = order.status_history.iter().map(|e| e.status).collect();
        assert_eq!(
            logged,
            vec![
                OrderStatus::Placed,
                OrderStatus::Confirmed,
                OrderStatus::Processing,
                OrderStatus::Packed,
                OrderStatus::Shipped,
                OrderStatus::OutForDelivery,
                OrderStatus::Delivered,
            ]
        );
    }

    #[test]
    fn skipping_pipeline_states_is_rejected() {
        let mut order = sample_order(PaymentMethod::Card);
        let err = order
            .update_status(OrderStatus::Shipped, None, "admin")
            .unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidStateTransition { from: OrderStatus::Placed, to: OrderStatus::Shipped }
        );
        assert_eq!(order.status_history.len(), 1);
    }

    #[test]
    fn delivery_settles_cod_payment_and_stamps_time() {
        let mut order = sample_order(PaymentMethod::Cod);
        march_to(&mut order, OrderStatus::Delivered);
        assert_eq!(order.payment.status, PaymentStatus::Completed);
        assert!(order.actual_delivery.is_some());

        let mut prepaid = sample_order(PaymentMethod::Upi);
        march_to(&mut prepaid, OrderStatus::Delivered);
        assert_eq!(prepaid.payment.status, PaymentStatus::Pending);
    }

    #[test]
    fn cancel_allowed_only_before_packing() {
        let mut order = sample_order(PaymentMethod::Card);
        march_to(&mut order, OrderStatus::Processing);
        assert!(order.can_cancel());
        order.cancel("changed my mind", "user_1").unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);
        assert_eq!(order.status_history.last().unwrap().status, OrderStatus::Cancelled);

        let mut shipped = sample_order(PaymentMethod::Card);
        march_to(&mut shipped, OrderStatus::Shipped);
        assert!(!shipped.can_cancel());
        assert!(shipped.cancel("too late", "user_1").is_err());
    }

    #[test]
    fn cancelling_a_delivered_order_is_rejected() {
        let mut order = sample_order(PaymentMethod::Card);
        march_to(&mut order, OrderStatus::Delivered);
        let err = order.cancel("no", "user_1").unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidStateTransition {
                from: OrderStatus::Delivered,
                to: OrderStatus::Cancelled
            }
        );
    }

    #[test]
    fn return_within_window_refunds_payment() {
        let mut order = sample_order(PaymentMethod::Card);
        march_to(&mut order, OrderStatus::Delivered);
        order.request_return("damaged cover", "user_1").unwrap();
        assert_eq!(order.status, OrderStatus::Returned);
        assert_eq!(order.payment.status, PaymentStatus::Refunded);
    }

    #[test]
    fn return_after_window_is_rejected() {
        let mut order = sample_order(PaymentMethod::Card);
        march_to(&mut order, OrderStatus::Delivered);
        order.actual_delivery = Some(Utc::now() - Duration::days(RETURN_WINDOW_DAYS + 1));

        let err = order.request_return("too late", "user_1").unwrap_err();
        assert_eq!(err, OrderError::ReturnWindowExpired { days: RETURN_WINDOW_DAYS });
        assert_eq!(order.status, OrderStatus::Delivered);
        assert_eq!(order.payment.status, PaymentStatus::Pending);
    }

    #[test]
    fn return_window_falls_back_to_created_at() {
        let mut order = sample_order(PaymentMethod::Card);
        march_to(&mut order, OrderStatus::Delivered);
        order.actual_delivery = None;
        order.created_at = Utc::now() - Duration::days(RETURN_WINDOW_DAYS + 2);

        assert!(order.request_return("late", "user_1").is_err());
    }

    #[test]
    fn returning_an_undelivered_order_is_rejected() {
        let mut order = sample_order(PaymentMethod::Card);
        march_to(&mut order, OrderStatus::Shipped);
        assert!(order.request_return("not yet", "user_1").is_err());
    }

    #[test]
    fn refund_follows_cancel_or_return_only() {
        let mut cancelled = sample_order(PaymentMethod::Card);
        cancelled.cancel("mind changed", "user_1").unwrap();
        cancelled
            .update_status(OrderStatus::Refunded, None, "admin")
            .unwrap();
        assert_eq!(cancelled.status, OrderStatus::Refunded);

        // Refunded is terminal.
        assert!(cancelled
            .update_status(OrderStatus::Confirmed, None, "admin")
            .is_err());
    }
}
