use crate::domain::{OrderItem, OrderSummary, PaymentMethod, ShippingAddress};

/// Everything the order actor needs to persist a checkout snapshot. Built by
/// `OrderClient::place_order` from the live cart and catalog.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub summary: OrderSummary,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
}
