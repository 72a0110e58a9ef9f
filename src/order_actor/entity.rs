use crate::actor_framework::Entity;
use crate::domain::Order;

use super::{OrderAction, OrderCreate, OrderError};

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    /// Orders are immutable snapshots; there is nothing to patch.
    type Patch = ();
    type Action = OrderAction;
    /// Every action returns the updated order so callers see the appended
    /// history without a second round trip.
    type ActionResult = Order;
    type Error = OrderError;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        Ok(Order::place(
            id,
            params.user_id,
            params.items,
            params.summary,
            params.shipping_address,
            params.payment_method,
        ))
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), OrderError> {
        Ok(())
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<Order, OrderError> {
        match action {
            OrderAction::UpdateStatus { status, comment, actor } => {
                self.update_status(status, comment, &actor)?;
            }
            OrderAction::Cancel { reason, actor } => {
                self.cancel(reason, &actor)?;
            }
            OrderAction::RequestReturn { reason, actor } => {
                self.request_return(reason, &actor)?;
            }
            OrderAction::SetTracking { courier, tracking_number } => {
                self.set_tracking(courier, tracking_number);
            }
        }
        Ok(self.clone())
    }
}
