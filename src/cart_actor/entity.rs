use crate::actor_framework::Entity;
use crate::domain::Cart;

use super::{CartAction, CartCreate, CartError};

impl Entity for Cart {
    /// The owning user's id; one cart per user.
    type Id = String;
    type CreateParams = CartCreate;
    /// Totals are derived; there is nothing to patch directly.
    type Patch = ();
    type Action = CartAction;
    /// Every mutation returns the updated cart with recomputed totals.
    type ActionResult = Cart;
    type Error = CartError;

    fn id(&self) -> &String {
        &self.user_id
    }

    fn from_create_params(user_id: String, _params: CartCreate) -> Result<Self, CartError> {
        Ok(Cart::new(user_id))
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), CartError> {
        Ok(())
    }

    fn handle_action(&mut self, action: CartAction) -> Result<Cart, CartError> {
        match action {
            CartAction::AddItem { book_id, quantity, unit_price } => {
                self.add_item(book_id, quantity, unit_price);
            }
            CartAction::UpdateItemQuantity { book_id, quantity, unit_price } => {
                self.update_item_quantity(&book_id, quantity, unit_price)?;
            }
            CartAction::RemoveItem { book_id } => {
                self.remove_item(&book_id)?;
            }
            CartAction::Clear => {
                self.clear();
            }
        }
        Ok(self.clone())
    }
}
