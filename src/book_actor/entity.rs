use crate::actor_framework::Entity;
use crate::domain::{Book, Rating, Stock};

use super::{BookAction, BookActionResult, BookCreate, BookError, BookPatch};

impl Entity for Book {
    type Id = String;
    type CreateParams = BookCreate;
    type Patch = BookPatch;
    type Action = BookAction;
    type ActionResult = BookActionResult;
    type Error = BookError;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, params: BookCreate) -> Result<Self, BookError> {
        Ok(Self {
            id,
            title: params.title,
            author: params.author,
            description: params.description,
            category: params.category,
            image: params.image,
            price: params.price,
            stock: Stock::new(params.quantity, params.threshold),
            rating: Rating { average: 0.0, count: 0 },
            reviews: Vec::new(),
            sales_count: 0,
            is_active: true,
        })
    }

    fn on_update(&mut self, patch: BookPatch) -> Result<(), BookError> {
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(threshold) = patch.threshold {
            self.stock.threshold = threshold;
        }
        // set_stock also recomputes the derived status, so apply quantity
        // after a possible threshold change.
        if let Some(quantity) = patch.quantity {
            self.set_stock(quantity);
        } else if patch.threshold.is_some() {
            self.set_stock(self.stock.quantity);
        }
        Ok(())
    }

    fn handle_action(&mut self, action: BookAction) -> Result<BookActionResult, BookError> {
        match action {
            BookAction::CheckStock => Ok(BookActionResult::StockLevel(self.stock.quantity)),
            BookAction::ReserveStock(quantity) => {
                self.reserve_stock(quantity)?;
                Ok(BookActionResult::Reserved)
            }
            BookAction::RestoreStock(quantity) => {
                self.restore_stock(quantity);
                Ok(BookActionResult::Restored)
            }
            BookAction::AddReview { user_id, rating, comment } => {
                let rating = self.add_review(user_id, rating, comment)?;
                Ok(BookActionResult::ReviewAdded(rating))
            }
            BookAction::Deactivate => {
                self.deactivate();
                Ok(BookActionResult::Deactivated)
            }
        }
    }
}
