use tracing::{debug, instrument};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::book_actor::{BookAction, BookActionResult, BookCreate, BookError, BookPatch};
use crate::domain::{Book, Rating};
use crate::impl_basic_client;

/// Client for the catalog actor.
#[derive(Clone)]
pub struct BookClient {
    inner: ResourceClient<Book>,
}

impl_basic_client!(BookClient, Book, book);

impl BookClient {
    #[instrument(skip(self, params), fields(title = %params.title))]
    pub async fn create_book(&self, params: BookCreate) -> Result<String, BookError> {
        debug!("Sending request");
        self.inner.create(params).await
    }

    #[instrument(skip(self, patch))]
    #[allow(dead_code)]
    pub async fn update_book(&self, id: String, patch: BookPatch) -> Result<Book, BookError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(BookError::normalize)
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: String) -> Result<u32, BookError> {
        debug!("Sending request");
        match self.inner.perform_action(id, BookAction::CheckStock).await {
            Ok(BookActionResult::StockLevel(level)) => Ok(level),
            Ok(_) => Err(FrameworkError::UnexpectedResult.into()),
            Err(e) => Err(e.normalize()),
        }
    }

    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: String, quantity: u32) -> Result<(), BookError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, BookAction::ReserveStock(quantity))
            .await
        {
            Ok(BookActionResult::Reserved) => Ok(()),
            Ok(_) => Err(FrameworkError::UnexpectedResult.into()),
            Err(e) => Err(e.normalize()),
        }
    }

    #[instrument(skip(self))]
    pub async fn restore_stock(&self, id: String, quantity: u32) -> Result<(), BookError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, BookAction::RestoreStock(quantity))
            .await
        {
            Ok(BookActionResult::Restored) => Ok(()),
            Ok(_) => Err(FrameworkError::UnexpectedResult.into()),
            Err(e) => Err(e.normalize()),
        }
    }

    #[instrument(skip(self, comment))]
    pub async fn add_review(
        &self,
        id: String,
        user_id: String,
        rating: u8,
        comment: String,
    ) -> Result<Rating, BookError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, BookAction::AddReview { user_id, rating, comment })
            .await
        {
            Ok(BookActionResult::ReviewAdded(rating)) => Ok(rating),
            Ok(_) => Err(FrameworkError::UnexpectedResult.into()),
            Err(e) => Err(e.normalize()),
        }
    }

    #[instrument(skip(self))]
    #[allow(dead_code)]
    pub async fn deactivate_book(&self, id: String) -> Result<(), BookError> {
        debug!("Sending request");
        match self.inner.perform_action(id, BookAction::Deactivate).await {
            Ok(BookActionResult::Deactivated) => Ok(()),
            Ok(_) => Err(FrameworkError::UnexpectedResult.into()),
            Err(e) => Err(e.normalize()),
        }
    }
}
