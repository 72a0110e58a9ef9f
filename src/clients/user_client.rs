use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::User;
use crate::impl_basic_client;
use crate::user_actor::{UserCreate, UserError, UserPatch};

/// Client for the user actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_basic_client!(UserClient, User, user);

impl UserClient {
    #[instrument(skip(self, params), fields(user_name = %params.name))]
    pub async fn create_user(&self, params: UserCreate) -> Result<String, UserError> {
        debug!("Sending request");
        self.inner.create(params).await
    }

    #[instrument(skip(self, patch))]
    #[allow(dead_code)]
    pub async fn update_user(&self, id: String, patch: UserPatch) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.update(id, patch).await
    }
}
