use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::User;

use super::{UserCreate, UserError, UserPatch};

impl Entity for User {
    type Id = String;
    type CreateParams = UserCreate;
    type Patch = UserPatch;
    type Action = ();
    type ActionResult = ();
    type Error = UserError;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, params: UserCreate) -> Result<Self, UserError> {
        if !params.email.contains('@') {
            return Err(UserError::ValidationError(format!(
                "invalid email: {}",
                params.email
            )));
        }
        Ok(Self {
            id,
            name: params.name,
            email: params.email,
            phone: params.phone,
            created_at: Utc::now(),
        })
    }

    fn on_update(&mut self, patch: UserPatch) -> Result<(), UserError> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            if !email.contains('@') {
                return Err(UserError::ValidationError(format!("invalid email: {email}")));
            }
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), UserError> {
        Ok(())
    }
}
