use std::sync::Arc;

use crate::modules::users::core::ports::UserRepository;
use crate::modules::users::core::user::User;
use crate::modules::users::use_cases::register_user::command::RegisterUser;
use crate::modules::users::use_cases::register_user::decide::decide_register;
use crate::shared::application::errors::ApplicationError;
use crate::shared::infrastructure::store::StoreError;

pub struct RegisterUserHandler {
    users: Arc<dyn UserRepository>,
}

impl RegisterUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, command: RegisterUser) -> Result<User, ApplicationError> {
        let new_user =
            decide_register(command).map_err(|reason| ApplicationError::Validation(reason.to_string()))?;
        match self.users.create_user(new_user).await {
            Ok(user) => {
                tracing::info!(user_id = user.id, username = %user.username, "user registered");
                Ok(user)
            }
            Err(StoreError::Conflict(_)) => Err(ApplicationError::Conflict(
                "username or email already exists".to_string(),
            )),
            Err(err) => Err(err.into()),
        }
    }
}
