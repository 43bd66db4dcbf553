// Ports the users context needs from the outside world.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::modules::users::core::user::{NewUser, User};
use crate::shared::core::primitives::UserId;
use crate::shared::infrastructure::store::StoreError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `StoreError::Conflict` when the username or email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Usernames for the given ids. Unknown ids are absent from the map.
    async fn usernames(&self, ids: &[UserId]) -> Result<HashMap<UserId, String>, StoreError>;
}
