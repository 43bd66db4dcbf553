// Ports the classes context needs from the outside world.
//
// find_owned_class doubles as the ownership check used when study time is recorded.

use async_trait::async_trait;

use crate::modules::classes::core::class::{Class, NewClass};
use crate::shared::core::primitives::{ClassId, UserId};
use crate::shared::infrastructure::store::StoreError;

#[async_trait]
pub trait ClassRepository: Send + Sync {
    /// Fails with `StoreError::Orphan` when the owner does not exist.
    async fn create_class(&self, class: NewClass) -> Result<Class, StoreError>;

    /// Newest first.
    async fn list_classes(&self, user_id: UserId) -> Result<Vec<Class>, StoreError>;

    /// The class, only if it exists and belongs to `user_id`.
    async fn find_owned_class(
        &self,
        class_id: ClassId,
        user_id: UserId,
    ) -> Result<Option<Class>, StoreError>;
}
