use async_trait::async_trait;

use crate::modules::feedback::core::feedback::{Feedback, NewFeedback};
use crate::shared::core::primitives::{FeedbackId, UserId};
use crate::shared::infrastructure::store::StoreError;

#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Fails with `StoreError::Orphan` when the author does not exist.
    async fn create_feedback(&self, feedback: NewFeedback) -> Result<Feedback, StoreError>;

    /// Most upvoted first, newest first among equals.
    async fn list_feedback(&self) -> Result<Vec<Feedback>, StoreError>;

    /// Adds the caller's upvote, or removes it if already present, and keeps the
    /// counter in step. `Some(true)` when the upvote now exists, `None` for unknown feedback.
    async fn toggle_upvote(
        &self,
        feedback_id: FeedbackId,
        user_id: UserId,
    ) -> Result<Option<bool>, StoreError>;

    /// Deletes the feedback only when `user_id` wrote it. Returns whether a row went away.
    async fn delete_owned_feedback(
        &self,
        feedback_id: FeedbackId,
        user_id: UserId,
    ) -> Result<bool, StoreError>;
}
