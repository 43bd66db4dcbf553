use std::sync::Arc;

use crate::modules::feedback::core::feedback::Feedback;
use crate::modules::feedback::core::ports::FeedbackRepository;
use crate::shared::application::errors::ApplicationError;
use crate::shared::core::primitives::{FeedbackId, UserId};

pub const DELETE_DENIED: &str = "Feedback not found or you do not have permission";

pub struct FeedbackBoardHandler {
    feedback: Arc<dyn FeedbackRepository>,
}

impl FeedbackBoardHandler {
    pub fn new(feedback: Arc<dyn FeedbackRepository>) -> Self {
        Self { feedback }
    }

    pub async fn list(&self) -> Result<Vec<Feedback>, ApplicationError> {
        Ok(self.feedback.list_feedback().await?)
    }

    /// Whether the caller's upvote exists after the toggle.
    pub async fn toggle_upvote(
        &self,
        feedback_id: FeedbackId,
        user_id: UserId,
    ) -> Result<bool, ApplicationError> {
        let upvoted = self
            .feedback
            .toggle_upvote(feedback_id, user_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound("Feedback not found".to_string()))?;
        tracing::debug!(feedback_id, user_id, upvoted, "upvote toggled");
        Ok(upvoted)
    }

    pub async fn delete(&self, feedback_id: FeedbackId, user_id: UserId) -> Result<(), ApplicationError> {
        if !self.feedback.delete_owned_feedback(feedback_id, user_id).await? {
            return Err(ApplicationError::NotFound(DELETE_DENIED.to_string()));
        }
        tracing::info!(feedback_id, user_id, "feedback deleted");
        Ok(())
    }
}
