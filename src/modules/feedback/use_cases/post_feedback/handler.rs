use std::sync::Arc;

use crate::modules::feedback::core::feedback::Feedback;
use crate::modules::feedback::core::ports::FeedbackRepository;
use crate::modules::feedback::use_cases::post_feedback::command::PostFeedback;
use crate::modules::feedback::use_cases::post_feedback::decide::decide_post;
use crate::shared::application::errors::ApplicationError;
use crate::shared::infrastructure::store::StoreError;

pub struct PostFeedbackHandler {
    feedback: Arc<dyn FeedbackRepository>,
}

impl PostFeedbackHandler {
    pub fn new(feedback: Arc<dyn FeedbackRepository>) -> Self {
        Self { feedback }
    }

    pub async fn handle(&self, command: PostFeedback) -> Result<Feedback, ApplicationError> {
        let new_feedback =
            decide_post(command).map_err(|reason| ApplicationError::Validation(reason.to_string()))?;
        match self.feedback.create_feedback(new_feedback).await {
            Ok(feedback) => {
                tracing::info!(feedback_id = feedback.id, user_id = feedback.user_id, "feedback posted");
                Ok(feedback)
            }
            Err(StoreError::Orphan(_)) => Err(ApplicationError::NotFound("user not found".to_string())),
            Err(err) => Err(err.into()),
        }
    }
}
