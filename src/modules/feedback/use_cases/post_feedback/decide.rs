use crate::modules::feedback::core::feedback::{MAX_FEEDBACK_CHARS, NewFeedback};
use crate::modules::feedback::use_cases::post_feedback::command::PostFeedback;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("feedback content is required")]
    MissingContent,

    #[error("feedback must be {} characters or less", MAX_FEEDBACK_CHARS)]
    TooLong,
}

pub fn decide_post(command: PostFeedback) -> Result<NewFeedback, DecideError> {
    let content = command.content.trim();
    if content.is_empty() {
        return Err(DecideError::MissingContent);
    }
    if content.chars().count() > MAX_FEEDBACK_CHARS {
        return Err(DecideError::TooLong);
    }
    Ok(NewFeedback {
        user_id: command.user_id,
        content: content.to_string(),
        created_at: command.posted_at,
    })
}
