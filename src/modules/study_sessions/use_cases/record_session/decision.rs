use crate::modules::study_sessions::core::session::StudySession;
use crate::shared::core::week::WeekStartError;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("seconds must be a non-negative number")]
    NegativeSeconds,

    #[error(transparent)]
    MalformedWeekStart(#[from] WeekStartError),

    #[error("class not found")]
    ClassNotFound,
}

#[derive(Debug)]
pub enum Decision {
    Accepted { session: StudySession },
    Rejected { reason: DecideError },
}
