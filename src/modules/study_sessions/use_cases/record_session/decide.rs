use crate::modules::classes::core::class::Class;
use crate::modules::study_sessions::core::session::StudySession;
use crate::modules::study_sessions::use_cases::record_session::{
    command::RecordStudySession,
    decision::{DecideError, Decision},
};
use crate::shared::core::week::WeekStart;

/// Checks the parts of a command that need no store lookup: seconds and the
/// optional week start. Returns the accepted seconds and the resolved week.
pub fn validate_record(command: &RecordStudySession) -> Result<(u64, WeekStart), DecideError> {
    let seconds = u64::try_from(command.seconds).map_err(|_| DecideError::NegativeSeconds)?;
    let week_start = match command.week_start.as_deref() {
        Some(raw) => WeekStart::parse(raw)?,
        None => WeekStart::containing(command.recorded_at.date_naive()),
    };
    Ok((seconds, week_start))
}

/// `owned_class` is the caller's class with the command's id, if there is one.
pub fn decide_record(command: RecordStudySession, owned_class: Option<&Class>) -> Decision {
    let (seconds, week_start) = match validate_record(&command) {
        Ok(valid) => valid,
        Err(reason) => return Decision::Rejected { reason },
    };

    match owned_class {
        Some(class) if class.id == command.class_id && class.user_id == command.user_id => {
            Decision::Accepted {
                session: StudySession {
                    id: command.session_id,
                    user_id: command.user_id,
                    class_id: command.class_id,
                    seconds,
                    week_start,
                    created_at: command.recorded_at,
                },
            }
        }
        _ => Decision::Rejected {
            reason: DecideError::ClassNotFound,
        },
    }
}
