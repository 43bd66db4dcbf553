use std::sync::Arc;

use crate::modules::classes::core::ports::ClassRepository;
use crate::modules::study_sessions::core::ports::StudySessionStore;
use crate::modules::study_sessions::core::session::StudySession;
use crate::modules::study_sessions::use_cases::record_session::command::RecordStudySession;
use crate::modules::study_sessions::use_cases::record_session::decide::{decide_record, validate_record};
use crate::modules::study_sessions::use_cases::record_session::decision::{DecideError, Decision};
use crate::shared::application::errors::ApplicationError;
use crate::shared::infrastructure::store::StoreError;

pub struct RecordSessionHandler {
    classes: Arc<dyn ClassRepository>,
    sessions: Arc<dyn StudySessionStore>,
}

impl RecordSessionHandler {
    pub fn new(classes: Arc<dyn ClassRepository>, sessions: Arc<dyn StudySessionStore>) -> Self {
        Self { classes, sessions }
    }

    pub async fn handle(&self, command: RecordStudySession) -> Result<StudySession, ApplicationError> {
        validate_record(&command)?;

        let owned_class = self
            .classes
            .find_owned_class(command.class_id, command.user_id)
            .await?;

        let session = match decide_record(command, owned_class.as_ref()) {
            Decision::Accepted { session } => session,
            Decision::Rejected { reason } => return Err(reason.into()),
        };

        match self.sessions.insert_session(session.clone()).await {
            Ok(()) => {
                tracing::info!(
                    session_id = %session.id,
                    user_id = session.user_id,
                    class_id = session.class_id,
                    seconds = session.seconds,
                    week_start = %session.week_start,
                    "study session recorded"
                );
                Ok(session)
            }
            // the class vanished between the ownership check and the insert
            Err(StoreError::Orphan(_)) => Err(DecideError::ClassNotFound.into()),
            Err(err) => Err(err.into()),
        }
    }
}

impl From<DecideError> for ApplicationError {
    fn from(reason: DecideError) -> Self {
        match reason {
            DecideError::ClassNotFound => ApplicationError::NotFound(reason.to_string()),
            DecideError::NegativeSeconds | DecideError::MalformedWeekStart(_) => {
                ApplicationError::Validation(reason.to_string())
            }
        }
    }
}

#[cfg(test)]
mod record_session_handler_tests {
    use super::*;
    use crate::modules::study_sessions::core::ports::StudySessionQueries;
    use crate::shared::infrastructure::store::in_memory::InMemoryStore;
    use crate::tests::fixtures::commands::record_study_session::RecordStudySessionBuilder;
    use crate::tests::fixtures::seeded_store;
    use rstest::rstest;

    fn handler(store: Arc<InMemoryStore>) -> RecordSessionHandler {
        RecordSessionHandler::new(store.clone(), store)
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_append_sessions_and_sum_them_per_week() {
        let (store, seed) = seeded_store().await;
        let handler = handler(store.clone());

        for seconds in [120, 300] {
            let command = RecordStudySessionBuilder::new()
                .user_id(seed.ada.id)
                .class_id(seed.ada_class.id)
                .seconds(seconds)
                .week_start("2025-06-02")
                .build();
            handler.handle(command).await.expect("record failed");
        }

        let week = "2025-06-02".parse().unwrap();
        let total = store
            .sum_seconds(seed.ada.id, seed.ada_class.id, week)
            .await
            .unwrap();
        assert_eq!(total, 420);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_answer_not_found_for_a_foreign_class() {
        let (store, seed) = seeded_store().await;
        let command = RecordStudySessionBuilder::new()
            .user_id(seed.ada.id)
            .class_id(seed.grace_class.id)
            .build();
        let result = handler(store.clone()).handle(command).await;
        assert!(matches!(result, Err(ApplicationError::NotFound(_))));
        let week = "2025-06-02".parse().unwrap();
        assert_eq!(
            store.sum_seconds(seed.grace.id, seed.grace_class.id, week).await.unwrap(),
            0
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_answer_validation_for_negative_seconds() {
        let (store, seed) = seeded_store().await;
        let command = RecordStudySessionBuilder::new()
            .user_id(seed.ada.id)
            .class_id(seed.ada_class.id)
            .seconds(-10)
            .build();
        let result = handler(store).handle(command).await;
        assert!(matches!(result, Err(ApplicationError::Validation(_))));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_when_the_store_is_offline() {
        let mut store = InMemoryStore::new();
        store.toggle_offline();
        let result = handler(Arc::new(store))
            .handle(RecordStudySessionBuilder::new().build())
            .await;
        assert!(matches!(result, Err(ApplicationError::Store(StoreError::Offline))));
    }

    #[rstest]
    #[case::negative_seconds(-10, None)]
    #[case::malformed_week(60, Some("next week"))]
    #[tokio::test]
    async fn it_should_reject_invalid_input_before_touching_the_store(
        #[case] seconds: i64,
        #[case] week_start: Option<&str>,
    ) {
        let mut store = InMemoryStore::new();
        store.toggle_offline();
        let mut builder = RecordStudySessionBuilder::new().seconds(seconds);
        if let Some(raw) = week_start {
            builder = builder.week_start(raw);
        }
        let result = handler(Arc::new(store)).handle(builder.build()).await;
        assert!(matches!(result, Err(ApplicationError::Validation(_))));
    }
}
