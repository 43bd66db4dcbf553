use std::sync::Arc;

use crate::modules::classes::core::ports::ClassRepository;
use crate::modules::classes::use_cases::create_class::handler::CreateClassHandler;
use crate::modules::feedback::core::ports::FeedbackRepository;
use crate::modules::feedback::use_cases::manage_feedback::handler::FeedbackBoardHandler;
use crate::modules::feedback::use_cases::post_feedback::handler::PostFeedbackHandler;
use crate::modules::study_sessions::core::ports::{StudySessionQueries, StudySessionStore};
use crate::modules::study_sessions::use_cases::leaderboard::handler::LeaderboardHandler;
use crate::modules::study_sessions::use_cases::record_session::handler::RecordSessionHandler;
use crate::modules::study_sessions::use_cases::weekly_totals::handler::WeeklyTotalsHandler;
use crate::modules::users::core::ports::UserRepository;
use crate::modules::users::use_cases::register_user::handler::RegisterUserHandler;
use crate::shared::core::clock::Clock;

#[derive(Clone)]
pub struct AppState {
    pub clock: Arc<dyn Clock>,
    pub users: Arc<dyn UserRepository>,
    pub classes: Arc<dyn ClassRepository>,
    pub register_user_handler: Arc<RegisterUserHandler>,
    pub create_class_handler: Arc<CreateClassHandler>,
    pub record_session_handler: Arc<RecordSessionHandler>,
    pub weekly_totals_handler: Arc<WeeklyTotalsHandler>,
    pub leaderboard_handler: Arc<LeaderboardHandler>,
    pub post_feedback_handler: Arc<PostFeedbackHandler>,
    pub feedback_board_handler: Arc<FeedbackBoardHandler>,
}

impl AppState {
    /// Wires every handler to one store that implements all the ports.
    pub fn new<S>(store: Arc<S>, clock: Arc<dyn Clock>, leaderboard_limit: usize) -> Self
    where
        S: UserRepository
            + ClassRepository
            + StudySessionStore
            + StudySessionQueries
            + FeedbackRepository
            + 'static,
    {
        let users: Arc<dyn UserRepository> = store.clone();
        let classes: Arc<dyn ClassRepository> = store.clone();
        let sessions: Arc<dyn StudySessionStore> = store.clone();
        let queries: Arc<dyn StudySessionQueries> = store.clone();
        let feedback: Arc<dyn FeedbackRepository> = store;

        Self {
            register_user_handler: Arc::new(RegisterUserHandler::new(users.clone())),
            create_class_handler: Arc::new(CreateClassHandler::new(classes.clone())),
            record_session_handler: Arc::new(RecordSessionHandler::new(classes.clone(), sessions)),
            weekly_totals_handler: Arc::new(WeeklyTotalsHandler::new(queries.clone(), clock.clone())),
            leaderboard_handler: Arc::new(LeaderboardHandler::new(
                queries,
                users.clone(),
                clock.clone(),
                leaderboard_limit,
            )),
            post_feedback_handler: Arc::new(PostFeedbackHandler::new(feedback.clone())),
            feedback_board_handler: Arc::new(FeedbackBoardHandler::new(feedback)),
            clock,
            users,
            classes,
        }
    }
}
