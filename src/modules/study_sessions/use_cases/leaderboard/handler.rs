use std::sync::Arc;

use crate::modules::study_sessions::core::ports::StudySessionQueries;
use crate::modules::study_sessions::use_cases::leaderboard::projection::{LeaderboardEntry, rank};
use crate::modules::users::core::ports::UserRepository;
use crate::shared::application::errors::ApplicationError;
use crate::shared::core::clock::Clock;
use crate::shared::core::primitives::ClassId;
use crate::shared::core::week::WeekStart;

pub struct LeaderboardHandler {
    queries: Arc<dyn StudySessionQueries>,
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
    limit: usize,
}

impl LeaderboardHandler {
    pub fn new(
        queries: Arc<dyn StudySessionQueries>,
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
        limit: usize,
    ) -> Self {
        Self {
            queries,
            users,
            clock,
            limit,
        }
    }

    pub async fn handle(
        &self,
        class_id: ClassId,
        week_start: Option<&str>,
    ) -> Result<(WeekStart, Vec<LeaderboardEntry>), ApplicationError> {
        let week = WeekStart::parse_or_current(week_start, self.clock.as_ref())?;

        let ranked = rank(self.queries.sum_seconds_by_user(class_id, week).await?, self.limit);
        let ids: Vec<_> = ranked.iter().map(|(_, user_id, _)| *user_id).collect();
        let usernames = self.users.usernames(&ids).await?;

        let entries = ranked
            .into_iter()
            .map(|(rank, user_id, total_seconds)| LeaderboardEntry {
                rank,
                user_id,
                username: usernames.get(&user_id).cloned().unwrap_or_default(),
                total_seconds,
            })
            .collect();
        Ok((week, entries))
    }
}
