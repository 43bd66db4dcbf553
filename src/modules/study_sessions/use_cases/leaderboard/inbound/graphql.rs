use async_graphql::{Context, Object, Result as GqlResult, SimpleObject};

use crate::shared::application::errors::ApplicationError;
use crate::modules::study_sessions::use_cases::leaderboard::projection::LeaderboardEntry;
use crate::shared::core::primitives::{ClassId, UserId};
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlLeaderboardEntry {
    pub rank: u32,
    pub user_id: UserId,
    pub username: String,
    pub total_seconds: u64,
}

impl From<LeaderboardEntry> for GqlLeaderboardEntry {
    fn from(e: LeaderboardEntry) -> Self {
        Self {
            rank: e.rank,
            user_id: e.user_id,
            username: e.username,
            total_seconds: e.total_seconds,
        }
    }
}

#[derive(Default)]
pub struct LeaderboardQuery;

#[Object]
impl LeaderboardQuery {
    async fn leaderboard(
        &self,
        context: &Context<'_>,
        class_id: ClassId,
        week_start: Option<String>,
    ) -> GqlResult<Vec<GqlLeaderboardEntry>> {
        let state = context.data_unchecked::<AppState>();
        let (_, entries) = state
            .leaderboard_handler
            .handle(class_id, week_start.as_deref())
            .await
            .map_err(ApplicationError::into_graphql)?;
        Ok(entries.into_iter().map(GqlLeaderboardEntry::from).collect())
    }
}
