use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::modules::study_sessions::use_cases::leaderboard::projection::LeaderboardEntry;
use crate::modules::study_sessions::use_cases::weekly_totals::inbound::http::WeekParams;
use crate::shared::core::primitives::ClassId;
use crate::shared::core::week::WeekStart;
use crate::shell::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub class_id: ClassId,
    pub week_start: WeekStart,
    pub leaderboard: Vec<LeaderboardEntry>,
}

pub async fn handle(
    State(state): State<AppState>,
    Path(class_id): Path<ClassId>,
    Query(params): Query<WeekParams>,
) -> Response {
    match state
        .leaderboard_handler
        .handle(class_id, params.week_start.as_deref())
        .await
    {
        Ok((week_start, leaderboard)) => Json(LeaderboardResponse {
            class_id,
            week_start,
            leaderboard,
        })
        .into_response(),
        Err(err) => err.into_response(),
    }
}
