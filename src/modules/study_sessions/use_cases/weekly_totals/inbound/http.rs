use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::shared::core::primitives::ClassId;
use crate::shared::core::week::WeekStart;
use crate::shell::auth::AuthenticatedUser;
use crate::shell::state::AppState;

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WeekParams {
    pub week_start: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTotalsResponse {
    pub week_start: WeekStart,
    /// Keyed by class id.
    pub totals: BTreeMap<ClassId, u64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTotalResponse {
    pub class_id: ClassId,
    pub week_start: WeekStart,
    pub total_seconds: u64,
}

pub async fn handle_all(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Query(params): Query<WeekParams>,
) -> Response {
    match state
        .weekly_totals_handler
        .all_weekly_totals(user_id, params.week_start.as_deref())
        .await
    {
        Ok((week_start, totals)) => Json(WeeklyTotalsResponse { week_start, totals }).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn handle_one(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(class_id): Path<ClassId>,
    Query(params): Query<WeekParams>,
) -> Response {
    match state
        .weekly_totals_handler
        .weekly_total(user_id, class_id, params.week_start.as_deref())
        .await
    {
        Ok((week_start, total_seconds)) => Json(WeeklyTotalResponse {
            class_id,
            week_start,
            total_seconds,
        })
        .into_response(),
        Err(err) => err.into_response(),
    }
}
