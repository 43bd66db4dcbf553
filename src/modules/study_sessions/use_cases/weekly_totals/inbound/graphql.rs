use async_graphql::{Context, Object, Result as GqlResult, SimpleObject};

use crate::shared::application::errors::ApplicationError;
use crate::shared::core::primitives::ClassId;
use crate::shell::auth::require_user;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlWeeklyTotal {
    pub class_id: ClassId,
    pub week_start: String,
    pub total_seconds: u64,
}

#[derive(Default)]
pub struct WeeklyTotalsQuery;

#[Object]
impl WeeklyTotalsQuery {
    /// Caller's seconds for one class in a week (defaults to the current week).
    async fn weekly_total(
        &self,
        context: &Context<'_>,
        class_id: ClassId,
        week_start: Option<String>,
    ) -> GqlResult<GqlWeeklyTotal> {
        let user_id = require_user(context)?;
        let state = context.data_unchecked::<AppState>();
        let (week, total_seconds) = state
            .weekly_totals_handler
            .weekly_total(user_id, class_id, week_start.as_deref())
            .await
            .map_err(ApplicationError::into_graphql)?;
        Ok(GqlWeeklyTotal {
            class_id,
            week_start: week.to_string(),
            total_seconds,
        })
    }

    /// One entry per class the caller studied that week.
    async fn weekly_totals(
        &self,
        context: &Context<'_>,
        week_start: Option<String>,
    ) -> GqlResult<Vec<GqlWeeklyTotal>> {
        let user_id = require_user(context)?;
        let state = context.data_unchecked::<AppState>();
        let (week, totals) = state
            .weekly_totals_handler
            .all_weekly_totals(user_id, week_start.as_deref())
            .await
            .map_err(ApplicationError::into_graphql)?;
        Ok(totals
            .into_iter()
            .map(|(class_id, total_seconds)| GqlWeeklyTotal {
                class_id,
                week_start: week.to_string(),
                total_seconds,
            })
            .collect())
    }
}
