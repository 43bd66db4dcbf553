use std::collections::BTreeMap;
use std::sync::Arc;

use crate::modules::study_sessions::core::ports::StudySessionQueries;
use crate::shared::application::errors::ApplicationError;
use crate::shared::core::clock::Clock;
use crate::shared::core::primitives::{ClassId, UserId};
use crate::shared::core::week::WeekStart;

pub struct WeeklyTotalsHandler {
    queries: Arc<dyn StudySessionQueries>,
    clock: Arc<dyn Clock>,
}

impl WeeklyTotalsHandler {
    pub fn new(queries: Arc<dyn StudySessionQueries>, clock: Arc<dyn Clock>) -> Self {
        Self { queries, clock }
    }

    pub async fn weekly_total(
        &self,
        user_id: UserId,
        class_id: ClassId,
        week_start: Option<&str>,
    ) -> Result<(WeekStart, u64), ApplicationError> {
        let week = WeekStart::parse_or_current(week_start, self.clock.as_ref())?;
        let total = self.queries.sum_seconds(user_id, class_id, week).await?;
        Ok((week, total))
    }

    pub async fn all_weekly_totals(
        &self,
        user_id: UserId,
        week_start: Option<&str>,
    ) -> Result<(WeekStart, BTreeMap<ClassId, u64>), ApplicationError> {
        let week = WeekStart::parse_or_current(week_start, self.clock.as_ref())?;
        let totals = self.queries.sum_seconds_by_class(user_id, week).await?;
        Ok((week, totals))
    }
}
