// Ports the study_sessions context needs from the outside world.
//
// Sessions are only ever appended. Totals are summed at read time, so the
// write side needs no coordination between concurrent reports.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::modules::study_sessions::core::session::StudySession;
use crate::shared::core::primitives::{ClassId, UserId};
use crate::shared::core::week::WeekStart;
use crate::shared::infrastructure::store::StoreError;

#[async_trait]
pub trait StudySessionStore: Send + Sync {
    /// Fails with `StoreError::Orphan` when the user or class does not exist.
    async fn insert_session(&self, session: StudySession) -> Result<(), StoreError>;
}

#[async_trait]
pub trait StudySessionQueries: Send + Sync {
    /// Sum for one `(user, class, week)` key. 0 when nothing was recorded.
    async fn sum_seconds(
        &self,
        user_id: UserId,
        class_id: ClassId,
        week_start: WeekStart,
    ) -> Result<u64, StoreError>;

    /// Per-class sums for one user and week. Classes without sessions are absent.
    async fn sum_seconds_by_class(
        &self,
        user_id: UserId,
        week_start: WeekStart,
    ) -> Result<BTreeMap<ClassId, u64>, StoreError>;

    /// Per-user sums for one class and week, in no particular order.
    async fn sum_seconds_by_user(
        &self,
        class_id: ClassId,
        week_start: WeekStart,
    ) -> Result<Vec<(UserId, u64)>, StoreError>;
}
