// Leaderboard ranking over per-user weekly sums.

use serde::Serialize;

use crate::shared::core::primitives::UserId;

pub const DEFAULT_LEADERBOARD_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: UserId,
    pub username: String,
    pub total_seconds: u64,
}

/// Drops zero totals, sorts descending and keeps the first `limit` entries.
///
/// The sort is stable; equal totals keep the order the store grouped them in.
pub fn rank(mut totals: Vec<(UserId, u64)>, limit: usize) -> Vec<(u32, UserId, u64)> {
    totals.retain(|(_, seconds)| *seconds > 0);
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
        .into_iter()
        .take(limit)
        .zip(1u32..)
        .map(|((user_id, seconds), rank)| (rank, user_id, seconds))
        .collect()
}
