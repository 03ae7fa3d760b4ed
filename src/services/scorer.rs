//! Slot scorer: ranks already-eligible free intervals for a chunk.
//! No penalties — the scorer only chooses among slots the engine has
//! already decided are usable.

use crate::models::{Item, PriorityTier, SchedulerConfig};
use crate::services::free_intervals::FreeInterval;

const BASE_SCORE: i64 = 100;
const DEEP_WORK_BONUS: i64 = 50;
const CRITICAL_BONUS: i64 = 40;
const CORE_BONUS: i64 = 15;
const SIZE_FIT_BONUS: i64 = 25;

pub fn score(interval: &FreeInterval, item: &Item, chunk_duration_minutes: u32, config: &SchedulerConfig) -> i64 {
    let mut total = BASE_SCORE;

    if item.is_deep_work_category() && config.deep_work_hours.contains(interval.start_hour()) {
        total += DEEP_WORK_BONUS;
    }

    total += match item.priority_tier {
        PriorityTier::Critical => CRITICAL_BONUS,
        PriorityTier::Core => CORE_BONUS,
        PriorityTier::Backlog => 0,
    };

    if interval.duration_minutes() >= chunk_duration_minutes as i64 {
        total += SIZE_FIT_BONUS;
    }

    total
}
