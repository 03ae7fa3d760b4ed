//! Item prioritizer: a stable total ordering of items by tier,
//! deadline urgency, and duration, with the item id as an explicit
//! tiebreaker so the sort is deterministic independent of the host
//! language's default sort stability.

use chrono::NaiveDateTime;

use crate::models::{Item, PriorityTier};
use crate::services::calendar;

const CRITICAL_TIER_SCORE: i64 = 3000;
const CORE_TIER_SCORE: i64 = 1000;
const BACKLOG_TIER_SCORE: i64 = 0;

const DEADLINE_PASSED_BONUS: i64 = 500;
const DEADLINE_WITHIN_3_DAYS_BONUS: i64 = 300;
const DEADLINE_WITHIN_7_DAYS_BONUS: i64 = 100;
const NO_DEADLINE_PENALTY: i64 = -100;

/// Higher is more urgent. Ties broken by item id elsewhere, never here.
pub fn calculate_task_score(item: &Item, now: NaiveDateTime) -> i64 {
    let mut score = match item.priority_tier {
        PriorityTier::Critical => CRITICAL_TIER_SCORE,
        PriorityTier::Core => CORE_TIER_SCORE,
        PriorityTier::Backlog => BACKLOG_TIER_SCORE,
    };

    score += match item.deadline {
        Some(deadline) => {
            let d = calendar::days_until(deadline, now);
            let mut bonus = 0;
            if d <= 0 {
                bonus += DEADLINE_PASSED_BONUS;
            }
            if d <= 3 {
                bonus += DEADLINE_WITHIN_3_DAYS_BONUS;
            }
            if d <= 7 {
                bonus += DEADLINE_WITHIN_7_DAYS_BONUS;
            }
            bonus - d
        }
        None => NO_DEADLINE_PENALTY,
    };

    score -= (item.duration_minutes / 10) as i64;
    score
}

/// Orders `items` by descending `calculate_task_score`, with item id as the
/// deterministic tiebreaker. Does not mutate `items` in place so callers can
/// reuse the input slice.
pub fn sort_items(items: &[Item], now: NaiveDateTime) -> Vec<Item> {
    let mut ordered: Vec<Item> = items.to_vec();
    ordered.sort_by(|a, b| {
        let score_a = calculate_task_score(a, now);
        let score_b = calculate_task_score(b, now);
        score_b.cmp(&score_a).then_with(|| a.id.cmp(&b.id))
    });
    ordered
}
