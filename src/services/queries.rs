//! Derived queries over a `ScheduleResult`. None of these
//! recompute the schedule; they only read or lightly transform the output.

use chrono::NaiveDate;

use crate::models::Item;
use crate::services::placement::ScheduleResult;

pub fn blocks_for_day<'a>(result: &'a ScheduleResult, date: NaiveDate) -> Vec<&'a crate::models::PlacedBlock> {
    result
        .scheduled_blocks
        .iter()
        .filter(|block| block.start.date() == date)
        .collect()
}

pub fn total_scheduled_minutes(result: &ScheduleResult, date: NaiveDate) -> i64 {
    blocks_for_day(result, date)
        .iter()
        .map(|block| block.duration_minutes as i64)
        .sum()
}

pub fn is_item_scheduled(result: &ScheduleResult, item_id: &str) -> bool {
    result.scheduled_blocks.iter().any(|block| block.item_id == item_id)
}

/// `item.duration_minutes` minus the sum of its placed blocks, floored at
/// zero. An item with no placed blocks (overloaded, or skipped by the
/// dependency gate) reports its full duration as remaining.
pub fn remaining_duration(result: &ScheduleResult, item: &Item) -> u32 {
    let placed: u32 = result
        .scheduled_blocks
        .iter()
        .filter(|block| block.item_id == item.id)
        .map(|block| block.duration_minutes)
        .sum();
    item.duration_minutes.saturating_sub(placed)
}

/// Returns a copy of `result` with `is_virtual = false` on every block whose
/// start lies within `within_days` of the `now` the schedule was generated
/// against. Used at the boundary when soft plans are promoted to real
/// calendar events; never mutates `result` in place.
pub fn convert_to_hard_bookings(result: &ScheduleResult, within_days: i64) -> ScheduleResult {
    let mut cloned = result.clone();
    for block in &mut cloned.scheduled_blocks {
        let days_out = (block.start.date() - result.now.date()).num_days();
        if days_out <= within_days {
            block.is_virtual = false;
        }
    }
    cloned
}
