//! Free-interval synthesiser: turns a day's occupations and
//! already-placed blocks into the ordered list of gaps the placement engine
//! can still use.

use chrono::NaiveDate;

use crate::models::{Occupation, PlacedBlock, SchedulerConfig};
use crate::services::calendar;

/// A gap in the workday. Ephemeral: recomputed for every (date, current
/// placements) pair rather than persisted anywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeInterval {
    pub start: chrono::NaiveDateTime,
    pub end: chrono::NaiveDateTime,
}

impl FreeInterval {
    pub fn duration_minutes(&self) -> i64 {
        calendar::minutes_between(self.start, self.end)
    }

    pub fn start_hour(&self) -> f64 {
        calendar::decimal_hour(self.start)
    }
}

/// Computes the ordered list of free intervals on `date`, bounded by the
/// workday window (with the Friday early-close and the Sunday blackout),
/// after sweeping out every occupation and already-placed block whose
/// start falls on that date.
///
/// Overlapping busy intervals collapse naturally: the sweep cursor only
/// ever advances to `max(cursor, busy.end)`, so a busy interval nested
/// inside a previous one contributes nothing new.
pub fn gaps_in_day(
    date: NaiveDate,
    occupations: &[Occupation],
    already_placed: &[PlacedBlock],
    config: &SchedulerConfig,
) -> Vec<FreeInterval> {
    if calendar::is_sunday(date) {
        return Vec::new();
    }

    let workday_start = calendar::at_decimal_hour(date, config.day_start_hour as f64);
    let workday_end_hour = if calendar::is_friday(date) {
        crate::models::config::FRIDAY_CLOSE_HOUR
    } else {
        config.day_end_hour as f64
    };
    let workday_end = calendar::at_decimal_hour(date, workday_end_hour);

    let mut busy: Vec<(chrono::NaiveDateTime, chrono::NaiveDateTime)> = occupations
        .iter()
        .filter(|occ| occ.start.date() == date)
        .map(|occ| (occ.start, occ.end))
        .chain(
            already_placed
                .iter()
                .filter(|block| block.start.date() == date)
                .map(|block| (block.start, block.end)),
        )
        .collect();
    busy.sort_by_key(|(start, _)| *start);

    let mut gaps = Vec::new();
    let mut cursor = workday_start;
    for (busy_start, busy_end) in busy {
        if cursor < busy_start {
            gaps.push(FreeInterval {
                start: cursor,
                end: busy_start,
            });
        }
        if busy_end > cursor {
            cursor = busy_end;
        }
    }
    if cursor < workday_end {
        gaps.push(FreeInterval {
            start: cursor,
            end: workday_end,
        });
    }

    gaps
}
