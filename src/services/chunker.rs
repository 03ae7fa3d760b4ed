//! Chunker: splits an oversized item into 30-120 minute chunks, each
//! carrying a preferred day, honoring split-eligibility, the anti-cramming
//! cap on the deadline day, and distribution across the days remaining.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::models::{Item, SchedulerConfig};

pub const MIN_CHUNK_MINUTES: u32 = 30;
pub const MAX_CHUNK_MINUTES: u32 = 120;
pub const TARGET_CHUNK_MINUTES: u32 = 90;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chunk {
    pub duration_minutes: u32,
    pub preferred_day: NaiveDate,
    pub chunk_index: u32,
    pub total_chunks: u32,
}

/// Splits `item` into a non-empty ordered list of chunks, anchored at
/// `planning_start`.
pub fn chunks(item: &Item, planning_start: NaiveDateTime, config: &SchedulerConfig) -> Vec<Chunk> {
    let planning_date = planning_start.date();
    let recurrence_pinned_day = match (item.recurrence_parent.as_ref(), item.deadline) {
        (Some(_), Some(deadline)) => Some(deadline.date()),
        _ => None,
    };

    if item.duration_minutes <= MAX_CHUNK_MINUTES || !item.can_split {
        let preferred_day = recurrence_pinned_day.unwrap_or(planning_date);
        return vec![Chunk {
            duration_minutes: item.duration_minutes,
            preferred_day,
            chunk_index: 0,
            total_chunks: 1,
        }];
    }

    let sizes = split_sizes(item.duration_minutes);
    let n_chunks = sizes.len() as u32;

    let deadline_or_horizon = item
        .deadline
        .unwrap_or_else(|| planning_start + Duration::days(config.planning_horizon_days));
    let days_available = crate::services::calendar::days_until(deadline_or_horizon, planning_start).max(1);
    let chunks_per_day = ceil_div(n_chunks as i64, days_available).max(1) as u32;
    let due_date_cap = (item.duration_minutes / 2) as i64;

    let deadline_day = item.deadline.map(|d| d.date());
    let mut cursor_day = recurrence_pinned_day.unwrap_or(planning_date);

    let mut out = Vec::with_capacity(sizes.len());
    let mut minutes_on_deadline_day: i64 = 0;
    let mut emitted_since_advance = 0u32;
    let mut any_emitted = false;

    for (index, size) in sizes.iter().copied().enumerate() {
        if let Some(deadline_day) = deadline_day {
            if cursor_day == deadline_day
                && any_emitted
                && minutes_on_deadline_day + size as i64 > due_date_cap
            {
                cursor_day = cursor_day - Duration::days(1);
            }
        }

        out.push(Chunk {
            duration_minutes: size,
            preferred_day: cursor_day,
            chunk_index: index as u32,
            total_chunks: n_chunks,
        });

        if deadline_day == Some(cursor_day) {
            minutes_on_deadline_day += size as i64;
        }
        any_emitted = true;
        emitted_since_advance += 1;

        if emitted_since_advance >= chunks_per_day {
            emitted_since_advance = 0;
            let next_day = cursor_day + Duration::days(1);
            cursor_day = match deadline_day {
                Some(deadline_day) if next_day > deadline_day => deadline_day,
                _ => next_day,
            };
        }
    }

    out
}

/// Divides `duration_minutes` into chunks of at most `TARGET_CHUNK_MINUTES`,
/// never below `MIN_CHUNK_MINUTES`. The naive "peel off 90 minutes at a
/// time" rule can leave a tail smaller than the minimum chunk size (e.g.
/// 200 minutes -> 90, 90, 20); when that happens the shortfall is borrowed
/// from the previous chunk rather than emitted as an undersized block.
fn split_sizes(duration_minutes: u32) -> Vec<u32> {
    let n_chunks = ceil_div(duration_minutes as i64, TARGET_CHUNK_MINUTES as i64) as usize;
    let mut sizes = Vec::with_capacity(n_chunks);
    let mut remaining = duration_minutes as i64;
    for _ in 0..n_chunks {
        let take = remaining.min(TARGET_CHUNK_MINUTES as i64);
        sizes.push(take);
        remaining -= take;
    }

    if sizes.len() >= 2 {
        let last_idx = sizes.len() - 1;
        if sizes[last_idx] < MIN_CHUNK_MINUTES as i64 {
            let deficit = MIN_CHUNK_MINUTES as i64 - sizes[last_idx];
            sizes[last_idx] += deficit;
            sizes[last_idx - 1] -= deficit;
        }
    }

    sizes.into_iter().map(|m| m as u32).collect()
}

fn ceil_div(a: i64, b: i64) -> i64 {
    (a + b - 1).div_euclid(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Item, PriorityTier};
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    #[test]
    fn small_unsplittable_item_is_one_chunk() {
        let item = Item::new("i-1", "Buy diapers", 30).unwrap();
        let config = SchedulerConfig::default();
        let planning_start = dt(2026, 7, 27, 0);
        let result = chunks(&item, planning_start, &config);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].duration_minutes, 30);
        assert_eq!(result[0].total_chunks, 1);
        assert_eq!(result[0].preferred_day, planning_start.date());
    }

    #[test]
    fn item_under_max_chunk_is_not_split_even_if_splittable() {
        let item = Item::new("i-1", "Write memo", 120).unwrap().splittable();
        let config = SchedulerConfig::default();
        let result = chunks(&item, dt(2026, 7, 27, 0), &config);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].duration_minutes, 120);
    }

    #[test]
    fn split_sizes_never_go_below_minimum() {
        for duration in 121..=600u32 {
            let sizes = split_sizes(duration);
            let sum: u32 = sizes.iter().sum();
            assert_eq!(sum, duration, "duration {duration}");
            for size in &sizes {
                assert!(*size >= MIN_CHUNK_MINUTES, "duration {duration} produced {size}");
                assert!(*size <= MAX_CHUNK_MINUTES, "duration {duration} produced {size}");
            }
        }
    }

    #[test]
    fn deep_project_splits_into_two_plus_chunks_summing_to_total() {
        let item = Item::new("i-1", "Deep project", 240)
            .unwrap()
            .splittable()
            .with_priority_tier(PriorityTier::Critical)
            .with_deadline(dt(2026, 7, 28, 23));
        let config = SchedulerConfig::default();
        let result = chunks(&item, dt(2026, 7, 27, 0), &config);
        assert!(result.len() >= 2);
        let sum: u32 = result.iter().map(|c| c.duration_minutes).sum();
        assert_eq!(sum, 240);
        for chunk in &result {
            assert!(chunk.duration_minutes >= MIN_CHUNK_MINUTES);
            assert!(chunk.duration_minutes <= MAX_CHUNK_MINUTES);
        }
    }

    #[test]
    fn recurrence_item_with_deadline_pins_preferred_day_to_deadline() {
        let item = Item::new("habit-1", "Daily run", 45)
            .unwrap()
            .with_recurrence_parent("template-1")
            .with_deadline(dt(2026, 7, 30, 23));
        let config = SchedulerConfig::default();
        let result = chunks(&item, dt(2026, 7, 27, 0), &config);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].preferred_day, NaiveDate::from_ymd_opt(2026, 7, 30).unwrap());
    }

    #[test]
    fn anti_cramming_cap_steps_cursor_back_after_first_chunk() {
        // 240-minute item, deadline two days out: cap is 120 minutes on the
        // deadline day, so the chunker should spread some chunks earlier.
        let item = Item::new("i-1", "Report", 240)
            .unwrap()
            .splittable()
            .with_deadline(dt(2026, 7, 29, 23));
        let config = SchedulerConfig::default();
        let result = chunks(&item, dt(2026, 7, 27, 0), &config);
        let deadline_day = NaiveDate::from_ymd_opt(2026, 7, 29).unwrap();
        let on_deadline: u32 = result
            .iter()
            .filter(|c| c.preferred_day == deadline_day)
            .map(|c| c.duration_minutes)
            .sum();
        assert!(on_deadline <= 120, "deadline-day total was {on_deadline}");
    }
}
