use serde::{Deserialize, Serialize};

/// A half-open hour range, e.g. `[8, 12)` for the morning deep-work window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourRange {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl HourRange {
    pub const fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    pub fn contains(&self, decimal_hour: f64) -> bool {
        decimal_hour >= self.start_hour as f64 && decimal_hour < self.end_hour as f64
    }
}

/// Whole-number hour at which Friday's workday closes, regardless of
/// `day_end_hour`. Not part of `SchedulerConfig`: the early-close is a
/// calendar fact, not a tunable.
pub const FRIDAY_CLOSE_HOUR: f64 = 17.0;

/// Scheduler-wide tunables, supplied whole to every `generate_schedule`
/// call. The core never reads this from a file, environment variable, or
/// database — that plumbing belongs to the caller, matching the shape the
/// source already serializes preference/constraint payloads in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchedulerConfig {
    pub day_start_hour: u32,
    pub day_end_hour: u32,
    /// Decimal hour, e.g. `17.5` for 17:30.
    pub family_time_start_hour: f64,
    pub deep_work_hours: HourRange,
    pub shallow_hours: HourRange,
    pub planning_horizon_days: i64,
    pub max_items_per_goal_per_day: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            day_start_hour: 8,
            day_end_hour: 22,
            family_time_start_hour: 17.5,
            deep_work_hours: HourRange::new(8, 12),
            shallow_hours: HourRange::new(13, 15),
            planning_horizon_days: 7,
            max_items_per_goal_per_day: 3,
        }
    }
}
