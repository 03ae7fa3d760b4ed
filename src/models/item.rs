use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{SchedulerError, SchedulerResult};

/// Priority classification for a schedulable item.
///
/// Canonicalises on a single closed tier rather than the legacy free-text
/// `priority` string some upstream collaborators still carry; collaborators
/// map their own representation onto this enum at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    Backlog,
    Core,
    Critical,
}

impl Default for PriorityTier {
    fn default() -> Self {
        PriorityTier::Core
    }
}

/// Lifecycle status of an item. `Completed` items still flow through the
/// placement engine (see `Item::status`) so downstream views can render a
/// greyed-out block; they are never rescheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Todo,
    InProgress,
    Completed,
}

/// A unit of work to schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    #[serde(default)]
    pub goal_id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub title: String,
    pub duration_minutes: u32,
    #[serde(default)]
    pub deadline: Option<NaiveDateTime>,
    #[serde(default)]
    pub priority_tier: PriorityTier,
    #[serde(default)]
    pub is_assignment: bool,
    #[serde(default)]
    pub can_split: bool,
    #[serde(default)]
    pub depends_on: BTreeSet<String>,
    #[serde(default)]
    pub pinned_start: Option<NaiveDateTime>,
    #[serde(default)]
    pub status: Option<ItemStatus>,
    /// Set when this item was materialized from a recurrence template
    /// upstream (habits, recurring chores). The core never expands
    /// recurrences itself; it only uses this, together with `deadline`, to
    /// pin the chunker's preferred day (see `services::chunker`).
    #[serde(default)]
    pub recurrence_parent: Option<String>,
}

impl Item {
    pub fn new(id: impl Into<String>, title: impl Into<String>, duration_minutes: u32) -> SchedulerResult<Self> {
        if duration_minutes == 0 {
            return Err(SchedulerError::validation(
                "item duration_minutes must be positive",
            ));
        }
        Ok(Self {
            id: id.into(),
            goal_id: None,
            category: None,
            title: title.into(),
            duration_minutes,
            deadline: None,
            priority_tier: PriorityTier::default(),
            is_assignment: false,
            can_split: false,
            depends_on: BTreeSet::new(),
            pinned_start: None,
            status: None,
            recurrence_parent: None,
        })
    }

    pub fn with_deadline(mut self, deadline: NaiveDateTime) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_priority_tier(mut self, tier: PriorityTier) -> Self {
        self.priority_tier = tier;
        self
    }

    pub fn with_goal_id(mut self, goal_id: impl Into<String>) -> Self {
        self.goal_id = Some(goal_id.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn splittable(mut self) -> Self {
        self.can_split = true;
        self
    }

    pub fn as_assignment(mut self) -> Self {
        self.is_assignment = true;
        self
    }

    pub fn with_depends_on(mut self, ids: impl IntoIterator<Item = String>) -> Self {
        self.depends_on = ids.into_iter().collect();
        self
    }

    pub fn pinned_at(mut self, start: NaiveDateTime) -> Self {
        self.pinned_start = Some(start);
        self
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_recurrence_parent(mut self, parent: impl Into<String>) -> Self {
        self.recurrence_parent = Some(parent.into());
        self
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned_start.is_some()
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.status, Some(ItemStatus::Completed))
    }

    /// Category buckets the slot scorer rewards for deep-work placement.
    pub fn is_deep_work_category(&self) -> bool {
        matches!(
            self.category.as_deref(),
            Some("Business") | Some("Work") | Some("Career")
        )
    }
}
