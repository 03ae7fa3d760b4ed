use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{SchedulerError, SchedulerResult};

/// An immovable interval on the calendar.
///
/// Constructed by upstream collaborators (calendar sync, iCal import, tests)
/// and read-only once it reaches the core: nothing in `services::placement`
/// ever mutates an `Occupation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occupation {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Occupation {
    /// Builds an occupation, rejecting `end <= start` at the boundary so the
    /// core can treat every occupation that reaches it as already valid.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> SchedulerResult<Self> {
        if end <= start {
            return Err(SchedulerError::validation(
                "occupation end must be after start",
            ));
        }
        Ok(Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
            location: None,
            tags: BTreeSet::new(),
        })
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}
