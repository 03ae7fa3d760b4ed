use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::item::PriorityTier;

/// A concrete time-interval assignment produced by the placement engine.
///
/// `id` is deterministic given its inputs (`item_id` + `chunk_index`), never
/// randomly or wall-clock generated, so two runs over identical inputs
/// produce bit-identical output across repeated runs over identical input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedBlock {
    pub id: String,
    pub item_id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_minutes: u32,
    pub priority_tier: PriorityTier,
    pub chunk_index: u32,
    pub total_chunks: u32,
    pub is_virtual: bool,
    pub is_completed: bool,
}

impl PlacedBlock {
    /// Deterministic block identifier: a pure function of the source item
    /// and chunk index, never a random or time-seeded value.
    pub fn derive_id(item_id: &str, chunk_index: u32) -> String {
        format!("{item_id}#{chunk_index}")
    }
}
