//! Placement engine: the one entry point, `generate_schedule`. Two
//! passes — pin everything with a fixed time, then place the rest
//! chunk-by-chunk, day-by-day — plus a post-pass anti-cramming audit.
//!
//! `generate_schedule` is total: it never returns a `Result`. Every
//! condition that would otherwise look like an "error" (an item that can't be fully
//! placed, a policy bent to make room) is data on the `ScheduleResult`,
//! never an exceptional channel (see `error` module docs).

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{Item, Occupation, PlacedBlock, SchedulerConfig, Warning, WarningKind};
use crate::services::free_intervals::FreeInterval;
use crate::services::{calendar, chunker, free_intervals, prioritizer, scorer};

/// Output of `generate_schedule`: plain value types, no callbacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub scheduled_blocks: Vec<PlacedBlock>,
    pub overloaded: Vec<String>,
    pub warnings: Vec<Warning>,
    /// The `now` this result was generated against, carried along so the
    /// derived queries in `services::queries` (notably
    /// `convert_to_hard_bookings`) don't need a second `now` threaded back
    /// in by the caller.
    pub now: NaiveDateTime,
}

struct ItemAttempt {
    blocks: Vec<PlacedBlock>,
    velocity_increments: Vec<(NaiveDate, String)>,
    used_family_time: bool,
}

/// The core's single entry point. Pure, synchronous, total.
pub fn generate_schedule(
    now: NaiveDateTime,
    occupations: &[Occupation],
    items: &[Item],
    config: &SchedulerConfig,
) -> ScheduleResult {
    debug!(
        occupations = occupations.len(),
        items = items.len(),
        "generate_schedule: starting"
    );

    // Ambient error model: hard input errors are the caller's responsibility
    // to reject before calling. If a malformed value reaches here anyway it
    // is skipped rather than aborting the whole computation.
    let occupations: Vec<Occupation> = occupations
        .iter()
        .filter(|occ| occ.end > occ.start)
        .cloned()
        .collect();
    let items: Vec<Item> = items
        .iter()
        .filter(|item| item.duration_minutes > 0)
        .cloned()
        .collect();

    let horizon_end = now + Duration::days(config.planning_horizon_days);

    let mut scheduled_blocks: Vec<PlacedBlock> = Vec::new();
    let mut placed_item_ids: HashSet<String> = HashSet::new();
    let mut warnings: Vec<Warning> = Vec::new();
    let mut overloaded: BTreeSet<String> = BTreeSet::new();
    let mut family_warned_items: BTreeSet<String> = BTreeSet::new();

    // Pass 1 - pinned placements. Iterated in id order so the transaction
    // is deterministic even though pinned items carry no relative priority.
    let mut pinned_items: Vec<&Item> = items.iter().filter(|item| item.is_pinned()).collect();
    pinned_items.sort_by(|a, b| a.id.cmp(&b.id));
    for item in pinned_items {
        let start = item.pinned_start.expect("filtered to pinned items");
        let end = calendar::add_minutes(start, item.duration_minutes as i64);
        scheduled_blocks.push(PlacedBlock {
            id: PlacedBlock::derive_id(&item.id, 0),
            item_id: item.id.clone(),
            title: item.title.clone(),
            start,
            end,
            duration_minutes: item.duration_minutes,
            priority_tier: item.priority_tier,
            chunk_index: 0,
            total_chunks: 1,
            is_virtual: is_virtual_block(start, now, config),
            is_completed: item.is_completed(),
        });
        placed_item_ids.insert(item.id.clone());
    }

    // Pass 2 - floating placements.
    let floating_candidates: Vec<Item> = items
        .iter()
        .filter(|item| !item.is_pinned() && !item.is_completed())
        .cloned()
        .collect();
    let ordered = prioritizer::sort_items(&floating_candidates, now);

    let mut velocity: HashMap<(NaiveDate, String), u32> = HashMap::new();

    for item in &ordered {
        if !item.depends_on.iter().all(|dep| placed_item_ids.contains(dep)) {
            // Dependency gate: unmet dependency means skip entirely, no
            // warning - this is not the same as overload.
            continue;
        }

        match attempt_item(item, now, horizon_end, &occupations, &scheduled_blocks, &velocity, config) {
            Some(attempt) => {
                for (day, goal_id) in &attempt.velocity_increments {
                    *velocity.entry((day.clone(), goal_id.clone())).or_insert(0) += 1;
                }
                if attempt.used_family_time {
                    family_warned_items.insert(item.id.clone());
                }
                scheduled_blocks.extend(attempt.blocks);
                placed_item_ids.insert(item.id.clone());
            }
            None => {
                warn!(item_id = %item.id, "generate_schedule: item overloaded");
                overloaded.insert(item.id.clone());
            }
        }
    }

    for item_id in &family_warned_items {
        warnings.push(Warning::for_item(
            WarningKind::FamilyTimeCompromised,
            item_id.clone(),
            format!("item {item_id} required a Family Time override to place"),
        ));
    }
    for item_id in &overloaded {
        warnings.push(Warning::for_item(
            WarningKind::Overloaded,
            item_id.clone(),
            format!("item {item_id} could not be fully placed within its deadline or horizon"),
        ));
    }

    // Post-pass anti-cramming audit.
    for item in items.iter().filter(|i| !overloaded.contains(&i.id)) {
        if let Some(deadline) = item.deadline {
            let item_blocks: Vec<&PlacedBlock> =
                scheduled_blocks.iter().filter(|b| b.item_id == item.id).collect();
            let is_split = item_blocks.iter().any(|b| b.total_chunks > 1);
            if !is_split {
                continue;
            }
            let total: i64 = item_blocks.iter().map(|b| b.duration_minutes as i64).sum();
            if total == 0 {
                continue;
            }
            let on_deadline_day: i64 = item_blocks
                .iter()
                .filter(|b| b.start.date() == deadline.date())
                .map(|b| b.duration_minutes as i64)
                .sum();
            if (on_deadline_day as f64 / total as f64) > 0.5 {
                warnings.push(Warning::for_item(
                    WarningKind::AntiCrammingViolated,
                    item.id.clone(),
                    format!(
                        "item {} has {on_deadline_day} of {total} minutes placed on its deadline day",
                        item.id
                    ),
                ));
            }
        }
    }

    scheduled_blocks.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));

    debug!(
        placed = scheduled_blocks.len(),
        overloaded = overloaded.len(),
        warnings = warnings.len(),
        "generate_schedule: finished"
    );

    ScheduleResult {
        scheduled_blocks,
        overloaded: overloaded.into_iter().collect(),
        warnings,
        now,
    }
}

/// Attempts to place every chunk of `item`. Stages blocks in a local buffer
/// and only returns them if every chunk placed - a transaction discipline
/// so a later chunk's failure can never leave stray earlier chunks behind.
///
/// Every candidate slot is also floored at the latest end of any already-
/// placed block belonging to one of `item.depends_on` - the dependency gate
/// in `generate_schedule` only checks that the dependency is *placed at
/// all*, so this floor is what actually keeps every block of the dependent
/// item after every block of its dependency.
fn attempt_item(
    item: &Item,
    now: NaiveDateTime,
    horizon_end: NaiveDateTime,
    occupations: &[Occupation],
    committed_blocks: &[PlacedBlock],
    velocity: &HashMap<(NaiveDate, String), u32>,
    config: &SchedulerConfig,
) -> Option<ItemAttempt> {
    let chunks = chunker::chunks(item, now, config);

    let limit_date = match item.deadline {
        Some(deadline) => deadline.date().min(horizon_end.date()),
        None => horizon_end.date(),
    };

    let dependency_floor: Option<NaiveDateTime> = item
        .depends_on
        .iter()
        .flat_map(|dep_id| committed_blocks.iter().filter(move |b| &b.item_id == dep_id))
        .map(|b| b.end)
        .max();

    let mut staged_blocks: Vec<PlacedBlock> = Vec::new();
    let mut local_velocity_increments: Vec<(NaiveDate, String)> = Vec::new();
    let mut local_velocity_counts: HashMap<(NaiveDate, String), u32> = HashMap::new();
    let mut used_family_time = false;

    for chunk in &chunks {
        let mut day = chunk.preferred_day;
        let mut placed_this_chunk = false;

        while day <= limit_date {
            if calendar::is_sunday(day) {
                day = day + Duration::days(1);
                continue;
            }

            if let Some(goal_id) = &item.goal_id {
                let key = (day, goal_id.clone());
                let committed = *velocity.get(&key).unwrap_or(&0);
                let staged = *local_velocity_counts.get(&key).unwrap_or(&0);
                if committed + staged >= config.max_items_per_goal_per_day {
                    day = day + Duration::days(1);
                    continue;
                }
            }

            let combined: Vec<PlacedBlock> = committed_blocks
                .iter()
                .cloned()
                .chain(staged_blocks.iter().cloned())
                .collect();
            let mut gaps = free_intervals::gaps_in_day(day, occupations, &combined, config);
            if let Some(floor) = dependency_floor {
                gaps = gaps
                    .into_iter()
                    .filter_map(|g| {
                        if g.end <= floor {
                            None
                        } else if g.start < floor {
                            Some(FreeInterval { start: floor, end: g.end })
                        } else {
                            Some(g)
                        }
                    })
                    .collect();
            }
            gaps.retain(|g| g.duration_minutes() >= 30);

            let (mut regular, family): (Vec<_>, Vec<_>) = gaps
                .into_iter()
                .partition(|g| g.start_hour() < config.family_time_start_hour);

            regular.sort_by(|a, b| {
                let score_a = scorer::score(a, item, chunk.duration_minutes, config);
                let score_b = scorer::score(b, item, chunk.duration_minutes, config);
                score_b.cmp(&score_a).then_with(|| a.start.cmp(&b.start))
            });

            let mut chosen = regular
                .iter()
                .find(|g| g.duration_minutes() >= chunk.duration_minutes as i64)
                .copied();
            let mut via_family_time = false;

            if chosen.is_none()
                && item.is_assignment
                && regular.is_empty()
                && item
                    .deadline
                    .map(|deadline| calendar::minutes_between(day.and_hms_opt(0, 0, 0).unwrap(), deadline) <= 24 * 60)
                    .unwrap_or(false)
            {
                if let Some(slot) = family
                    .iter()
                    .find(|g| g.duration_minutes() >= chunk.duration_minutes as i64)
                {
                    chosen = Some(*slot);
                    via_family_time = true;
                }
            }

            if let Some(slot) = chosen {
                let start = slot.start;
                let end = calendar::add_minutes(start, chunk.duration_minutes as i64);
                staged_blocks.push(PlacedBlock {
                    id: PlacedBlock::derive_id(&item.id, chunk.chunk_index),
                    item_id: item.id.clone(),
                    title: item.title.clone(),
                    start,
                    end,
                    duration_minutes: chunk.duration_minutes,
                    priority_tier: item.priority_tier,
                    chunk_index: chunk.chunk_index,
                    total_chunks: chunk.total_chunks,
                    is_virtual: is_virtual_block(start, now, config),
                    is_completed: false,
                });
                if via_family_time {
                    used_family_time = true;
                }
                if let Some(goal_id) = &item.goal_id {
                    let key = (day, goal_id.clone());
                    *local_velocity_counts.entry(key.clone()).or_insert(0) += 1;
                    local_velocity_increments.push(key);
                }
                placed_this_chunk = true;
                break;
            }

            day = day + Duration::days(1);
        }

        if !placed_this_chunk {
            return None;
        }
    }

    Some(ItemAttempt {
        blocks: staged_blocks,
        velocity_increments: local_velocity_increments,
        used_family_time,
    })
}

fn is_virtual_block(start: NaiveDateTime, now: NaiveDateTime, config: &SchedulerConfig) -> bool {
    (start.date() - now.date()).num_days() > config.planning_horizon_days
}
