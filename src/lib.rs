//! A deterministic personal auto-scheduler core.
//!
//! Given a set of immovable calendar occupations and a set of schedulable
//! work items, [`generate_schedule`] produces a concrete assignment of
//! time-intervals to items over a planning horizon, together with
//! diagnostics for items it could not place and invariants it had to bend.
//! Identical inputs always yield identical output: the function is pure,
//! synchronous, and never touches the wall clock except through its `now`
//! argument.
//!
//! This crate has no I/O, no persistence, and no UI - those are
//! collaborators that sit around this core (a tabular task/goal store, an
//! OAuth calendar reader/writer, an LLM-backed draft generator, a
//! presentation layer). See `DESIGN.md` for how each component here is
//! grounded.

pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{SchedulerError, SchedulerResult};
pub use models::{Item, ItemStatus, Occupation, PlacedBlock, PriorityTier, SchedulerConfig, Warning, WarningKind};
pub use services::{generate_schedule, ScheduleResult};
