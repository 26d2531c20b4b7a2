//! Penalty shootout analytics.
//!
//! Takes a flat log of penalty attempts (date, shooter, keeper, outcome) and
//! derives time-weighted leaderboards, outcome distributions and all-time
//! records for the dashboard binary. Every computation is a pure function
//! over the loaded log; nothing here mutates or persists anything.

pub mod analysis;
pub mod data_loader;
pub mod pseudo;
pub mod records;
pub mod report;
pub mod scoring;
pub mod scoring_context;
