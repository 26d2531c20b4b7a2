use std::collections::BTreeMap;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::data_loader::{Attempt, Outcome};

const SHOOTERS: [&str; 12] = [
    "Milan", "Jonas", "Felix", "Luca", "Noah", "Elias", "Samuel", "David", "Julian", "Leon",
    "Timo", "Aaron",
];
const KEEPERS: [&str; 2] = ["Oliver", "Thomas"];
const POSITIONS: [&str; 8] = [
    "top-left",
    "top-right",
    "bottom-left",
    "bottom-right",
    "center-left",
    "center-right",
    "center-top",
    "center-bottom",
];

// Goal/saved/out probabilities. Each shooter draws one profile up front, so
// the generated squad has distinguishable strong and weak finishers.
const OUTCOME_PROFILES: [[f64; 3]; 8] = [
    [0.60, 0.20, 0.20],
    [0.70, 0.15, 0.15],
    [0.50, 0.30, 0.20],
    [0.65, 0.20, 0.15],
    [0.75, 0.10, 0.15],
    [0.55, 0.25, 0.20],
    [0.80, 0.10, 0.10],
    [0.60, 0.30, 0.10],
];

/// Generates a stand-in penalty log: 3-4 session days per ISO week of the
/// span, one keeper on duty per day, `per_player_per_day` attempts for
/// every shooter. Deterministic for a seeded RNG.
pub fn generate<R: Rng>(
    start: NaiveDate,
    end: NaiveDate,
    per_player_per_day: u32,
    rng: &mut R,
) -> Vec<Attempt> {
    let profiles: Vec<WeightedIndex<f64>> = SHOOTERS
        .iter()
        .map(|_| {
            let weights = OUTCOME_PROFILES.choose(rng).expect("profile pool is non-empty");
            WeightedIndex::new(weights.iter().copied()).expect("profile weights are valid")
        })
        .collect();

    // Group the span by ISO week, then sample the session days per week.
    let mut weeks: BTreeMap<(i32, u32), Vec<NaiveDate>> = BTreeMap::new();
    let mut day = start;
    while day <= end {
        let week = day.iso_week();
        weeks.entry((week.year(), week.week())).or_default().push(day);
        let Some(next) = day.succ_opt() else { break };
        day = next;
    }

    let mut session_days: Vec<NaiveDate> = Vec::new();
    for days_in_week in weeks.values() {
        let take = rng.random_range(3..=4).min(days_in_week.len());
        session_days.extend(days_in_week.choose_multiple(rng, take).copied());
    }
    session_days.sort_unstable();

    let mut attempts = Vec::new();
    for &date in &session_days {
        let keeper = *KEEPERS.choose(rng).expect("keeper pool is non-empty");
        for (shooter_idx, &shooter) in SHOOTERS.iter().enumerate() {
            for _ in 0..per_player_per_day {
                let outcome = Outcome::ALL[profiles[shooter_idx].sample(rng)];
                let position = *POSITIONS.choose(rng).expect("position pool is non-empty");
                attempts.push(Attempt {
                    date,
                    shooter: shooter.to_owned(),
                    keeper: keeper.to_owned(),
                    outcome,
                    position: Some(position.to_owned()),
                });
            }
        }
    }
    attempts
}

/// Writes a generated log in the canonical CSV layout the loader reads.
pub fn write_csv(path: &Path, attempts: &[Attempt]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    for attempt in attempts {
        writer.serialize(attempt)?;
    }
    writer.flush()?;
    Ok(())
}
