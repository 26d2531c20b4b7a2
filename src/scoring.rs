use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::data_loader::{Attempt, Outcome};
use crate::scoring_context::ScoringContext;

/// Which side of the duel is being scored. The same attempt contributes to
/// both leaderboards under different point tables, since a goal scored is
/// simultaneously a goal conceded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Shooter,
    Keeper,
}

impl Role {
    /// Identity column the role groups by.
    fn entity_name<'a>(&self, attempt: &'a Attempt) -> &'a str {
        match self {
            Role::Shooter => &attempt.shooter,
            Role::Keeper => &attempt.keeper,
        }
    }
}

/// An attempt annotated with its age and recency weight.
#[derive(Debug, Clone)]
pub struct WeightedAttempt<'a> {
    pub attempt: &'a Attempt,
    pub days_ago: i64,
    pub weight: f64,
}

/// Annotates every attempt with `days_ago` and a decay weight. The weight
/// reference is the latest date of the slice itself, so a filtered log gets
/// weighted against its own most recent session, not the whole dataset's.
/// An empty slice yields an empty vector.
pub fn apply_time_decay<'a>(log: &'a [Attempt], ctx: &ScoringContext) -> Vec<WeightedAttempt<'a>> {
    let Some(latest) = log.iter().map(|a| a.date).max() else {
        return Vec::new();
    };

    log.iter()
        .map(|attempt| {
            let days_ago = latest.signed_duration_since(attempt.date).num_days();
            WeightedAttempt {
                attempt,
                days_ago,
                weight: ctx.decay_weight(days_ago),
            }
        })
        .collect()
}

/// One leaderboard row: the time-weighted score plus raw outcome counts for
/// display. Counts are never weighted.
#[derive(Debug, Clone, Serialize)]
pub struct EntityScore {
    pub name: String,
    pub score: f64,
    pub goals: u32,
    pub saved: u32,
    pub out: u32,
}

/// Scores every entity appearing in the (optionally date-filtered) log and
/// returns them best first. Each attempt contributes its base points times
/// its decay weight; entities without attempts in range are simply absent,
/// and an empty range yields an empty table rather than an error.
///
/// Ties sort stably in first-appearance order of the input log.
pub fn score_entities(
    log: &[Attempt],
    role: Role,
    date_range: Option<(NaiveDate, NaiveDate)>,
    ctx: &ScoringContext,
) -> Vec<EntityScore> {
    let filtered: Vec<Attempt> = match date_range {
        Some((start, end)) => log
            .iter()
            .filter(|a| a.date >= start && a.date <= end)
            .cloned()
            .collect(),
        None => log.to_vec(),
    };

    let weighted = apply_time_decay(&filtered, ctx);

    // Accumulate in first-appearance order so the stable sort below breaks
    // ties by input order.
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<EntityScore> = Vec::new();

    for w in &weighted {
        let name = role.entity_name(w.attempt);
        let idx = *index.entry(name.to_owned()).or_insert_with(|| {
            rows.push(EntityScore {
                name: name.to_owned(),
                score: 0.0,
                goals: 0,
                saved: 0,
                out: 0,
            });
            rows.len() - 1
        });

        rows[idx].score += ctx.base_points(role, w.attempt.outcome) * w.weight;
        match w.attempt.outcome {
            Outcome::Goal => rows[idx].goals += 1,
            Outcome::Saved => rows[idx].saved += 1,
            Outcome::Out => rows[idx].out += 1,
        }
    }

    rows.sort_by(|a, b| b.score.total_cmp(&a.score));
    rows
}
