use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::data_loader::{Attempt, Outcome};

/// The longest run of consecutive goals and everyone who achieved it.
/// Empty players with length 0 means the log had no goals at all.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StreakRecord {
    pub players: Vec<String>,
    pub length: u32,
}

/// A best-in-one-session fact, e.g. most goals on a single date.
#[derive(Debug, Clone, Serialize)]
pub struct SessionRecord {
    pub name: String,
    pub date: NaiveDate,
    pub count: u32,
}

/// Tie-inclusive session-attendance extreme (most or fewest distinct dates).
#[derive(Debug, Clone, Default, Serialize)]
pub struct AttendanceRecord {
    pub players: Vec<String>,
    pub sessions: u32,
}

/// The shooter/keeper pair that met most often.
#[derive(Debug, Clone, Serialize)]
pub struct RivalryRecord {
    pub shooter: String,
    pub keeper: String,
    pub encounters: u32,
}

/// Longest run of consecutive goals by any shooter, together with every
/// shooter who matches it. Each shooter's attempts are scanned in date
/// order (stable within a date, so same-day attempts keep log order); an
/// unsorted log cannot split or join a streak.
pub fn longest_goal_streak(log: &[Attempt]) -> StreakRecord {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut per_shooter: Vec<(String, Vec<&Attempt>)> = Vec::new();
    for attempt in log {
        let idx = *index.entry(attempt.shooter.as_str()).or_insert_with(|| {
            per_shooter.push((attempt.shooter.clone(), Vec::new()));
            per_shooter.len() - 1
        });
        per_shooter[idx].1.push(attempt);
    }

    let mut record = StreakRecord::default();
    for (shooter, mut attempts) in per_shooter {
        attempts.sort_by_key(|a| a.date);

        let mut current = 0u32;
        let mut best = 0u32;
        for attempt in attempts {
            if attempt.outcome == Outcome::Goal {
                current += 1;
                best = best.max(current);
            } else {
                current = 0;
            }
        }

        if best > record.length {
            record.length = best;
            record.players = vec![shooter];
        } else if best == record.length && record.length > 0 {
            record.players.push(shooter);
        }
    }
    record
}

/// Most goals one shooter scored on a single date. `None` when the log has
/// no goals at all.
pub fn most_goals_in_session(log: &[Attempt]) -> Option<SessionRecord> {
    best_session(log, Outcome::Goal, |a| a.shooter.as_str())
}

/// Most saves one keeper made on a single date. `None` without any saves.
pub fn most_saves_in_session(log: &[Attempt]) -> Option<SessionRecord> {
    best_session(log, Outcome::Saved, |a| a.keeper.as_str())
}

fn best_session<F>(log: &[Attempt], outcome: Outcome, name_of: F) -> Option<SessionRecord>
where
    F: Fn(&Attempt) -> &str,
{
    let mut counts: BTreeMap<(NaiveDate, &str), u32> = BTreeMap::new();
    for attempt in log.iter().filter(|a| a.outcome == outcome) {
        *counts.entry((attempt.date, name_of(attempt))).or_default() += 1;
    }

    let mut best: Option<SessionRecord> = None;
    for ((date, name), count) in counts {
        if best.as_ref().map_or(true, |b| count > b.count) {
            best = Some(SessionRecord {
                name: name.to_owned(),
                date,
                count,
            });
        }
    }
    best
}

/// Shooter(s) who turned up to the most distinct sessions, tie-inclusive.
pub fn marathon_man(log: &[Attempt]) -> AttendanceRecord {
    attendance_extreme(log, |sessions, best| sessions > best)
}

/// Shooter(s) with the fewest distinct sessions, tie-inclusive. Anyone
/// present in the log attended at least one, so the count is never 0 for a
/// non-empty log.
pub fn mysterious_ninja(log: &[Attempt]) -> AttendanceRecord {
    attendance_extreme(log, |sessions, best| sessions < best)
}

fn attendance_extreme<F>(log: &[Attempt], better: F) -> AttendanceRecord
where
    F: Fn(u32, u32) -> bool,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut attended: Vec<(String, HashSet<NaiveDate>)> = Vec::new();
    for attempt in log {
        let idx = *index.entry(attempt.shooter.as_str()).or_insert_with(|| {
            attended.push((attempt.shooter.clone(), HashSet::new()));
            attended.len() - 1
        });
        attended[idx].1.insert(attempt.date);
    }

    let mut record = AttendanceRecord::default();
    for (name, dates) in attended {
        let sessions = dates.len() as u32;
        if record.players.is_empty() || better(sessions, record.sessions) {
            record.sessions = sessions;
            record.players = vec![name];
        } else if sessions == record.sessions {
            record.players.push(name);
        }
    }
    record
}

/// The date with the most attempts and how many were taken. `None` for an
/// empty log.
pub fn busiest_day(log: &[Attempt]) -> Option<(NaiveDate, u32)> {
    let mut counts: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for attempt in log {
        *counts.entry(attempt.date).or_default() += 1;
    }

    let mut best: Option<(NaiveDate, u32)> = None;
    for (date, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((date, count));
        }
    }
    best
}

/// The most frequent shooter/keeper matchup. A tie goes to the pair that
/// entered the log first.
pub fn biggest_rivalry(log: &[Attempt]) -> Option<RivalryRecord> {
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut pairs: Vec<(String, String, u32)> = Vec::new();
    for attempt in log {
        let idx = *index
            .entry((attempt.shooter.as_str(), attempt.keeper.as_str()))
            .or_insert_with(|| {
                pairs.push((attempt.shooter.clone(), attempt.keeper.clone(), 0));
                pairs.len() - 1
            });
        pairs[idx].2 += 1;
    }

    let mut best: Option<RivalryRecord> = None;
    for (shooter, keeper, encounters) in pairs {
        if best.as_ref().map_or(true, |b| encounters > b.encounters) {
            best = Some(RivalryRecord {
                shooter,
                keeper,
                encounters,
            });
        }
    }
    best
}

/// The trailing `n` rows of the log, for a latest-activity panel.
pub fn recent_attempts(log: &[Attempt], n: usize) -> &[Attempt] {
    &log[log.len().saturating_sub(n)..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()
    }

    fn attempt(date: &str, shooter: &str, keeper: &str, outcome: Outcome) -> Attempt {
        Attempt {
            date: day(date),
            shooter: shooter.to_owned(),
            keeper: keeper.to_owned(),
            outcome,
            position: None,
        }
    }

    #[test]
    fn streak_breaks_on_any_non_goal() {
        let log = vec![
            attempt("2025-01-01", "Milan", "Oliver", Outcome::Goal),
            attempt("2025-01-02", "Milan", "Oliver", Outcome::Goal),
            attempt("2025-01-03", "Milan", "Oliver", Outcome::Out),
            attempt("2025-01-04", "Milan", "Oliver", Outcome::Goal),
        ];

        let record = longest_goal_streak(&log);
        assert_eq!(record.players, vec!["Milan".to_owned()]);
        assert_eq!(record.length, 2);
    }

    #[test]
    fn streak_ties_return_every_holder() {
        let log = vec![
            attempt("2025-01-01", "Milan", "Oliver", Outcome::Goal),
            attempt("2025-01-02", "Milan", "Oliver", Outcome::Goal),
            attempt("2025-01-02", "Milan", "Oliver", Outcome::Goal),
            attempt("2025-01-01", "Jonas", "Oliver", Outcome::Goal),
            attempt("2025-01-02", "Jonas", "Oliver", Outcome::Goal),
            attempt("2025-01-03", "Jonas", "Oliver", Outcome::Goal),
            attempt("2025-01-04", "Felix", "Oliver", Outcome::Saved),
        ];

        let record = longest_goal_streak(&log);
        assert_eq!(record.players, vec!["Milan".to_owned(), "Jonas".to_owned()]);
        assert_eq!(record.length, 3);
    }

    #[test]
    fn streak_is_computed_in_date_order_not_row_order() {
        // The two goal sessions arrive out of order around the miss; sorted
        // by date the sequence is goal, out, goal, so the streak is 1.
        let log = vec![
            attempt("2025-01-01", "Milan", "Oliver", Outcome::Goal),
            attempt("2025-01-03", "Milan", "Oliver", Outcome::Goal),
            attempt("2025-01-02", "Milan", "Oliver", Outcome::Out),
        ];

        let record = longest_goal_streak(&log);
        assert_eq!(record.length, 1);
    }

    #[test]
    fn empty_and_goalless_logs_have_no_streak() {
        let record = longest_goal_streak(&[]);
        assert!(record.players.is_empty());
        assert_eq!(record.length, 0);

        let log = vec![attempt("2025-01-01", "Milan", "Oliver", Outcome::Saved)];
        let record = longest_goal_streak(&log);
        assert!(record.players.is_empty());
        assert_eq!(record.length, 0);
    }

    #[test]
    fn session_records_pick_the_biggest_single_day() {
        let log = vec![
            attempt("2025-01-01", "Milan", "Oliver", Outcome::Goal),
            attempt("2025-01-01", "Milan", "Oliver", Outcome::Goal),
            attempt("2025-01-02", "Milan", "Oliver", Outcome::Goal),
            attempt("2025-01-01", "Jonas", "Oliver", Outcome::Saved),
            attempt("2025-01-02", "Jonas", "Thomas", Outcome::Saved),
            attempt("2025-01-02", "Felix", "Thomas", Outcome::Saved),
        ];

        let goals = most_goals_in_session(&log).unwrap();
        assert_eq!(goals.name, "Milan");
        assert_eq!(goals.date, day("2025-01-01"));
        assert_eq!(goals.count, 2);

        let saves = most_saves_in_session(&log).unwrap();
        assert_eq!(saves.name, "Thomas");
        assert_eq!(saves.date, day("2025-01-02"));
        assert_eq!(saves.count, 2);
    }

    #[test]
    fn session_records_are_none_without_matching_outcomes() {
        let log = vec![attempt("2025-01-01", "Milan", "Oliver", Outcome::Out)];
        assert!(most_goals_in_session(&log).is_none());
        assert!(most_saves_in_session(&log).is_none());
        assert!(most_goals_in_session(&[]).is_none());
    }

    #[test]
    fn attendance_extremes_are_tie_inclusive() {
        let log = vec![
            attempt("2025-01-01", "Milan", "Oliver", Outcome::Goal),
            attempt("2025-01-02", "Milan", "Oliver", Outcome::Out),
            attempt("2025-01-01", "Jonas", "Oliver", Outcome::Saved),
            attempt("2025-01-02", "Jonas", "Oliver", Outcome::Goal),
            attempt("2025-01-01", "Felix", "Oliver", Outcome::Goal),
        ];

        let marathon = marathon_man(&log);
        assert_eq!(marathon.players, vec!["Milan".to_owned(), "Jonas".to_owned()]);
        assert_eq!(marathon.sessions, 2);

        let ninja = mysterious_ninja(&log);
        assert_eq!(ninja.players, vec!["Felix".to_owned()]);
        assert_eq!(ninja.sessions, 1);
    }

    #[test]
    fn attendance_on_empty_log_is_empty() {
        let record = marathon_man(&[]);
        assert!(record.players.is_empty());
        assert_eq!(record.sessions, 0);

        let record = mysterious_ninja(&[]);
        assert!(record.players.is_empty());
        assert_eq!(record.sessions, 0);
    }

    #[test]
    fn busiest_day_counts_all_attempts_per_date() {
        let log = vec![
            attempt("2025-01-01", "Milan", "Oliver", Outcome::Goal),
            attempt("2025-01-02", "Milan", "Oliver", Outcome::Goal),
            attempt("2025-01-02", "Jonas", "Oliver", Outcome::Saved),
        ];

        assert_eq!(busiest_day(&log), Some((day("2025-01-02"), 2)));
        assert_eq!(busiest_day(&[]), None);
    }

    #[test]
    fn rivalry_counts_every_meeting_of_a_pair() {
        let log = vec![
            attempt("2025-01-01", "Milan", "Oliver", Outcome::Goal),
            attempt("2025-01-02", "Milan", "Oliver", Outcome::Saved),
            attempt("2025-01-03", "Milan", "Oliver", Outcome::Out),
            attempt("2025-01-01", "Jonas", "Thomas", Outcome::Goal),
            attempt("2025-01-02", "Jonas", "Thomas", Outcome::Goal),
        ];

        let rivalry = biggest_rivalry(&log).unwrap();
        assert_eq!((rivalry.shooter.as_str(), rivalry.keeper.as_str()), ("Milan", "Oliver"));
        assert_eq!(rivalry.encounters, 3);

        assert!(biggest_rivalry(&[]).is_none());
    }

    #[test]
    fn recent_attempts_returns_the_tail() {
        let log = vec![
            attempt("2025-01-01", "Milan", "Oliver", Outcome::Goal),
            attempt("2025-01-02", "Jonas", "Oliver", Outcome::Saved),
            attempt("2025-01-03", "Felix", "Oliver", Outcome::Out),
        ];

        let tail = recent_attempts(&log, 2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].shooter, "Jonas");

        assert_eq!(recent_attempts(&log, 10).len(), 3);
        assert!(recent_attempts(&[], 5).is_empty());
    }
}
