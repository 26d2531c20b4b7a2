use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{Days, Months, NaiveDate};
use serde::Serialize;

use crate::data_loader::{Attempt, Outcome};

/// Unit for the "most recent N ..." window on the overall statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Days,
    Months,
    Years,
}

/// `count / total` as a percentage, with the zero-total rule every caller
/// relies on: an empty group is 0%, never NaN and never a panic.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

fn in_date_range(attempt: &Attempt, date_range: Option<(NaiveDate, NaiveDate)>) -> bool {
    match date_range {
        Some((start, end)) => attempt.date >= start && attempt.date <= end,
        None => true,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OutcomeCount {
    pub outcome: Outcome,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverallStats {
    pub total_attempts: usize,
    pub goal_percentage: f64,
    /// Outcomes that actually occurred, most frequent first.
    pub outcome_counts: Vec<OutcomeCount>,
}

/// Headline numbers for the dashboard, optionally limited to the most
/// recent `num_periods` days/months/years counted back from the latest date
/// in the full log.
pub fn overall_statistics(
    log: &[Attempt],
    num_periods: Option<u32>,
    period: Period,
) -> OverallStats {
    let cutoff = num_periods.and_then(|n| {
        let latest = log.iter().map(|a| a.date).max()?;
        Some(recent_window_start(latest, n, period))
    });

    let scoped: Vec<&Attempt> = match cutoff {
        Some(start) => log.iter().filter(|a| a.date >= start).collect(),
        None => log.iter().collect(),
    };

    let total = scoped.len();
    let goals = scoped.iter().filter(|a| a.outcome == Outcome::Goal).count();

    let mut outcome_counts: Vec<OutcomeCount> = Outcome::ALL
        .iter()
        .map(|&outcome| OutcomeCount {
            outcome,
            count: scoped.iter().filter(|a| a.outcome == outcome).count(),
        })
        .filter(|c| c.count > 0)
        .collect();
    outcome_counts.sort_by(|a, b| b.count.cmp(&a.count));

    OverallStats {
        total_attempts: total,
        goal_percentage: percentage(goals, total),
        outcome_counts,
    }
}

fn recent_window_start(latest: NaiveDate, num_periods: u32, period: Period) -> NaiveDate {
    let start = match period {
        Period::Days => latest.checked_sub_days(Days::new(u64::from(num_periods))),
        Period::Months => latest.checked_sub_months(Months::new(num_periods)),
        Period::Years => latest.checked_sub_months(Months::new(num_periods.saturating_mul(12))),
    };
    start.unwrap_or(NaiveDate::MIN)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCountRow {
    pub date: NaiveDate,
    pub shooter: String,
    pub outcome: Outcome,
    pub count: usize,
}

/// Daily outcome counts for the selected shooters as a dense grid: exactly
/// one row per (date with data in range, selected shooter, outcome), with
/// absent combinations filled as 0 so a chart downstream sees no holes.
/// Rows are ordered by date, shooter name, outcome. An empty selection
/// yields an empty vector.
pub fn status_counts_over_time(
    log: &[Attempt],
    selected_players: &[String],
    date_range: Option<(NaiveDate, NaiveDate)>,
) -> Vec<StatusCountRow> {
    if selected_players.is_empty() {
        return Vec::new();
    }
    let players: BTreeSet<&str> = selected_players.iter().map(String::as_str).collect();

    let filtered: Vec<&Attempt> = log
        .iter()
        .filter(|a| players.contains(a.shooter.as_str()))
        .filter(|a| in_date_range(a, date_range))
        .collect();

    let mut counts: HashMap<(NaiveDate, &str, Outcome), usize> = HashMap::new();
    for a in &filtered {
        *counts
            .entry((a.date, a.shooter.as_str(), a.outcome))
            .or_default() += 1;
    }

    let dates: BTreeSet<NaiveDate> = filtered.iter().map(|a| a.date).collect();

    let mut rows = Vec::with_capacity(dates.len() * players.len() * Outcome::ALL.len());
    for &date in &dates {
        for &shooter in &players {
            for &outcome in &Outcome::ALL {
                let count = counts.get(&(date, shooter, outcome)).copied().unwrap_or(0);
                rows.push(StatusCountRow {
                    date,
                    shooter: shooter.to_owned(),
                    outcome,
                    count,
                });
            }
        }
    }
    rows
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendRow {
    /// Calendar month key, `YYYY-MM`.
    pub month: String,
    pub total_shots: usize,
    pub outcome: Outcome,
    pub percentage: f64,
}

/// Monthly outcome percentages in long form: one row per month and outcome,
/// each carrying the month's total, months ascending. Made for feeding a
/// trend chart directly.
pub fn overall_trend(
    log: &[Attempt],
    date_range: Option<(NaiveDate, NaiveDate)>,
) -> Vec<TrendRow> {
    let monthly = group_by_month(log, date_range);

    let mut rows = Vec::with_capacity(monthly.len() * Outcome::ALL.len());
    for (month, attempts) in &monthly {
        let total = attempts.len();
        for &outcome in &Outcome::ALL {
            let count = attempts.iter().filter(|a| a.outcome == outcome).count();
            rows.push(TrendRow {
                month: month.clone(),
                total_shots: total,
                outcome,
                percentage: percentage(count, total),
            });
        }
    }
    rows
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyOutcomeRow {
    /// Calendar month key, `YYYY-MM`.
    pub month: String,
    pub outcome: Outcome,
    pub percentage: f64,
}

/// Outcome shares per month, normalized so each month's three rows sum
/// to 100. Months ascending, outcomes in canonical order.
pub fn monthly_outcome_distribution(
    log: &[Attempt],
    date_range: Option<(NaiveDate, NaiveDate)>,
) -> Vec<MonthlyOutcomeRow> {
    let monthly = group_by_month(log, date_range);

    let mut rows = Vec::with_capacity(monthly.len() * Outcome::ALL.len());
    for (month, attempts) in &monthly {
        let total = attempts.len();
        for &outcome in &Outcome::ALL {
            let count = attempts.iter().filter(|a| a.outcome == outcome).count();
            rows.push(MonthlyOutcomeRow {
                month: month.clone(),
                outcome,
                percentage: percentage(count, total),
            });
        }
    }
    rows
}

fn group_by_month<'a>(
    log: &'a [Attempt],
    date_range: Option<(NaiveDate, NaiveDate)>,
) -> BTreeMap<String, Vec<&'a Attempt>> {
    let mut monthly: BTreeMap<String, Vec<&Attempt>> = BTreeMap::new();
    for attempt in log.iter().filter(|a| in_date_range(a, date_range)) {
        monthly
            .entry(attempt.date.format("%Y-%m").to_string())
            .or_default()
            .push(attempt);
    }
    monthly
}

#[derive(Debug, Clone, Serialize)]
pub struct OutcomeSlice {
    pub outcome: Outcome,
    pub count: usize,
    pub percentage: f64,
}

/// What happened to everything one keeper faced in range: exactly three
/// rows (goal, saved, out) with counts and shares of the total faced, or an
/// empty vector when the keeper faced nothing. Callers must check for
/// emptiness before reading slices.
pub fn keeper_outcome_distribution(
    log: &[Attempt],
    keeper_name: &str,
    date_range: Option<(NaiveDate, NaiveDate)>,
) -> Vec<OutcomeSlice> {
    let faced: Vec<&Attempt> = log
        .iter()
        .filter(|a| a.keeper == keeper_name)
        .filter(|a| in_date_range(a, date_range))
        .collect();

    if faced.is_empty() {
        return Vec::new();
    }

    let total = faced.len();
    Outcome::ALL
        .iter()
        .map(|&outcome| {
            let count = faced.iter().filter(|a| a.outcome == outcome).count();
            OutcomeSlice {
                outcome,
                count,
                percentage: percentage(count, total),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct KeeperSaveRow {
    pub name: String,
    pub faced: usize,
    pub saves: usize,
    pub save_percentage: f64,
}

/// Save rate per keeper over everything they faced in range, best first.
/// Keepers who faced nothing in range do not appear.
pub fn save_percentage(
    log: &[Attempt],
    date_range: Option<(NaiveDate, NaiveDate)>,
) -> Vec<KeeperSaveRow> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<KeeperSaveRow> = Vec::new();

    for attempt in log.iter().filter(|a| in_date_range(a, date_range)) {
        let idx = *index.entry(attempt.keeper.as_str()).or_insert_with(|| {
            rows.push(KeeperSaveRow {
                name: attempt.keeper.clone(),
                faced: 0,
                saves: 0,
                save_percentage: 0.0,
            });
            rows.len() - 1
        });
        rows[idx].faced += 1;
        if attempt.outcome == Outcome::Saved {
            rows[idx].saves += 1;
        }
    }

    for row in &mut rows {
        row.save_percentage = percentage(row.saves, row.faced);
    }
    rows.sort_by(|a, b| b.save_percentage.total_cmp(&a.save_percentage));
    rows
}

/// First and last day of a calendar month, for scoping a whole month at
/// once. `None` for an out-of-range month number.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    Some((first, last))
}
