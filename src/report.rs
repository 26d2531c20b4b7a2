use chrono::NaiveDate;
use serde::Serialize;

use crate::analysis::{
    KeeperSaveRow, MonthlyOutcomeRow, OutcomeSlice, OverallStats, StatusCountRow, TrendRow,
};
use crate::data_loader::Attempt;
use crate::records::{AttendanceRecord, RivalryRecord, SessionRecord, StreakRecord};
use crate::scoring::EntityScore;

/// Everything the dashboard front end consumes in one bundle, ready to be
/// exported as JSON.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub overall: OverallStats,
    pub shooter_leaderboard: Vec<EntityScore>,
    pub keeper_leaderboard: Vec<EntityScore>,
    pub monthly_trend: Vec<TrendRow>,
    pub monthly_outcomes: Vec<MonthlyOutcomeRow>,
    pub keeper_save_rates: Vec<KeeperSaveRow>,
    pub longest_goal_streak: StreakRecord,
    pub most_goals_in_session: Option<SessionRecord>,
    pub most_saves_in_session: Option<SessionRecord>,
    pub marathon_man: AttendanceRecord,
    pub mysterious_ninja: AttendanceRecord,
    pub busiest_day: Option<(NaiveDate, u32)>,
    pub biggest_rivalry: Option<RivalryRecord>,
}

pub fn render_json(summary: &DashboardSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}

pub fn print_overall(stats: &OverallStats) {
    println!("\nOverall (recent form)");
    println!(
        "{0:>5} attempts | {1:5.1}% goals",
        stats.total_attempts, stats.goal_percentage
    );
    for entry in &stats.outcome_counts {
        println!("{0:>5} | {1}", entry.count, entry.outcome.label());
    }
}

pub fn print_leaderboard(title: &str, rows: &[EntityScore], top_n: usize) {
    println!("\n{title}");
    for (i, row) in rows.iter().take(top_n).enumerate() {
        println!(
            "|{0:3}. | {1:20} | {2:7.2} | {3:3} goal | {4:3} saved | {5:3} out",
            i + 1,
            row.name,
            row.score,
            row.goals,
            row.saved,
            row.out,
        );
    }
}

pub fn print_records(summary: &DashboardSummary) {
    println!("\nHall of Fame");

    println!(
        "Longest goal streak   : {0} ({1})",
        summary.longest_goal_streak.players.join(", "),
        summary.longest_goal_streak.length,
    );
    if let Some(record) = &summary.most_goals_in_session {
        println!(
            "Most goals in session : {0} on {1} ({2})",
            record.name, record.date, record.count
        );
    }
    if let Some(record) = &summary.most_saves_in_session {
        println!(
            "Most saves in session : {0} on {1} ({2})",
            record.name, record.date, record.count
        );
    }
    println!(
        "Marathon man          : {0} ({1} sessions)",
        summary.marathon_man.players.join(", "),
        summary.marathon_man.sessions,
    );
    println!(
        "Mysterious ninja      : {0} ({1} sessions)",
        summary.mysterious_ninja.players.join(", "),
        summary.mysterious_ninja.sessions,
    );
    if let Some((date, count)) = summary.busiest_day {
        println!("Busiest day           : {date} ({count} attempts)");
    }
    if let Some(rivalry) = &summary.biggest_rivalry {
        println!(
            "Biggest rivalry       : {0} vs {1} ({2} encounters)",
            rivalry.shooter, rivalry.keeper, rivalry.encounters
        );
    }
}

/// Per-day form of the selected shooters in one month; zero rows of the
/// dense grid are skipped on the console.
pub fn print_month_form(month: &str, rows: &[StatusCountRow]) {
    println!("\nForm in {month}");
    for row in rows.iter().filter(|r| r.count > 0) {
        println!(
            "| {0} | {1:20} | {2:5} | {3:3}",
            row.date,
            row.shooter,
            row.outcome.label(),
            row.count,
        );
    }
}

pub fn print_keeper_focus(keeper: &str, month: &str, slices: &[OutcomeSlice]) {
    if slices.is_empty() {
        println!("\n{keeper} faced no shots in {month}");
        return;
    }

    println!("\n{keeper} in {month}");
    for slice in slices {
        println!(
            "{0:>5} | {1:5} | {2:5.1}%",
            slice.count,
            slice.outcome.label(),
            slice.percentage,
        );
    }
}

pub fn print_recent(attempts: &[Attempt]) {
    println!("\nLatest attempts");
    for attempt in attempts {
        println!(
            "| {0} | {1:20} vs {2:20} | {3}",
            attempt.date,
            attempt.shooter,
            attempt.keeper,
            attempt.outcome.label(),
        );
    }
}
