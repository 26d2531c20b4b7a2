use std::fs;
use std::path::Path;

use anyhow::Result;
use chrono::Datelike;
use tracing::info;

use penalty_tracker::analysis::{self, Period};
use penalty_tracker::data_loader;
use penalty_tracker::records;
use penalty_tracker::report::{self, DashboardSummary};
use penalty_tracker::scoring::{score_entities, Role};
use penalty_tracker::scoring_context::ScoringContext;

// The sheet export lands in data/penalty.csv; the generated stand-in keeps
// the dashboard alive when the export is missing or empty.
const PRIMARY_DATA: &str = "data/penalty.csv";
const FALLBACK_DATA: &str = "data/pseudo_penalty.csv";
const SUMMARY_OUT: &str = "data/dashboard_summary.json";

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    // Adjust the model here; defaults carry the documented point tables and
    // the 45-day half-life.
    let ctx = ScoringContext::default();

    let log = data_loader::load_data(Path::new(PRIMARY_DATA), Path::new(FALLBACK_DATA))?;
    info!("loaded {} attempts", log.len());

    let shooters = score_entities(&log, Role::Shooter, None, &ctx);
    let keepers = score_entities(&log, Role::Keeper, None, &ctx);
    let overall = analysis::overall_statistics(&log, Some(ctx.recent_days_filter), Period::Days);

    report::print_overall(&overall);
    report::print_leaderboard("Shooter leaderboard (time-weighted)", &shooters, ctx.leaderboard_size);
    report::print_leaderboard("Keeper leaderboard (time-weighted)", &keepers, ctx.leaderboard_size);

    // Month-in-focus panels: the latest session month, scoped the way the
    // dashboard scopes its per-player and per-keeper pages.
    if let Some(latest) = log.iter().map(|a| a.date).max() {
        let range = analysis::month_bounds(latest.year(), latest.month());
        let month = latest.format("%Y-%m").to_string();

        let selected: Vec<String> = shooters
            .iter()
            .take(ctx.trend_players_shown)
            .map(|row| row.name.clone())
            .collect();
        let form = analysis::status_counts_over_time(&log, &selected, range);
        report::print_month_form(&month, &form);

        if let Some(top_keeper) = keepers.first() {
            let slices = analysis::keeper_outcome_distribution(&log, &top_keeper.name, range);
            report::print_keeper_focus(&top_keeper.name, &month, &slices);
        }
    }

    let summary = DashboardSummary {
        overall,
        shooter_leaderboard: shooters,
        keeper_leaderboard: keepers,
        monthly_trend: analysis::overall_trend(&log, None),
        monthly_outcomes: analysis::monthly_outcome_distribution(&log, None),
        keeper_save_rates: analysis::save_percentage(&log, None),
        longest_goal_streak: records::longest_goal_streak(&log),
        most_goals_in_session: records::most_goals_in_session(&log),
        most_saves_in_session: records::most_saves_in_session(&log),
        marathon_man: records::marathon_man(&log),
        mysterious_ninja: records::mysterious_ninja(&log),
        busiest_day: records::busiest_day(&log),
        biggest_rivalry: records::biggest_rivalry(&log),
    };

    report::print_records(&summary);
    report::print_recent(records::recent_attempts(&log, ctx.recent_attempts_shown));

    let mut json = report::render_json(&summary)?;
    json.push('\n');
    fs::write(SUMMARY_OUT, json)?;
    info!("wrote {SUMMARY_OUT}");

    Ok(())
}
