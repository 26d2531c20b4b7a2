use crate::data_loader::Outcome;
use crate::scoring::Role;

/// Every tunable of the analytics model in one place. Build one with
/// `ScoringContext::default()` and adjust fields before handing it to the
/// scoring and report functions.
///
/// The point tables read from the shooter's and the keeper's perspective of
/// the same attempt: a goal is +1.5 for the shooter and -1.0 for the keeper,
/// a save is +1.5 for the keeper, a shot out is -1.0 for the shooter.
#[derive(Debug, Clone)]
pub struct ScoringContext {
    pub shooter_goal_points: f64,
    pub shooter_saved_points: f64,
    pub shooter_out_points: f64,

    pub keeper_goal_points: f64,
    pub keeper_saved_points: f64,
    pub keeper_out_points: f64,

    /// Days until an attempt counts half. Zero or negative disables decay.
    pub half_life_days: f64,

    /// Window for the "recent form" overall statistics on the dashboard.
    pub recent_days_filter: u32,
    /// Rows shown per leaderboard in the report.
    pub leaderboard_size: usize,
    /// Rows shown in the latest-activity panel.
    pub recent_attempts_shown: usize,
    /// Shooters preselected for the month-in-focus form panel.
    pub trend_players_shown: usize,
}

impl Default for ScoringContext {
    fn default() -> Self {
        Self {
            shooter_goal_points: 1.5,
            shooter_saved_points: 0.0,
            shooter_out_points: -1.0,

            keeper_goal_points: -1.0,
            keeper_saved_points: 1.5,
            keeper_out_points: 0.0,

            half_life_days: 45.0,

            recent_days_filter: 365,
            leaderboard_size: 10,
            recent_attempts_shown: 5,
            trend_players_shown: 4,
        }
    }
}

impl ScoringContext {
    /// Base point value of an outcome from one side's perspective.
    pub fn base_points(&self, role: Role, outcome: Outcome) -> f64 {
        match (role, outcome) {
            (Role::Shooter, Outcome::Goal) => self.shooter_goal_points,
            (Role::Shooter, Outcome::Saved) => self.shooter_saved_points,
            (Role::Shooter, Outcome::Out) => self.shooter_out_points,
            (Role::Keeper, Outcome::Goal) => self.keeper_goal_points,
            (Role::Keeper, Outcome::Saved) => self.keeper_saved_points,
            (Role::Keeper, Outcome::Out) => self.keeper_out_points,
        }
    }

    /// Recency weight for an attempt `days_ago` days before the latest one
    /// in the log being scored. Halves every `half_life_days`, so the latest
    /// session weighs 1.0 and very old sessions approach but never reach 0.
    pub fn decay_weight(&self, days_ago: i64) -> f64 {
        if self.half_life_days > 0.0 {
            f64::powf(2.0, -(days_ago as f64) / self.half_life_days)
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_is_one_on_latest_date() {
        let ctx = ScoringContext::default();
        assert_eq!(ctx.decay_weight(0), 1.0);
    }

    #[test]
    fn weight_halves_after_one_half_life() {
        let ctx = ScoringContext {
            half_life_days: 45.0,
            ..ScoringContext::default()
        };
        assert_eq!(ctx.decay_weight(45), 0.5);
        assert_eq!(ctx.decay_weight(90), 0.25);
    }

    #[test]
    fn weight_stays_in_unit_interval_and_decreases() {
        let ctx = ScoringContext::default();
        let mut previous = f64::INFINITY;
        for days_ago in [0, 1, 10, 45, 100, 1000, 10_000] {
            let weight = ctx.decay_weight(days_ago);
            assert!(weight > 0.0 && weight <= 1.0, "weight {weight} out of range");
            assert!(weight < previous || days_ago == 0);
            previous = weight;
        }
    }

    #[test]
    fn zero_or_negative_half_life_disables_decay() {
        for half_life_days in [0.0, -10.0] {
            let ctx = ScoringContext {
                half_life_days,
                ..ScoringContext::default()
            };
            assert_eq!(ctx.decay_weight(0), 1.0);
            assert_eq!(ctx.decay_weight(365), 1.0);
        }
    }

    #[test]
    fn default_point_table_matches_both_perspectives() {
        let ctx = ScoringContext::default();
        assert_eq!(ctx.base_points(Role::Shooter, Outcome::Goal), 1.5);
        assert_eq!(ctx.base_points(Role::Shooter, Outcome::Saved), 0.0);
        assert_eq!(ctx.base_points(Role::Shooter, Outcome::Out), -1.0);
        assert_eq!(ctx.base_points(Role::Keeper, Outcome::Goal), -1.0);
        assert_eq!(ctx.base_points(Role::Keeper, Outcome::Saved), 1.5);
        assert_eq!(ctx.base_points(Role::Keeper, Outcome::Out), 0.0);
    }
}
