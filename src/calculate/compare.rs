//! Orderings used to rank players.

use std::cmp::Ordering;

use crate::models::{PenaltyStanding, PlayerAggregate};

/// Performance order, better player first.
///
/// Compares first, second, third and fourth places, then total TOPs, then TOP
/// percentage. Anything still tied is `Equal` so a stable sort keeps the input
/// order.
pub fn compare_performance(a: &PlayerAggregate, b: &PlayerAggregate) -> Ordering {
    b.first_place
        .cmp(&a.first_place)
        .then_with(|| b.second_place.cmp(&a.second_place))
        .then_with(|| b.third_place.cmp(&a.third_place))
        .then_with(|| b.fourth_place.cmp(&a.fourth_place))
        .then_with(|| b.total_tops.cmp(&a.total_tops))
        .then_with(|| b.top_percentage.total_cmp(&a.top_percentage))
}

/// Sort players by performance. Ties keep their input order.
pub fn rank_players(mut players: Vec<PlayerAggregate>) -> Vec<PlayerAggregate> {
    players.sort_by(compare_performance);
    players
}

/// Penalty rate as a percentage of tournaments entered.
pub fn calculate_penalty_rate(total_penalties: u32, total_tournaments: u32) -> f64 {
    if total_tournaments == 0 {
        0.0
    } else {
        total_penalties as f64 / total_tournaments as f64 * 100.0
    }
}

impl From<&PlayerAggregate> for PenaltyStanding {
    fn from(agg: &PlayerAggregate) -> Self {
        Self {
            player_id: agg.player_id.clone(),
            name: agg.name.clone(),
            total_penalties: agg.penalties,
            total_tournaments: agg.total_tournaments,
            penalty_rate: calculate_penalty_rate(agg.penalties, agg.total_tournaments),
        }
    }
}

/// Penalty order, worst offender first: more penalties, then higher rate,
/// then fewer tournaments.
pub fn compare_penalties(a: &PenaltyStanding, b: &PenaltyStanding) -> Ordering {
    b.total_penalties
        .cmp(&a.total_penalties)
        .then_with(|| b.penalty_rate.total_cmp(&a.penalty_rate))
        .then_with(|| a.total_tournaments.cmp(&b.total_tournaments))
}

/// Penalty ranking of every player with at least one penalty.
pub fn rank_penalties(aggregates: &[PlayerAggregate]) -> Vec<PenaltyStanding> {
    let mut standings: Vec<PenaltyStanding> = aggregates
        .iter()
        .filter(|a| a.penalties > 0)
        .map(PenaltyStanding::from)
        .collect();
    standings.sort_by(compare_penalties);
    standings
}
