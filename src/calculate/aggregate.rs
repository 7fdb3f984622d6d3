//! Stat aggregation: raw records to per-player counters.

use crate::models::{PenaltyRecord, PlacementRecord, Player, PlayerAggregate};

/// Points for a set of top finishes: 1st = 4, 2nd = 3, 3rd and 4th = 2.
pub fn calculate_points(first: u32, second: u32, third: u32, fourth: u32) -> u32 {
    first * 4 + second * 3 + third * 2 + fourth * 2
}

/// Share of tournaments that ended in a TOP, as a percentage.
pub fn calculate_top_percentage(total_tops: u32, total_tournaments: u32) -> f64 {
    if total_tournaments == 0 {
        0.0
    } else {
        total_tops as f64 / total_tournaments as f64 * 100.0
    }
}

/// Aggregate a player's scoped placement and penalty records.
///
/// Every placement record counts as a tournament entered. Placements outside
/// 1..=4 (or missing) count as "did not place".
pub fn aggregate(
    player: &Player,
    placements: &[PlacementRecord],
    penalties: &[PenaltyRecord],
) -> PlayerAggregate {
    let mut counts = [0u32; 4];

    for record in placements {
        if let Some(slot) = record.top_slot() {
            counts[(slot - 1) as usize] += 1;
        }
    }

    let [first_place, second_place, third_place, fourth_place] = counts;
    let total_tournaments = placements.len() as u32;
    let total_tops = first_place + second_place + third_place + fourth_place;

    PlayerAggregate {
        player_id: player.id.clone(),
        name: player.name.clone(),
        image_url: player.image_url.clone(),
        total_tournaments,
        first_place,
        second_place,
        third_place,
        fourth_place,
        total_tops,
        top_percentage: calculate_top_percentage(total_tops, total_tournaments),
        points: calculate_points(first_place, second_place, third_place, fourth_place),
        penalties: penalties.len() as u32,
    }
}
