//! Tier classification of a ranked field.
//!
//! A player's tier depends on three things: their position in the ranking
//! (as a percentile of the eligible field), their TOP percentage, and their
//! points relative to the field's average. Thresholds are scaled from the
//! average points of players with at least one TOP.

use crate::models::{PlayerAggregate, Tier, TierReport, TierSlots, TierThresholds, TieredPlayer};

/// Gate for a capped tier: percentile must be below `max_percentile` and TOP
/// percentage at least `min_top_percentage`.
struct TierGate {
    tier: Tier,
    max_percentile: f64,
    min_top_percentage: f64,
}

const GATES: [TierGate; 3] = [
    TierGate {
        tier: Tier::S,
        max_percentile: 5.0,
        min_top_percentage: 55.0,
    },
    TierGate {
        tier: Tier::A,
        max_percentile: 20.0,
        min_top_percentage: 45.0,
    },
    TierGate {
        tier: Tier::B,
        max_percentile: 45.0,
        min_top_percentage: 35.0,
    },
];

/// Threshold multipliers as (numerator, denominator) of the average.
const S_FACTOR: (u64, u64) = (175, 100);
const A_FACTOR: (u64, u64) = (125, 100);
const B_FACTOR: (u64, u64) = (85, 100);
const C_FACTOR: (u64, u64) = (55, 100);

/// Slot shares of the eligible field as (numerator, denominator).
const S_SLOT_SHARE: (u64, u64) = (5, 100);
const A_SLOT_SHARE: (u64, u64) = (15, 100);
const B_SLOT_SHARE: (u64, u64) = (25, 100);

fn scale_ceil(value: u32, (num, den): (u64, u64)) -> u32 {
    (value as u64 * num).div_ceil(den) as u32
}

fn scale_floor(value: usize, (num, den): (u64, u64)) -> u32 {
    (value as u64 * num / den) as u32
}

/// Ceiling of the mean points of players with at least one TOP, or 0.
pub fn average_points(players: &[PlayerAggregate]) -> u32 {
    let (sum, count) = players
        .iter()
        .filter(|p| p.total_tops > 0)
        .fold((0u64, 0u64), |(sum, count), p| (sum + p.points as u64, count + 1));

    if count == 0 {
        0
    } else {
        sum.div_ceil(count) as u32
    }
}

pub fn tier_thresholds(avg_points: u32) -> TierThresholds {
    TierThresholds {
        s: scale_ceil(avg_points, S_FACTOR),
        a: scale_ceil(avg_points, A_FACTOR),
        b: scale_ceil(avg_points, B_FACTOR),
        c: scale_ceil(avg_points, C_FACTOR),
    }
}

pub fn tier_slots(eligible_count: usize) -> TierSlots {
    TierSlots {
        s: scale_floor(eligible_count, S_SLOT_SHARE).max(1),
        a: scale_floor(eligible_count, A_SLOT_SHARE).max(1),
        b: scale_floor(eligible_count, B_SLOT_SHARE).max(1),
    }
}

/// Position in the ranking as a percentage of the field (0 = best).
pub fn percentile(index: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        index as f64 / total as f64 * 100.0
    }
}

/// Tier for the player at `index` in a ranked field of `total` eligible players.
///
/// Players who never entered a tournament get no tier.
pub fn assign_tier(
    player: &PlayerAggregate,
    index: usize,
    total: usize,
    thresholds: &TierThresholds,
) -> Option<Tier> {
    if !player.is_eligible() {
        return None;
    }

    let pct = percentile(index, total);
    let min_points = |tier: Tier| match tier {
        Tier::S => thresholds.s,
        Tier::A => thresholds.a,
        Tier::B => thresholds.b,
        Tier::C | Tier::D => thresholds.c,
    };

    let gated = GATES.iter().find(|gate| {
        pct < gate.max_percentile
            && player.top_percentage >= gate.min_top_percentage
            && player.points >= min_points(gate.tier)
    });

    match gated {
        Some(gate) => Some(gate.tier),
        None if player.points >= thresholds.c => Some(Tier::C),
        None => Some(Tier::D),
    }
}

/// Classify an already ranked list of players.
///
/// Players without tournaments are dropped; percentiles are taken over the
/// remaining eligible field. Slot counts are reported but never enforced.
pub fn classify(ranked: &[PlayerAggregate]) -> TierReport {
    let avg_points = average_points(ranked);
    let thresholds = tier_thresholds(avg_points);

    let eligible: Vec<&PlayerAggregate> = ranked.iter().filter(|p| p.is_eligible()).collect();
    let total = eligible.len();
    let tier_slots = tier_slots(total);

    let tiered_players = eligible
        .into_iter()
        .enumerate()
        .map(|(index, player)| TieredPlayer {
            rank: index as u32 + 1,
            percentile: percentile(index, total),
            tier: assign_tier(player, index, total, &thresholds),
            player: player.clone(),
        })
        .collect();

    TierReport {
        avg_points,
        thresholds,
        tier_slots,
        tiered_players,
    }
}
