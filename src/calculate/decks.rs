//! Deck usage statistics.

use std::collections::HashMap;

use crate::calculate::calculate_top_percentage;
use crate::models::{DeckUsage, PlacementRecord};

/// Group placement records by deck and count appearances, TOPs and wins.
///
/// Deck names are matched case-insensitively; the first spelling seen is the
/// one reported. Records without a deck are skipped.
pub fn deck_usage(placements: &[PlacementRecord]) -> Vec<DeckUsage> {
    let mut by_deck: HashMap<String, DeckUsage> = HashMap::new();

    for record in placements {
        let Some(deck) = record.deck.as_deref().map(str::trim) else {
            continue;
        };
        if deck.is_empty() {
            continue;
        }

        let usage = by_deck
            .entry(deck.to_lowercase())
            .or_insert_with(|| DeckUsage {
                deck: deck.to_string(),
                appearances: 0,
                tops: 0,
                wins: 0,
                top_rate: 0.0,
            });

        usage.appearances += 1;
        if record.is_top() {
            usage.tops += 1;
        }
        if record.is_winner() {
            usage.wins += 1;
        }
    }

    let mut decks: Vec<DeckUsage> = by_deck
        .into_values()
        .map(|mut usage| {
            usage.top_rate = calculate_top_percentage(usage.tops, usage.appearances);
            usage
        })
        .collect();

    decks.sort_by(|a, b| {
        b.appearances
            .cmp(&a.appearances)
            .then_with(|| b.tops.cmp(&a.tops))
            .then_with(|| a.deck.to_lowercase().cmp(&b.deck.to_lowercase()))
    });
    decks
}
