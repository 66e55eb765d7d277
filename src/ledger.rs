use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::rng::Rng;
use crate::types::{CategoryLabel, PlayerIndex};

pub type CategoryCounts = BTreeMap<CategoryLabel, u32>;
pub type CategoryPriorities = BTreeMap<CategoryLabel, f64>;

/// Per-player, per-category pickup counters and tie-break priorities for
/// one run. Both maps auto-vivify on first access and never shrink.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FairnessLedger {
    #[serde(rename = "itemCounts", default)]
    item_counts: BTreeMap<PlayerIndex, CategoryCounts>,
    #[serde(rename = "itemPlayerPriorities", default)]
    item_priorities: BTreeMap<PlayerIndex, CategoryPriorities>,
}

impl FairnessLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_count(&mut self, player: PlayerIndex, category: &CategoryLabel) -> u32 {
        *self
            .item_counts
            .entry(player)
            .or_default()
            .entry(category.clone())
            .or_insert(0)
    }

    /// Returns the new count.
    pub fn increment_count(&mut self, player: PlayerIndex, category: &CategoryLabel) -> u32 {
        let count = self
            .item_counts
            .entry(player)
            .or_default()
            .entry(category.clone())
            .or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Draws from `rng` only the first time a (player, category) pair is
    /// seen; the stored value is returned afterwards.
    pub fn get_priority(
        &mut self,
        player: PlayerIndex,
        category: &CategoryLabel,
        rng: &mut Rng,
    ) -> f64 {
        *self
            .item_priorities
            .entry(player)
            .or_default()
            .entry(category.clone())
            .or_insert_with(|| rng.next_f64())
    }

    pub fn counts(&self) -> &BTreeMap<PlayerIndex, CategoryCounts> {
        &self.item_counts
    }

    pub fn priorities(&self) -> &BTreeMap<PlayerIndex, CategoryPriorities> {
        &self.item_priorities
    }

    pub(crate) fn restore_count(&mut self, player: PlayerIndex, category: CategoryLabel, count: u32) {
        self.item_counts
            .entry(player)
            .or_default()
            .insert(category, count);
    }

    pub(crate) fn restore_priority(
        &mut self,
        player: PlayerIndex,
        category: CategoryLabel,
        priority: f64,
    ) {
        self.item_priorities
            .entry(player)
            .or_default()
            .insert(category, priority);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_defaults_to_zero_and_materializes() {
        let mut ledger = FairnessLedger::new();
        let treasure = CategoryLabel::new("TREASURE");
        assert!(ledger.counts().is_empty());
        assert_eq!(ledger.get_count(PlayerIndex(1), &treasure), 0);
        assert_eq!(ledger.counts()[&PlayerIndex(1)][&treasure], 0);
    }

    #[test]
    fn count_after_n_increments_is_n() {
        let mut ledger = FairnessLedger::new();
        let shop = CategoryLabel::new("SHOP");
        let mut previous = 0;
        for expected in 1..=5 {
            let next = ledger.increment_count(PlayerIndex(3), &shop);
            assert!(next > previous);
            assert_eq!(next, expected);
            previous = next;
        }
        assert_eq!(ledger.get_count(PlayerIndex(3), &shop), 5);
        assert_eq!(ledger.get_count(PlayerIndex(4), &shop), 0);
    }

    #[test]
    fn priority_is_drawn_once_per_pair() {
        let mut ledger = FairnessLedger::new();
        let mut rng = Rng::new(7);
        let boss = CategoryLabel::new("BOSS");

        let first = ledger.get_priority(PlayerIndex(1), &boss, &mut rng);
        let again = ledger.get_priority(PlayerIndex(1), &boss, &mut rng);
        assert_eq!(first.to_bits(), again.to_bits());
        assert!((0.0..1.0).contains(&first));

        let mut replay = Rng::new(7);
        replay.next_f64();
        let other = ledger.get_priority(PlayerIndex(2), &boss, &mut rng);
        assert_eq!(other.to_bits(), replay.next_f64().to_bits());
    }

    #[test]
    fn serializes_with_camel_case_maps() {
        let mut ledger = FairnessLedger::new();
        ledger.increment_count(PlayerIndex(9), &CategoryLabel::new("DEVIL"));
        let value = serde_json::to_value(&ledger).expect("serialize ledger");
        assert_eq!(value["itemCounts"]["9"]["DEVIL"], 1);
        assert!(value["itemPlayerPriorities"].as_object().is_some());

        let parsed: FairnessLedger = serde_json::from_value(value).expect("deserialize ledger");
        assert_eq!(parsed, ledger);
    }
}
