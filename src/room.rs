use std::collections::HashMap;

use crate::types::{CategoryLabel, CollectibleType, PedestalView, PickupIndex, PlayerIndex};

/// State that lives for a single room visit. Rebuilt wholesale on every
/// room transition.
#[derive(Clone, Debug, Default)]
pub struct RoomObservations {
    item_groups: HashMap<CollectibleType, CategoryLabel>,
    waivers: HashMap<PlayerIndex, bool>,
    hidden_pickups: HashMap<PickupIndex, bool>,
}

impl RoomObservations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remember_category(&mut self, collectible: CollectibleType, category: CategoryLabel) {
        self.item_groups.insert(collectible, category);
    }

    pub fn category_of(&self, collectible: CollectibleType) -> Option<&CategoryLabel> {
        self.item_groups.get(&collectible)
    }

    pub fn item_groups(&self) -> &HashMap<CollectibleType, CategoryLabel> {
        &self.item_groups
    }

    pub fn has_waived(&self, player: PlayerIndex) -> bool {
        self.waivers.get(&player).copied().unwrap_or(false)
    }

    /// Returns true only on the false-to-true transition.
    pub fn set_waived(&mut self, player: PlayerIndex) -> bool {
        let flag = self.waivers.entry(player).or_insert(false);
        let newly_set = !*flag;
        *flag = true;
        newly_set
    }

    /// The blind flag seen the first time a pickup is observed in this room
    /// sticks for the rest of the visit.
    pub fn is_hidden(&mut self, pedestal: &PedestalView) -> bool {
        *self
            .hidden_pickups
            .entry(pedestal.pickup_index)
            .or_insert(pedestal.blind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItemType, PedestalKind, Vec2};

    fn pedestal(index: u64, blind: bool) -> PedestalView {
        PedestalView {
            pickup_index: PickupIndex(index),
            collectible: CollectibleType(20),
            item_type: ItemType::Passive,
            pedestal_kind: PedestalKind::Default,
            price: 0,
            blind,
            position: Vec2::default(),
        }
    }

    #[test]
    fn waiver_reports_only_first_transition() {
        let mut room = RoomObservations::new();
        assert!(!room.has_waived(PlayerIndex(1)));
        assert!(room.set_waived(PlayerIndex(1)));
        assert!(!room.set_waived(PlayerIndex(1)));
        assert!(room.has_waived(PlayerIndex(1)));
        assert!(!room.has_waived(PlayerIndex(2)));
    }

    #[test]
    fn hidden_flag_is_memoized_per_pickup() {
        let mut room = RoomObservations::new();
        assert!(room.is_hidden(&pedestal(4, true)));
        assert!(room.is_hidden(&pedestal(4, false)));
        assert!(!room.is_hidden(&pedestal(5, false)));
        assert!(!room.is_hidden(&pedestal(5, true)));
    }

    #[test]
    fn category_cache_overwrites_with_latest_value() {
        let mut room = RoomObservations::new();
        assert!(room.category_of(CollectibleType(20)).is_none());
        room.remember_category(CollectibleType(20), CategoryLabel::new("SHOP"));
        room.remember_category(CollectibleType(20), CategoryLabel::new("SHOP"));
        assert_eq!(
            room.category_of(CollectibleType(20)).map(CategoryLabel::as_str),
            Some("SHOP")
        );
        assert_eq!(room.item_groups().len(), 1);
    }
}
