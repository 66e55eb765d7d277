use crate::types::{CollectibleType, PedestalView};

/// Whether a pedestal takes part in arbitration at all. Negative prices
/// mark display-only deal items.
pub fn is_eligible(pedestal: &PedestalView) -> bool {
    pedestal.collectible != CollectibleType::NULL
        && pedestal.item_type.is_passive()
        && pedestal.price >= 0
}
