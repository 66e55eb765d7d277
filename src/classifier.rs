use crate::constants::{
    ANGEL_ROOMS, DEFAULT_CATEGORY, NOTABLE_ROOMS, RESTRICTED_CHESTS, SHOP_ROOMS, SPECIAL_CONTAINERS,
    TREASURE_ROOMS,
};
use crate::types::{CategoryLabel, PedestalKind, RoomKind};

/// Buckets a collectible by where it came from. Special containers beat the
/// room they sit in; the item itself never matters.
pub fn classify(pedestal_kind: PedestalKind, room_kind: RoomKind) -> CategoryLabel {
    let pedestal_kind = normalize_pedestal(pedestal_kind);
    let room_kind = if pedestal_kind == PedestalKind::MegaChest {
        RoomKind::Treasure
    } else {
        room_kind
    };

    if SPECIAL_CONTAINERS.contains(&pedestal_kind) {
        return CategoryLabel::new(pedestal_kind.as_label());
    }

    let room_kind = normalize_room(room_kind);
    if NOTABLE_ROOMS.contains(&room_kind) {
        return CategoryLabel::new(room_kind.as_label());
    }

    CategoryLabel::new(DEFAULT_CATEGORY)
}

pub fn normalize_pedestal(pedestal_kind: PedestalKind) -> PedestalKind {
    if RESTRICTED_CHESTS.contains(&pedestal_kind) {
        PedestalKind::LockedChest
    } else {
        pedestal_kind
    }
}

pub fn normalize_room(room_kind: RoomKind) -> RoomKind {
    if SHOP_ROOMS.contains(&room_kind) {
        RoomKind::Shop
    } else if TREASURE_ROOMS.contains(&room_kind) {
        RoomKind::Treasure
    } else if ANGEL_ROOMS.contains(&room_kind) {
        RoomKind::Angel
    } else {
        room_kind
    }
}
