use crate::types::{ButtonAction, PedestalKind, RoomKind, TextColor};

pub const MOD_NAME: &str = "Less talking. More gaming.";
pub const CONSOLE_COMMAND: &str = "ltmg";
pub const SAVE_SCOPE: &str = "main";

pub const DEFAULT_CATEGORY: &str = "DEFAULT";

/// Chest variants that are all treated as a locked chest.
pub const RESTRICTED_CHESTS: [PedestalKind; 3] = [
    PedestalKind::LockedChest,
    PedestalKind::EternalChest,
    PedestalKind::BombChest,
];

/// Containers whose identity alone decides the category.
pub const SPECIAL_CONTAINERS: [PedestalKind; 9] = [
    PedestalKind::LockedChest,
    PedestalKind::WoodenChest,
    PedestalKind::OldChest,
    PedestalKind::MomsChest,
    PedestalKind::MomsDressingTable,
    PedestalKind::RedChest,
    PedestalKind::SlotMachine,
    PedestalKind::BloodDonationMachine,
    PedestalKind::FortuneTellingMachine,
];

pub const SHOP_ROOMS: [RoomKind; 2] = [RoomKind::Shop, RoomKind::BlackMarket];

pub const TREASURE_ROOMS: [RoomKind; 4] = [
    RoomKind::Treasure,
    RoomKind::Dungeon,
    RoomKind::Challenge,
    RoomKind::BossRush,
];

pub const ANGEL_ROOMS: [RoomKind; 2] = [RoomKind::Angel, RoomKind::Sacrifice];

/// Rooms that get their own category after normalization.
pub const NOTABLE_ROOMS: [RoomKind; 12] = [
    RoomKind::Shop,
    RoomKind::Error,
    RoomKind::Boss,
    RoomKind::MiniBoss,
    RoomKind::Secret,
    RoomKind::Curse,
    RoomKind::Treasure,
    RoomKind::Angel,
    RoomKind::Library,
    RoomKind::Devil,
    RoomKind::Planetarium,
    RoomKind::UltraSecret,
];

/// All four must be held at once to waive priority.
pub const WAIVER_ACTIONS: [ButtonAction; 4] = [
    ButtonAction::ShootLeft,
    ButtonAction::ShootRight,
    ButtonAction::ShootUp,
    ButtonAction::ShootDown,
];

pub const TAG_SPACING_PX: f32 = 16.0;
pub const TAG_ROW_OFFSET_PX: f32 = 12.0;

pub const CATEGORY_COLOR: TextColor = TextColor {
    r: 0.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};
pub const TURN_COLOR: TextColor = TextColor {
    r: 0.0,
    g: 1.0,
    b: 0.0,
    a: 1.0,
};
pub const WAIT_COLOR: TextColor = TextColor {
    r: 1.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};
