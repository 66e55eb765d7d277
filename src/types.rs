use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a human participant. Survives entity re-creation,
/// unlike `PlayerView::entity_index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerIndex(pub u64);

impl fmt::Display for PlayerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a pedestal that is stable across frames within a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PickupIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectibleType(pub u32);

impl CollectibleType {
    pub const NULL: Self = Self(0);
}

impl fmt::Display for CollectibleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fairness bucket. Open set: labels are whatever the classifier produces.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryLabel(String);

impl CategoryLabel {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryLabel {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomKind {
    Default,
    Shop,
    Error,
    Treasure,
    Boss,
    MiniBoss,
    Secret,
    SuperSecret,
    Arcade,
    Curse,
    Challenge,
    Library,
    Sacrifice,
    Devil,
    Angel,
    Dungeon,
    BossRush,
    CleanBedroom,
    DirtyBedroom,
    Vault,
    Dice,
    BlackMarket,
    GreedExit,
    Planetarium,
    Teleporter,
    TeleporterExit,
    SecretExit,
    Blue,
    UltraSecret,
}

impl RoomKind {
    pub const ALL: [Self; 29] = [
        Self::Default,
        Self::Shop,
        Self::Error,
        Self::Treasure,
        Self::Boss,
        Self::MiniBoss,
        Self::Secret,
        Self::SuperSecret,
        Self::Arcade,
        Self::Curse,
        Self::Challenge,
        Self::Library,
        Self::Sacrifice,
        Self::Devil,
        Self::Angel,
        Self::Dungeon,
        Self::BossRush,
        Self::CleanBedroom,
        Self::DirtyBedroom,
        Self::Vault,
        Self::Dice,
        Self::BlackMarket,
        Self::GreedExit,
        Self::Planetarium,
        Self::Teleporter,
        Self::TeleporterExit,
        Self::SecretExit,
        Self::Blue,
        Self::UltraSecret,
    ];

    pub fn as_label(self) -> &'static str {
        match self {
            Self::Default => "DEFAULT",
            Self::Shop => "SHOP",
            Self::Error => "ERROR",
            Self::Treasure => "TREASURE",
            Self::Boss => "BOSS",
            Self::MiniBoss => "MINI_BOSS",
            Self::Secret => "SECRET",
            Self::SuperSecret => "SUPER_SECRET",
            Self::Arcade => "ARCADE",
            Self::Curse => "CURSE",
            Self::Challenge => "CHALLENGE",
            Self::Library => "LIBRARY",
            Self::Sacrifice => "SACRIFICE",
            Self::Devil => "DEVIL",
            Self::Angel => "ANGEL",
            Self::Dungeon => "DUNGEON",
            Self::BossRush => "BOSS_RUSH",
            Self::CleanBedroom => "CLEAN_BEDROOM",
            Self::DirtyBedroom => "DIRTY_BEDROOM",
            Self::Vault => "VAULT",
            Self::Dice => "DICE",
            Self::BlackMarket => "BLACK_MARKET",
            Self::GreedExit => "GREED_EXIT",
            Self::Planetarium => "PLANETARIUM",
            Self::Teleporter => "TELEPORTER",
            Self::TeleporterExit => "TELEPORTER_EXIT",
            Self::SecretExit => "SECRET_EXIT",
            Self::Blue => "BLUE",
            Self::UltraSecret => "ULTRA_SECRET",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_label() == normalized)
    }
}

/// How a collectible is presented: plain pedestal, chest, machine, beggar...
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PedestalKind {
    Default,
    SlotMachine,
    BloodDonationMachine,
    FortuneTellingMachine,
    Beggar,
    DevilBeggar,
    ShellGame,
    KeyMaster,
    BombBum,
    BatteryBum,
    RottenBeggar,
    LockedChest,
    RedChest,
    BombChest,
    SpikedChest,
    EternalChest,
    MomsChest,
    MimicChest,
    OldChest,
    WoodenChest,
    MegaChest,
    HauntedChest,
    MomsDressingTable,
}

impl PedestalKind {
    pub const ALL: [Self; 23] = [
        Self::Default,
        Self::SlotMachine,
        Self::BloodDonationMachine,
        Self::FortuneTellingMachine,
        Self::Beggar,
        Self::DevilBeggar,
        Self::ShellGame,
        Self::KeyMaster,
        Self::BombBum,
        Self::BatteryBum,
        Self::RottenBeggar,
        Self::LockedChest,
        Self::RedChest,
        Self::BombChest,
        Self::SpikedChest,
        Self::EternalChest,
        Self::MomsChest,
        Self::MimicChest,
        Self::OldChest,
        Self::WoodenChest,
        Self::MegaChest,
        Self::HauntedChest,
        Self::MomsDressingTable,
    ];

    pub fn as_label(self) -> &'static str {
        match self {
            Self::Default => "DEFAULT",
            Self::SlotMachine => "SLOT_MACHINE",
            Self::BloodDonationMachine => "BLOOD_DONATION_MACHINE",
            Self::FortuneTellingMachine => "FORTUNE_TELLING_MACHINE",
            Self::Beggar => "BEGGAR",
            Self::DevilBeggar => "DEVIL_BEGGAR",
            Self::ShellGame => "SHELL_GAME",
            Self::KeyMaster => "KEY_MASTER",
            Self::BombBum => "BOMB_BUM",
            Self::BatteryBum => "BATTERY_BUM",
            Self::RottenBeggar => "ROTTEN_BEGGAR",
            Self::LockedChest => "LOCKED_CHEST",
            Self::RedChest => "RED_CHEST",
            Self::BombChest => "BOMB_CHEST",
            Self::SpikedChest => "SPIKED_CHEST",
            Self::EternalChest => "ETERNAL_CHEST",
            Self::MomsChest => "MOMS_CHEST",
            Self::MimicChest => "MIMIC_CHEST",
            Self::OldChest => "OLD_CHEST",
            Self::WoodenChest => "WOODEN_CHEST",
            Self::MegaChest => "MEGA_CHEST",
            Self::HauntedChest => "HAUNTED_CHEST",
            Self::MomsDressingTable => "MOMS_DRESSING_TABLE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_label() == normalized)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Null,
    Passive,
    Trinket,
    Active,
    Familiar,
}

impl ItemType {
    /// Familiars count as passive progression.
    pub fn is_passive(self) -> bool {
        matches!(self, Self::Passive | Self::Familiar)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerVariant {
    Player,
    CoopBaby,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    ShootLeft,
    ShootRight,
    ShootUp,
    ShootDown,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TextColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Per-frame snapshot of a player entity, as reported by the host.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerView {
    /// Transient engine handle; only used for display and twin lookups.
    #[serde(rename = "entityIndex")]
    pub entity_index: i32,
    #[serde(rename = "playerIndex")]
    pub player_index: PlayerIndex,
    #[serde(rename = "controllerIndex")]
    pub controller_index: u32,
    pub variant: PlayerVariant,
    pub dead: bool,
    #[serde(rename = "mainTwinIndex")]
    pub main_twin_index: i32,
    #[serde(rename = "babySkin")]
    pub baby_skin: Option<u32>,
    #[serde(rename = "coopGhost")]
    pub coop_ghost: bool,
    #[serde(rename = "extraAnimationFinished")]
    pub extra_animation_finished: bool,
    pub position: Vec2,
}

/// Per-frame snapshot of a collectible pedestal.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PedestalView {
    #[serde(rename = "pickupIndex")]
    pub pickup_index: PickupIndex,
    pub collectible: CollectibleType,
    #[serde(rename = "itemType")]
    pub item_type: ItemType,
    #[serde(rename = "pedestalKind")]
    pub pedestal_kind: PedestalKind,
    pub price: i32,
    pub blind: bool,
    pub position: Vec2,
}

/// Payload of the "item acquired" event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickingUpItem {
    pub item_type: ItemType,
    pub sub_type: CollectibleType,
}

#[derive(Clone, Debug)]
pub enum Collider {
    Player(PlayerView),
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionDecision {
    Allow,
    Block,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedPlayer {
    pub player: PlayerView,
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_kind_parse_accepts_labels_case_insensitively() {
        assert_eq!(RoomKind::parse("treasure"), Some(RoomKind::Treasure));
        assert_eq!(RoomKind::parse(" ULTRA_SECRET "), Some(RoomKind::UltraSecret));
        assert_eq!(RoomKind::parse("treasure room"), None);
    }

    #[test]
    fn every_pedestal_label_parses_back() {
        for kind in PedestalKind::ALL {
            assert_eq!(PedestalKind::parse(kind.as_label()), Some(kind));
        }
    }

    #[test]
    fn familiars_are_passive() {
        assert!(ItemType::Familiar.is_passive());
        assert!(ItemType::Passive.is_passive());
        assert!(!ItemType::Active.is_passive());
        assert!(!ItemType::Trinket.is_passive());
        assert!(!ItemType::Null.is_passive());
    }

    #[test]
    fn ids_serialize_transparently() {
        let text = serde_json::to_string(&PlayerIndex(7)).expect("serialize");
        assert_eq!(text, "7");
        let label: CategoryLabel = serde_json::from_str("\"SHOP\"").expect("deserialize");
        assert_eq!(label.as_str(), "SHOP");
    }
}
