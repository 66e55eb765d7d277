use std::fmt::Display;

use crate::ledger::FairnessLedger;
use crate::room::RoomObservations;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleQuery {
    ItemCounts,
    ItemPlayerPriorities,
    ItemGroups,
}

impl ConsoleQuery {
    pub fn parse(parameters: &str) -> Option<Self> {
        match parameters.trim() {
            "itemCounts" => Some(Self::ItemCounts),
            "itemPlayerPriorities" => Some(Self::ItemPlayerPriorities),
            "itemGroups" => Some(Self::ItemGroups),
            _ => None,
        }
    }
}

pub fn render_query(
    query: ConsoleQuery,
    ledger: &FairnessLedger,
    room: &RoomObservations,
) -> Vec<String> {
    let mut lines = Vec::new();
    match query {
        ConsoleQuery::ItemCounts => {
            for (player, counts) in ledger.counts() {
                lines.push(format!("- player {player}:"));
                lines.push(map_to_string(counts));
            }
        }
        ConsoleQuery::ItemPlayerPriorities => {
            for (player, priorities) in ledger.priorities() {
                lines.push(format!("- player {player}:"));
                lines.push(map_to_string(priorities));
            }
        }
        ConsoleQuery::ItemGroups => {
            let mut groups: Vec<_> = room.item_groups().iter().collect();
            groups.sort_by_key(|(collectible, _)| **collectible);
            lines.push(map_to_string(groups));
        }
    }
    lines
}

/// `key: value` pairs joined by `, `.
pub fn map_to_string<K, V, I>(entries: I) -> String
where
    K: Display,
    V: Display,
    I: IntoIterator<Item = (K, V)>,
{
    entries
        .into_iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Rng;
    use crate::types::{CategoryLabel, CollectibleType, PlayerIndex};

    #[test]
    fn parse_accepts_known_parameters_only() {
        assert_eq!(ConsoleQuery::parse("itemCounts"), Some(ConsoleQuery::ItemCounts));
        assert_eq!(
            ConsoleQuery::parse(" itemPlayerPriorities "),
            Some(ConsoleQuery::ItemPlayerPriorities)
        );
        assert_eq!(ConsoleQuery::parse("itemGroups"), Some(ConsoleQuery::ItemGroups));
        assert_eq!(ConsoleQuery::parse("itemcounts"), None);
        assert_eq!(ConsoleQuery::parse(""), None);
    }

    #[test]
    fn item_groups_are_listed_by_collectible() {
        let mut room = RoomObservations::new();
        room.remember_category(CollectibleType(30), CategoryLabel::new("SHOP"));
        room.remember_category(CollectibleType(4), CategoryLabel::new("BOSS"));

        let lines = render_query(ConsoleQuery::ItemGroups, &FairnessLedger::new(), &room);
        assert_eq!(lines, vec!["4: BOSS, 30: SHOP".to_string()]);
    }

    #[test]
    fn priorities_are_listed_per_player() {
        let mut ledger = FairnessLedger::new();
        let mut rng = Rng::new(5);
        let secret = CategoryLabel::new("SECRET");
        let value = ledger.get_priority(PlayerIndex(3), &secret, &mut rng);

        let lines = render_query(
            ConsoleQuery::ItemPlayerPriorities,
            &ledger,
            &RoomObservations::new(),
        );
        assert_eq!(lines[0], "- player 3:");
        assert_eq!(lines[1], format!("SECRET: {value}"));
    }

    #[test]
    fn empty_map_renders_empty_line() {
        let empty: Vec<(String, u32)> = Vec::new();
        assert_eq!(map_to_string(empty), "");
    }
}
