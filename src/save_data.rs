use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ledger::FairnessLedger;
use crate::types::{CategoryLabel, PlayerIndex};

pub const SAVE_DATA_VERSION: u8 = 1;

#[derive(Serialize)]
struct SaveDataFile<'a> {
    version: u8,
    scopes: BTreeMap<&'a str, ScopeData<'a>>,
}

#[derive(Serialize)]
struct ScopeData<'a> {
    run: &'a FairnessLedger,
}

#[derive(Deserialize)]
struct SaveDataFileRaw {
    version: u8,
    scopes: HashMap<String, Value>,
}

#[derive(Default, Deserialize)]
struct ScopeDataRaw {
    #[serde(default)]
    run: LedgerRaw,
}

#[derive(Default, Deserialize)]
struct LedgerRaw {
    #[serde(rename = "itemCounts", default)]
    item_counts: HashMap<String, HashMap<String, Value>>,
    #[serde(rename = "itemPlayerPriorities", default)]
    item_priorities: HashMap<String, HashMap<String, Value>>,
}

#[derive(Debug)]
pub enum SaveDataError {
    Serde(serde_json::Error),
    UnsupportedVersion(u8),
    MissingScope(String),
}

impl fmt::Display for SaveDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serde(err) => write!(f, "serde error: {err}"),
            Self::UnsupportedVersion(version) => write!(f, "unsupported version {version}"),
            Self::MissingScope(scope) => write!(f, "scope '{scope}' not found"),
        }
    }
}

impl std::error::Error for SaveDataError {}

impl From<serde_json::Error> for SaveDataError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

/// Converts the run ledger to and from the text handed to the host's
/// save facility. Only the run scope is saved; room observations are
/// rebuilt on entry.
pub struct SaveDataStore {
    scope: String,
}

impl SaveDataStore {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
        }
    }

    pub fn save(&self, ledger: &FairnessLedger) -> Result<String, SaveDataError> {
        let payload = SaveDataFile {
            version: SAVE_DATA_VERSION,
            scopes: BTreeMap::from([(self.scope.as_str(), ScopeData { run: ledger })]),
        };
        Ok(serde_json::to_string_pretty(&payload)?)
    }

    /// Invalid entries are dropped individually; structural problems fail
    /// the whole restore.
    pub fn restore(&self, text: &str) -> Result<FairnessLedger, SaveDataError> {
        let parsed: SaveDataFileRaw = serde_json::from_str(text)?;
        if parsed.version != SAVE_DATA_VERSION {
            return Err(SaveDataError::UnsupportedVersion(parsed.version));
        }
        let Some(raw_scope) = parsed.scopes.get(&self.scope) else {
            return Err(SaveDataError::MissingScope(self.scope.clone()));
        };
        let scope: ScopeDataRaw = serde_json::from_value(raw_scope.clone())?;
        Ok(sanitize_ledger(scope.run, &self.scope))
    }

    pub fn restore_or_default(&self, text: &str) -> FairnessLedger {
        match self.restore(text) {
            Ok(ledger) => ledger,
            Err(error) => {
                eprintln!(
                    "[save-data] failed to restore scope '{}': {error}",
                    self.scope
                );
                FairnessLedger::new()
            }
        }
    }
}

fn sanitize_ledger(raw: LedgerRaw, scope: &str) -> FairnessLedger {
    let mut ledger = FairnessLedger::new();

    for (player_key, counts) in raw.item_counts {
        let Some(player) = parse_player_key(&player_key, scope) else {
            continue;
        };
        for (category, value) in counts {
            match value.as_u64().and_then(|count| u32::try_from(count).ok()) {
                Some(count) => ledger.restore_count(player, CategoryLabel::new(category), count),
                None => eprintln!(
                    "[save-data] dropping invalid count {value} for player {player} / {category} in '{scope}'"
                ),
            }
        }
    }

    for (player_key, priorities) in raw.item_priorities {
        let Some(player) = parse_player_key(&player_key, scope) else {
            continue;
        };
        for (category, value) in priorities {
            match value.as_f64().filter(|priority| (0.0..1.0).contains(priority)) {
                Some(priority) => {
                    ledger.restore_priority(player, CategoryLabel::new(category), priority)
                }
                None => eprintln!(
                    "[save-data] dropping invalid priority {value} for player {player} / {category} in '{scope}'"
                ),
            }
        }
    }

    ledger
}

fn parse_player_key(key: &str, scope: &str) -> Option<PlayerIndex> {
    match key.trim().parse::<u64>() {
        Ok(value) => Some(PlayerIndex(value)),
        Err(error) => {
            eprintln!("[save-data] dropping player entry '{key}' in '{scope}': {error}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SAVE_SCOPE;
    use crate::rng::Rng;

    #[test]
    fn save_then_restore_reproduces_ledger() {
        let mut ledger = FairnessLedger::new();
        let mut rng = Rng::new(8);
        let treasure = CategoryLabel::new("TREASURE");
        ledger.increment_count(PlayerIndex(1), &treasure);
        ledger.increment_count(PlayerIndex(1), &treasure);
        ledger.get_priority(PlayerIndex(1), &treasure, &mut rng);
        ledger.get_priority(PlayerIndex(2), &treasure, &mut rng);

        let store = SaveDataStore::new(SAVE_SCOPE);
        let text = store.save(&ledger).expect("save");
        let restored = store.restore(&text).expect("restore");
        assert_eq!(restored, ledger);
    }

    #[test]
    fn restore_keeps_valid_entries_when_invalid_entries_exist() {
        let raw = r#"{
  "version": 1,
  "scopes": {
    "main": {
      "run": {
        "itemCounts": {
          "7": { "SHOP": 3, "BOSS": -1 },
          "not-a-player": { "SHOP": 1 }
        },
        "itemPlayerPriorities": {
          "7": { "SHOP": 0.25, "BOSS": 1.5, "DEVIL": "x" }
        }
      }
    }
  }
}"#;
        let ledger = SaveDataStore::new("main").restore(raw).expect("restore");
        let shop = CategoryLabel::new("SHOP");
        assert_eq!(ledger.counts().len(), 1);
        assert_eq!(ledger.counts()[&PlayerIndex(7)].len(), 1);
        assert_eq!(ledger.counts()[&PlayerIndex(7)][&shop], 3);
        assert_eq!(ledger.priorities()[&PlayerIndex(7)].len(), 1);
        assert_eq!(ledger.priorities()[&PlayerIndex(7)][&shop], 0.25);
    }

    #[test]
    fn restore_rejects_other_versions_and_missing_scope() {
        let store = SaveDataStore::new("main");
        assert!(matches!(
            store.restore(r#"{"version": 2, "scopes": {}}"#),
            Err(SaveDataError::UnsupportedVersion(2))
        ));
        assert!(matches!(
            store.restore(r#"{"version": 1, "scopes": {"other": {}}}"#),
            Err(SaveDataError::MissingScope(_))
        ));
        assert!(matches!(store.restore("not json"), Err(SaveDataError::Serde(_))));
    }

    #[test]
    fn scope_without_run_restores_empty() {
        let ledger = SaveDataStore::new("main")
            .restore(r#"{"version": 1, "scopes": {"main": {}}}"#)
            .expect("restore");
        assert_eq!(ledger, FairnessLedger::new());
    }

    #[test]
    fn restore_or_default_falls_back_to_empty_ledger() {
        let ledger = SaveDataStore::new("main").restore_or_default("{");
        assert!(ledger.counts().is_empty());
        assert!(ledger.priorities().is_empty());
    }
}
