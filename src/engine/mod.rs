use serde_json::{json, Value};

use crate::classifier::classify;
use crate::console::{render_query, ConsoleQuery};
use crate::constants::{
    CATEGORY_COLOR, CONSOLE_COMMAND, MOD_NAME, TAG_ROW_OFFSET_PX, TAG_SPACING_PX, TURN_COLOR,
    WAIT_COLOR, WAIVER_ACTIONS,
};
use crate::eligibility::is_eligible;
use crate::host::Host;
use crate::ledger::FairnessLedger;
use crate::logging::{emit_log, LogLevel};
use crate::participants::{is_safe_player, safe_players};
use crate::rng::Rng;
use crate::room::RoomObservations;
use crate::types::{
    CategoryLabel, Collider, CollisionDecision, PedestalView, PickingUpItem, PlayerIndex,
    PlayerView, RankedPlayer, Vec2,
};

mod annotations;
mod ranking;
mod waiver_system;

#[derive(Clone, Debug)]
pub struct ArbiterOptions {
    pub mod_name: String,
    pub console_command: String,
    /// Emit per-pickup diagnostics.
    pub debug: bool,
    pub tag_spacing_px: f32,
    pub tag_row_offset_px: f32,
}

impl Default for ArbiterOptions {
    fn default() -> Self {
        Self {
            mod_name: MOD_NAME.to_string(),
            console_command: CONSOLE_COMMAND.to_string(),
            debug: false,
            tag_spacing_px: TAG_SPACING_PX,
            tag_row_offset_px: TAG_ROW_OFFSET_PX,
        }
    }
}

/// Owns the run ledger and the current room's observations, and answers
/// the host's frame and event callbacks.
#[derive(Clone, Debug)]
pub struct Arbiter {
    options: ArbiterOptions,
    rng: Rng,
    ledger: FairnessLedger,
    room: RoomObservations,
}

impl Arbiter {
    pub fn new(options: ArbiterOptions, rng: Rng) -> Self {
        emit_log(
            LogLevel::Info,
            "arbiter_initialized",
            json!({
                "mod": options.mod_name,
                "command": options.console_command,
            }),
        );
        Self {
            options,
            rng,
            ledger: FairnessLedger::new(),
            room: RoomObservations::new(),
        }
    }

    pub fn ledger(&self) -> &FairnessLedger {
        &self.ledger
    }

    pub fn room(&self) -> &RoomObservations {
        &self.room
    }

    pub fn on_new_run(&mut self) {
        self.ledger = FairnessLedger::new();
        self.room = RoomObservations::new();
    }

    pub fn on_new_room(&mut self) {
        self.room = RoomObservations::new();
    }

    pub fn restore_run(&mut self, ledger: FairnessLedger) {
        self.ledger = ledger;
    }

    /// Per-frame pass: waivers first, then category caching and annotations.
    pub fn post_render<H: Host>(&mut self, host: &mut H) {
        let safe = safe_players(&host.players());
        self.update_waivers(host, &safe);

        let room_kind = host.room_kind();
        for pedestal in host.collectibles() {
            if !is_eligible(&pedestal) {
                continue;
            }
            self.room.remember_category(
                pedestal.collectible,
                classify(pedestal.pedestal_kind, room_kind),
            );
            if safe.len() > 1 {
                self.render_annotations(host, &pedestal, &safe);
            }
        }
    }

    pub fn category_of<H: Host>(&self, host: &H, pedestal: &PedestalView) -> CategoryLabel {
        classify(pedestal.pedestal_kind, host.room_kind())
    }

    /// Vetoes the collision when a safe player who is not the front-runner
    /// touches an eligible pedestal and the front-runner has not waived.
    /// A block leaves the pedestal untouched.
    pub fn pre_pickup_collision<H: Host>(
        &mut self,
        host: &mut H,
        pedestal: &PedestalView,
        collider: &Collider,
    ) -> CollisionDecision {
        let Collider::Player(player) = collider else {
            return CollisionDecision::Allow;
        };
        if !is_eligible(pedestal) || !is_safe_player(player) {
            return CollisionDecision::Allow;
        }

        let ranking = self.rank(host, pedestal);
        let Some(front) = ranking.first().map(|entry| entry.player.player_index) else {
            return CollisionDecision::Allow;
        };
        if self.has_turn(player.player_index, front) {
            return CollisionDecision::Allow;
        }

        if player.extra_animation_finished {
            host.animate_sad(player.entity_index);
        }
        self.debug(
            "pickup_blocked",
            json!({
                "player": player.player_index,
                "frontRunner": front,
                "collectible": pedestal.collectible,
            }),
        );
        CollisionDecision::Block
    }

    /// Counts an acquired passive item or familiar against the category it
    /// was cached under this room. Unknown items are skipped.
    pub fn pre_item_pickup(&mut self, player: &PlayerView, item: PickingUpItem) {
        if !item.item_type.is_passive() {
            return;
        }
        self.debug(
            "item_picked_up",
            json!({
                "entity": player.entity_index,
                "player": player.player_index,
                "itemType": item.item_type,
                "collectible": item.sub_type,
            }),
        );
        if !is_safe_player(player) {
            return;
        }

        let Some(category) = self.room.category_of(item.sub_type).cloned() else {
            self.debug(
                "item_category_unknown",
                json!({ "collectible": item.sub_type }),
            );
            return;
        };
        let count = self.ledger.increment_count(player.player_index, &category);
        self.debug(
            "item_count_incremented",
            json!({
                "player": player.player_index,
                "category": category,
                "count": count,
            }),
        );
    }

    /// Handles the diagnostic console command. Returns `None` for commands
    /// that belong to someone else.
    pub fn execute_command(&self, command: &str, parameters: &str) -> Option<Vec<String>> {
        if command != self.options.console_command {
            return None;
        }
        let lines = match ConsoleQuery::parse(parameters) {
            Some(query) => render_query(query, &self.ledger, &self.room),
            None => vec!["wrong parameter".to_string()],
        };
        for line in &lines {
            emit_log(LogLevel::Info, "console_output", json!({ "line": line }));
        }
        Some(lines)
    }

    fn has_turn(&self, player: PlayerIndex, front: PlayerIndex) -> bool {
        player == front || self.room.has_waived(front)
    }

    fn debug(&self, event: &str, details: Value) {
        if self.options.debug {
            emit_log(LogLevel::Debug, event, details);
        }
    }
}
