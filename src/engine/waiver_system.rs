use super::*;

impl Arbiter {
    /// A safe player holding all four shoot inputs yields priority for the
    /// rest of the room. Releasing the inputs does not undo it.
    pub(super) fn update_waivers<H: Host>(&mut self, host: &mut H, safe: &[PlayerView]) {
        for player in safe {
            let holding = WAIVER_ACTIONS
                .iter()
                .all(|action| host.is_action_pressed(*action, player.controller_index));
            if !holding {
                continue;
            }
            if self.room.set_waived(player.player_index) {
                host.animate_happy(player.entity_index);
                self.debug(
                    "priority_waived",
                    json!({
                        "entity": player.entity_index,
                        "player": player.player_index,
                    }),
                );
            }
        }
    }
}
