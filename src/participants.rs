use crate::types::{PlayerVariant, PlayerView};

/// A player counts for arbitration only if it is a live, primary,
/// non-cosmetic, non-ghost human character.
pub fn is_safe_player(player: &PlayerView) -> bool {
    player.variant == PlayerVariant::Player
        && !player.dead
        && player.main_twin_index == player.entity_index
        && player.baby_skin.is_none()
        && !player.coop_ghost
}

/// Roster order is preserved.
pub fn safe_players(roster: &[PlayerView]) -> Vec<PlayerView> {
    roster
        .iter()
        .filter(|player| is_safe_player(player))
        .cloned()
        .collect()
}
