use super::*;

impl Arbiter {
    /// Draws the category above a pedestal and one tag per safe player,
    /// green for whoever may take it and red for everyone else.
    pub(super) fn render_annotations<H: Host>(
        &mut self,
        host: &mut H,
        pedestal: &PedestalView,
        safe: &[PlayerView],
    ) {
        if self.room.is_hidden(pedestal) {
            return;
        }

        let category = self.category_of(host, pedestal);
        let origin = host.world_to_screen(pedestal.position);
        host.render_text(category.as_str(), origin, CATEGORY_COLOR);

        let ranking = self.rank_players(&category, safe.to_vec());
        let Some(front) = ranking.first().map(|entry| entry.player.player_index) else {
            return;
        };

        let mut tagged: Vec<&PlayerView> = ranking.iter().map(|entry| &entry.player).collect();
        tagged.sort_by_key(|player| player.entity_index);
        for (slot, player) in tagged.into_iter().enumerate() {
            let color = if self.has_turn(player.player_index, front) {
                TURN_COLOR
            } else {
                WAIT_COLOR
            };
            let position = Vec2::new(
                origin.x + slot as f32 * self.options.tag_spacing_px,
                origin.y + self.options.tag_row_offset_px,
            );
            host.render_text(&format!("J{}", player.entity_index + 1), position, color);
        }
    }
}
