use std::cmp::Ordering;

use super::*;

impl Arbiter {
    /// Safe players ordered by who is owed an item of this pedestal's
    /// category: fewest pickups first, then lowest stored priority, then
    /// lowest player index.
    pub fn rank<H: Host>(&mut self, host: &H, pedestal: &PedestalView) -> Vec<RankedPlayer> {
        let category = self.category_of(host, pedestal);
        self.rank_players(&category, safe_players(&host.players()))
    }

    pub fn rank_players(
        &mut self,
        category: &CategoryLabel,
        players: Vec<PlayerView>,
    ) -> Vec<RankedPlayer> {
        let mut entries: Vec<(RankedPlayer, f64)> = players
            .into_iter()
            .map(|player| {
                let index = player.player_index;
                let count = self.ledger.get_count(index, category);
                let priority = self.ledger.get_priority(index, category, &mut self.rng);
                (RankedPlayer { player, count }, priority)
            })
            .collect();

        entries.sort_by(|(a, a_priority), (b, b_priority)| {
            compare_entries(
                (a.count, *a_priority, a.player.player_index),
                (b.count, *b_priority, b.player.player_index),
            )
        });
        entries.into_iter().map(|(entry, _)| entry).collect()
    }
}

pub(super) fn compare_entries(
    a: (u32, f64, PlayerIndex),
    b: (u32, f64, PlayerIndex),
) -> Ordering {
    a.0.cmp(&b.0)
        .then_with(|| a.1.total_cmp(&b.1))
        .then_with(|| a.2.cmp(&b.2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participants::fixtures::make_player;

    fn arbiter(seed: u32) -> Arbiter {
        Arbiter::new(ArbiterOptions::default(), Rng::new(seed))
    }

    #[test]
    fn lower_count_ranks_first() {
        let mut arbiter = arbiter(3);
        let treasure = CategoryLabel::new("TREASURE");
        arbiter.ledger.increment_count(PlayerIndex(1), &treasure);

        let ranking = arbiter.rank_players(
            &treasure,
            vec![make_player(0, 1), make_player(1, 2)],
        );
        let order: Vec<(u64, u32)> = ranking
            .iter()
            .map(|entry| (entry.player.player_index.0, entry.count))
            .collect();
        assert_eq!(order, vec![(2, 0), (1, 1)]);
    }

    #[test]
    fn equal_counts_fall_back_to_stored_priority() {
        let mut arbiter = arbiter(3);
        let shop = CategoryLabel::new("SHOP");
        arbiter.ledger.restore_priority(PlayerIndex(1), shop.clone(), 0.9);
        arbiter.ledger.restore_priority(PlayerIndex(2), shop.clone(), 0.1);

        let ranking = arbiter.rank_players(&shop, vec![make_player(0, 1), make_player(1, 2)]);
        assert_eq!(ranking[0].player.player_index, PlayerIndex(2));
    }

    #[test]
    fn exact_ties_fall_back_to_player_index() {
        let mut arbiter = arbiter(3);
        let boss = CategoryLabel::new("BOSS");
        arbiter.ledger.restore_priority(PlayerIndex(9), boss.clone(), 0.5);
        arbiter.ledger.restore_priority(PlayerIndex(4), boss.clone(), 0.5);

        let ranking = arbiter.rank_players(&boss, vec![make_player(0, 9), make_player(1, 4)]);
        assert_eq!(ranking[0].player.player_index, PlayerIndex(4));
        assert_eq!(ranking[1].player.player_index, PlayerIndex(9));
    }

    #[test]
    fn ranking_is_stable_across_repeated_queries() {
        let mut arbiter = arbiter(11);
        let devil = CategoryLabel::new("DEVIL");
        let roster: Vec<PlayerView> = (0..4).map(|idx| make_player(idx, 10 + idx as u64)).collect();

        let first: Vec<PlayerIndex> = arbiter
            .rank_players(&devil, roster.clone())
            .iter()
            .map(|entry| entry.player.player_index)
            .collect();
        for _ in 0..5 {
            let again: Vec<PlayerIndex> = arbiter
                .rank_players(&devil, roster.iter().rev().cloned().collect())
                .iter()
                .map(|entry| entry.player.player_index)
                .collect();
            assert_eq!(again, first);
        }
    }

    #[test]
    fn ranking_is_sorted_by_count_then_priority() {
        for seed in 0..50 {
            let mut arbiter = arbiter(seed);
            let label = CategoryLabel::new("DEFAULT");
            for idx in 0..4u64 {
                for _ in 0..(idx % 2) {
                    arbiter.ledger.increment_count(PlayerIndex(idx), &label);
                }
            }
            let roster: Vec<PlayerView> = (0..4).map(|idx| make_player(idx, idx as u64)).collect();
            let ranking = arbiter.rank_players(&label, roster);

            for pair in ranking.windows(2) {
                let a = &pair[0];
                let b = &pair[1];
                let a_priority = arbiter.ledger.priorities()[&a.player.player_index][&label];
                let b_priority = arbiter.ledger.priorities()[&b.player.player_index][&label];
                assert_eq!(
                    compare_entries(
                        (a.count, a_priority, a.player.player_index),
                        (b.count, b_priority, b.player.player_index),
                    ),
                    Ordering::Less
                );
            }
        }
    }

    #[test]
    fn empty_roster_ranks_nobody() {
        let mut arbiter = arbiter(1);
        assert!(arbiter
            .rank_players(&CategoryLabel::new("SHOP"), Vec::new())
            .is_empty());
    }
}
