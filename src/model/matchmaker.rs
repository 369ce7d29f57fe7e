use crate::model::{
    constants::{MATCH_WINDOW, QUALITY_CANDIDATES},
    gaussian,
    population::Player,
    rating_index::{IndexEntry, RatingIndex},
    rng::SimRng,
    strategy::Strategy
};

/// Picks opponents and keeps the rating order current.
///
/// Owns the rating index; the driver reports every committed rating change
/// through `reposition` so near-neighbor queries always see fresh positions.
pub struct Matchmaker {
    index: RatingIndex
}

impl Matchmaker {
    pub fn new(players: &[Player]) -> Matchmaker {
        let mut index = RatingIndex::new();
        for player in players {
            index.insert(player.rating, player.id);
        }
        Matchmaker { index }
    }

    pub fn index(&self) -> &RatingIndex {
        &self.index
    }

    pub fn reposition(&mut self, id: u32, old_rating: f64, new_rating: f64) {
        self.index.reposition(id, old_rating, new_rating);
    }

    /// Selects an opponent for `me` under the strategy's pairing policy.
    ///
    /// The naive baseline samples uniformly and never touches the index. An
    /// empty candidate window (guarded against, though it cannot occur while
    /// the index holds at least two players) also falls back to uniform
    /// sampling rather than failing the match.
    pub fn next_opponent(&self, me: &Player, strategy: &Strategy, players: &[Player], rng: &mut SimRng) -> u32 {
        match *strategy {
            Strategy::Naive => self.uniform_opponent(me.id, players.len(), rng),
            Strategy::Gaussian { beta } => {
                let window = self.index.window(me.rating, me.id, 2 * QUALITY_CANDIDATES);
                match Self::highest_quality(&window, me, players, beta) {
                    Some(id) => id,
                    None => self.uniform_opponent(me.id, players.len(), rng)
                }
            }
            _ => {
                let window = self.index.window(me.rating, me.id, MATCH_WINDOW);
                match Self::nearest_rating(&window, me.rating) {
                    Some(id) => id,
                    None => self.uniform_opponent(me.id, players.len(), rng)
                }
            }
        }
    }

    fn uniform_opponent(&self, me: u32, count: usize, rng: &mut SimRng) -> u32 {
        debug_assert!(count >= 2);
        loop {
            let candidate = rng.below(count) as u32;
            if candidate != me {
                return candidate;
            }
        }
    }

    /// Nearest visible rating; rating ties go to the lower id so runs stay
    /// reproducible.
    fn nearest_rating(window: &[IndexEntry], rating: f64) -> Option<u32> {
        let mut best: Option<(f64, u32)> = None;
        for entry in window {
            let distance = (entry.rating - rating).abs();
            let closer = match best {
                None => true,
                Some((best_distance, best_id)) => {
                    distance < best_distance || (distance == best_distance && entry.id < best_id)
                }
            };
            if closer {
                best = Some((distance, entry.id));
            }
        }
        best.map(|(_, id)| id)
    }

    /// Argmax of match quality over the candidate window, ties to lower id.
    fn highest_quality(window: &[IndexEntry], me: &Player, players: &[Player], beta: f64) -> Option<u32> {
        let my_sigma = me.sigma.unwrap_or_default();
        let mut best: Option<(f64, u32)> = None;
        for entry in window {
            let candidate = &players[entry.id as usize];
            let quality = gaussian::match_quality(
                me.rating,
                my_sigma,
                candidate.rating,
                candidate.sigma.unwrap_or_default(),
                beta
            );
            let better = match best {
                None => true,
                Some((best_quality, best_id)) => {
                    quality > best_quality || (quality == best_quality && entry.id < best_id)
                }
            };
            if better {
                best = Some((quality, entry.id));
            }
        }
        best.map(|(_, id)| id)
    }
}
