use std::{cmp::Ordering, collections::BTreeSet};

/// One live player's position in the rating order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexEntry {
    pub rating: f64,
    pub id: u32
}

impl Eq for IndexEntry {}

impl Ord for IndexEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // total_cmp gives f64 a total order; ids break rating ties so every
        // entry is distinct and lookups by (rating, id) are exact.
        self.rating
            .total_cmp(&other.rating)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for IndexEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Players kept in visible-rating order.
///
/// Each live player appears exactly once and its entry's rating equals the
/// player's current visible rating; `reposition` must be called whenever a
/// rating changes. All operations are O(log N) plus output size.
pub struct RatingIndex {
    entries: BTreeSet<IndexEntry>
}

impl Default for RatingIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl RatingIndex {
    pub fn new() -> RatingIndex {
        RatingIndex {
            entries: BTreeSet::new()
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn insert(&mut self, rating: f64, id: u32) {
        let inserted = self.entries.insert(IndexEntry { rating, id });
        debug_assert!(inserted, "player {id} already indexed");
    }

    /// Moves a player's entry from its old rating to its new one.
    pub fn reposition(&mut self, id: u32, old_rating: f64, new_rating: f64) {
        let removed = self.entries.remove(&IndexEntry {
            rating: old_rating,
            id
        });
        debug_assert!(removed, "player {id} missing from index at rating {old_rating}");
        self.entries.insert(IndexEntry {
            rating: new_rating,
            id
        });
    }

    /// Returns up to `width / 2` entries on each side of `rating`, nearest
    /// first on both sides, excluding `exclude`.
    pub fn window(&self, rating: f64, exclude: u32, width: usize) -> Vec<IndexEntry> {
        let half = (width / 2).max(1);
        let pivot = IndexEntry { rating, id: exclude };

        let below = self
            .entries
            .range(..pivot)
            .rev()
            .filter(|entry| entry.id != exclude)
            .take(half);
        let above = self
            .entries
            .range(pivot..)
            .filter(|entry| entry.id != exclude)
            .take(half);

        below.chain(above).copied().collect()
    }

    /// Entries in ascending rating order.
    pub fn iter(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::RatingIndex;

    fn index_of(ratings: &[f64]) -> RatingIndex {
        let mut index = RatingIndex::new();
        for (id, &rating) in ratings.iter().enumerate() {
            index.insert(rating, id as u32);
        }
        index
    }

    #[test]
    fn test_iteration_is_rating_ordered() {
        let index = index_of(&[1200.0, 900.0, 1000.0, 1100.0, 950.0]);

        let ratings: Vec<f64> = index.iter().map(|e| e.rating).collect();
        assert_eq!(ratings, vec![900.0, 950.0, 1000.0, 1100.0, 1200.0]);
    }

    #[test]
    fn test_equal_ratings_ordered_by_id() {
        let index = index_of(&[1000.0, 1000.0, 1000.0]);

        let ids: Vec<u32> = index.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_reposition_moves_entry() {
        let mut index = index_of(&[900.0, 1000.0, 1100.0]);

        index.reposition(0, 900.0, 1150.0);

        let ids: Vec<u32> = index.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 0]);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_window_straddles_target() {
        let index = index_of(&[900.0, 950.0, 1000.0, 1050.0, 1100.0, 1150.0]);

        let window = index.window(1000.0, 2, 4);

        let mut ids: Vec<u32> = window.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_window_excludes_the_player() {
        let index = index_of(&[1000.0, 1000.0, 1000.0, 1000.0]);

        let window = index.window(1000.0, 1, 64);

        assert_eq!(window.len(), 3);
        assert!(window.iter().all(|e| e.id != 1));
    }

    #[test]
    fn test_window_at_the_edges() {
        let index = index_of(&[900.0, 1000.0, 1100.0]);

        let bottom = index.window(900.0, 0, 64);
        assert_eq!(bottom.len(), 2);

        let top = index.window(1100.0, 2, 64);
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn test_window_of_two_players() {
        let index = index_of(&[1000.0, 1000.0]);

        let window = index.window(1000.0, 0, 64);
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].id, 1);
    }
}
