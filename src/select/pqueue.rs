use std::cmp::Ordering;

/// A candidate paired with its similarity score.
///
/// Ordered by score, then by arrival: among equal scores the earlier arrival
/// compares greater, so it outlives later ties when the heap evicts.
#[derive(Debug, Clone)]
pub struct ScoredItem<T> {
    pub score: f32,
    pub item: T,
    pub(crate) seq: u64,
}

impl<T> ScoredItem<T> {
    pub fn new(item: T, score: f32, seq: u64) -> Self {
        ScoredItem { score, item, seq }
    }

    pub fn into_pair(self) -> (T, f32) {
        (self.item, self.score)
    }
}

impl<T> PartialEq for ScoredItem<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for ScoredItem<T> {}

impl<T> PartialOrd for ScoredItem<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for ScoredItem<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // total_cmp keeps the ordering total; NaN is rejected before it gets here.
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}
