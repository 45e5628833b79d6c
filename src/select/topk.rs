use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::pqueue::ScoredItem;

/// Keeps the `k` highest-scoring items of a stream in O(k) memory.
///
/// Backed by a min-heap so the eviction on overflow is a cheap pop of the
/// current minimum. After any prefix of the stream the heap holds exactly the
/// `k` largest scores pushed so far.
#[derive(Debug)]
pub struct TopKSelector<T> {
    k: usize,
    heap: BinaryHeap<Reverse<ScoredItem<T>>>,
    next_seq: u64,
}

impl<T> TopKSelector<T> {
    pub fn new(k: usize) -> Self {
        TopKSelector {
            k,
            // One slot of headroom for the push-then-evict step. Capped so a
            // huge `k` over a small corpus does not pre-allocate for nothing.
            heap: BinaryHeap::with_capacity(k.saturating_add(1).min(1024)),
            next_seq: 0,
        }
    }

    /// Offer a candidate. NaN scores cannot be ranked and are dropped.
    pub fn push(&mut self, item: T, score: f32) {
        if score.is_nan() {
            return;
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        self.heap.push(Reverse(ScoredItem::new(item, score, seq)));
        if self.heap.len() > self.k {
            self.heap.pop();
        }
    }

    /// Number of items currently retained (never more than `k`).
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The bound `k` this selector was created with.
    pub fn capacity(&self) -> usize {
        self.k
    }

    /// Lowest retained score, i.e. the score a new candidate must beat once
    /// the selector is full.
    pub fn min_score(&self) -> Option<f32> {
        self.heap.peek().map(|Reverse(entry)| entry.score)
    }

    /// Consume the selector, yielding `(item, score)` highest score first.
    pub fn drain_descending(self) -> Vec<(T, f32)> {
        let mut heap = self.heap;
        let mut out = Vec::with_capacity(heap.len());

        // Pops come out ascending; reverse once at the end.
        while let Some(Reverse(entry)) = heap.pop() {
            out.push(entry.into_pair());
        }
        out.reverse();
        out
    }
}
