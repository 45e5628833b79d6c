use crate::select::pqueue::ScoredItem;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

#[test]
fn test_push_pop_ordering() {
    let mut heap = BinaryHeap::new();
    heap.push(ScoredItem::new(1, 1.0, 0));
    heap.push(ScoredItem::new(3, 3.0, 1));
    heap.push(ScoredItem::new(2, 2.0, 2));

    // BinaryHeap is a max heap: largest score pops first
    assert_eq!(heap.pop().unwrap().item, 3);
    assert_eq!(heap.pop().unwrap().item, 2);
    assert_eq!(heap.pop().unwrap().item, 1);
}

#[test]
fn test_min_heap_via_reverse() {
    let mut min_heap = BinaryHeap::new();
    min_heap.push(Reverse(ScoredItem::new("b", 2.0, 0)));
    min_heap.push(Reverse(ScoredItem::new("a", 1.0, 1)));

    assert_eq!(min_heap.peek().unwrap().0.score, 1.0);
}

#[test]
fn test_earlier_arrival_wins_ties() {
    let first = ScoredItem::new("first", 0.5, 0);
    let second = ScoredItem::new("second", 0.5, 1);

    assert!(first > second);
}

#[test]
fn test_negative_scores_order() {
    let low = ScoredItem::new("low", -0.9, 0);
    let high = ScoredItem::new("high", -0.1, 1);

    assert!(high > low);
}

#[test]
fn test_into_pair() {
    let entry = ScoredItem::new("doc", 0.75, 3);
    assert_eq!(entry.into_pair(), ("doc", 0.75));
}
