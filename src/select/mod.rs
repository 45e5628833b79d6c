//! Bounded top-K selection over a scored candidate stream.

pub mod pqueue;
pub mod topk;

pub use pqueue::ScoredItem;
pub use topk::TopKSelector;

#[cfg(test)]
mod tests;
