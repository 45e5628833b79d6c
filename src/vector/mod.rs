pub mod distance;

pub use distance::{cosine, magnitude};

/// A vector embedding - fixed size array of floats
pub type Embedding = Vec<f32>;
