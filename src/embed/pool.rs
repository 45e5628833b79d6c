use crate::error::{RagError, Result};
use crate::vector::{magnitude, Embedding};

/// Average token-level vectors into one sentence vector.
pub fn mean_pool(tokens: &[Vec<f32>]) -> Result<Embedding> {
    let Some(first) = tokens.first() else {
        return Err(RagError::EmbeddingFailure("no token vectors to pool".to_string()));
    };

    let hidden = first.len();
    if hidden == 0 {
        return Err(RagError::EmbeddingFailure("token vectors are empty".to_string()));
    }
    let mut sum = vec![0.0f32; hidden];

    for row in tokens {
        if row.len() != hidden {
            return Err(RagError::DimensionMismatch {
                expected: hidden,
                got: row.len(),
            });
        }
        for (acc, val) in sum.iter_mut().zip(row) {
            *acc += val;
        }
    }

    let count = tokens.len() as f32;
    sum.iter_mut().for_each(|v| *v /= count);
    Ok(sum)
}

/// Mean over the rows whose attention mask is set. Padding rows are ignored.
///
/// `rows` yields one hidden-state row per token, aligned with `mask`.
pub fn mean_pool_masked<'a, I>(rows: I, mask: &[i64], hidden: usize) -> Embedding
where
    I: IntoIterator<Item = &'a [f32]>,
{
    let mut sum = vec![0.0f32; hidden];
    let mut count = 0.0f32;

    for (row, &m) in rows.into_iter().zip(mask) {
        if m > 0 {
            for (acc, val) in sum.iter_mut().zip(row) {
                *acc += val;
            }
            count += 1.0;
        }
    }

    if count > 0.0 {
        sum.iter_mut().for_each(|v| *v /= count);
    }
    sum
}

/// Scale `v` to unit length in place. Zero vectors are left untouched.
pub fn l2_normalize(v: &mut [f32]) {
    let norm = magnitude(v);
    if norm > 0.0 {
        v.iter_mut().for_each(|x| *x /= norm);
    }
}
