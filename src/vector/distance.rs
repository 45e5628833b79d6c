use crate::error::{RagError, Result};

/// L2 norm of `v`.
pub fn magnitude(v: &[f32]) -> f32 {
    let mut sum = 0.0;
    let n = v.len();
    let mut i = 0;

    // Unrolling 4
    while i + 3 < n {
        sum += v[i] * v[i] + v[i+1] * v[i+1] + v[i+2] * v[i+2] + v[i+3] * v[i+3];
        i += 4;
    }

    while i < n {
        sum += v[i] * v[i];
        i += 1;
    }

    sum.sqrt()
}

/// Cosine similarity of `a` and `b` in a single pass.
///
/// Dot product and both squared magnitudes are accumulated together, so no
/// intermediate vectors are allocated. A zero-magnitude input yields NaN;
/// callers rank NaN as "below any threshold".
pub fn cosine(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(RagError::DimensionMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }

    let mut dot = 0.0f32;
    let mut mag_a = 0.0f32;
    let mut mag_b = 0.0f32;
    let n = a.len();
    let mut i = 0;

    // Unrolling 4
    while i + 3 < n {
        dot += a[i] * b[i] + a[i+1] * b[i+1] + a[i+2] * b[i+2] + a[i+3] * b[i+3];
        mag_a += a[i] * a[i] + a[i+1] * a[i+1] + a[i+2] * a[i+2] + a[i+3] * a[i+3];
        mag_b += b[i] * b[i] + b[i+1] * b[i+1] + b[i+2] * b[i+2] + b[i+3] * b[i+3];
        i += 4;
    }

    while i < n {
        dot += a[i] * b[i];
        mag_a += a[i] * a[i];
        mag_b += b[i] * b[i];
        i += 1;
    }

    Ok(dot / (mag_a.sqrt() * mag_b.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_cosine_identical_vectors() {
        let v = vec![1.0, 0.0, 0.0];
        assert!((cosine(&v, &v).unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal_vectors() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert!(cosine(&a, &b).unwrap().abs() < 1e-6);
    }

    #[test]
    fn test_cosine_opposite_vectors() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        assert!((cosine(&a, &b).unwrap() - (-1.0)).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_scale_invariant() {
        let a = vec![3.0, 4.0];
        let b = vec![6.0, 8.0];
        assert!((cosine(&a, &b).unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_zero_vector_is_nan() {
        let zero = vec![0.0, 0.0, 0.0];
        let v = vec![1.0, 2.0, 3.0];
        assert!(cosine(&zero, &v).unwrap().is_nan());
        assert!(cosine(&zero, &zero).unwrap().is_nan());
    }

    #[test]
    fn test_cosine_dimension_mismatch() {
        let err = cosine(&[1.0, 0.0], &[1.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(err, RagError::DimensionMismatch { expected: 2, got: 3 }));
    }

    #[test]
    fn test_unrolled_matches_naive() {
        // 7 elements: one unrolled block plus a 3-element remainder
        let a = vec![0.5, -1.0, 2.0, 0.25, 3.0, -0.75, 1.5];
        let b = vec![1.0, 0.5, -2.0, 4.0, 0.125, 1.0, -1.0];

        let dot: f32 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
        let naive = dot / (magnitude(&a) * magnitude(&b));

        assert!((cosine(&a, &b).unwrap() - naive).abs() < 1e-5);
    }

    #[test]
    fn test_magnitude() {
        assert!((magnitude(&[3.0, 4.0]) - 5.0).abs() < 1e-6);
        assert_eq!(magnitude(&[]), 0.0);
    }

    fn nonzero_vector(len: usize) -> impl Strategy<Value = Vec<f32>> {
        prop::collection::vec(-10.0f32..10.0, len)
            .prop_filter("non-zero magnitude", |v| magnitude(v) > 1e-3)
    }

    proptest! {
        #[test]
        fn prop_self_similarity_is_one(v in (1usize..32).prop_flat_map(nonzero_vector)) {
            let sim = cosine(&v, &v).unwrap();
            prop_assert!((sim - 1.0).abs() < 1e-4, "cosine(v, v) = {}", sim);
        }

        #[test]
        fn prop_symmetric(
            (a, b) in (1usize..32).prop_flat_map(|n| (nonzero_vector(n), nonzero_vector(n)))
        ) {
            prop_assert_eq!(cosine(&a, &b).unwrap(), cosine(&b, &a).unwrap());
        }

        #[test]
        fn prop_bounded(
            (a, b) in (1usize..32).prop_flat_map(|n| (nonzero_vector(n), nonzero_vector(n)))
        ) {
            let sim = cosine(&a, &b).unwrap();
            prop_assert!((-1.0f32 - 1e-4..=1.0 + 1e-4).contains(&sim));
        }
    }
}
