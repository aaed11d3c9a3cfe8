//! Similarity scoring between embedding vectors.

/// Cosine similarity in [-1, 1].
///
/// A zero-magnitude vector on either side, or vectors of different dimensionality, have no
/// defined angle; both return the neutral score `0.0` instead of NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) = a.iter().zip(b).fold(
        (0.0_f64, 0.0_f64, 0.0_f64),
        |(dot, na, nb), (&x, &y)| {
            let (x, y) = (x as f64, y as f64);
            (dot + x * y, na + x * x, nb + y * y)
        },
    );

    let denominator = norm_a_sq.sqrt() * norm_b_sq.sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }

    (dot / denominator).clamp(-1.0, 1.0) as f32
}

/// Display percentage: `round(similarity * 100)`, floored at 0 and capped at 100.
pub fn to_percentage(similarity: f32) -> u8 {
    if !similarity.is_finite() {
        return 0;
    }
    (similarity as f64 * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_similarity_is_one() {
        for v in [vec![1.0, 2.0, 3.0], vec![-0.3, 0.7], vec![1e-3, 5e3, -2.0, 0.0]] {
            assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6, "{v:?}");
        }
    }

    #[test]
    fn test_symmetry() {
        let a = [0.2, -0.4, 0.9, 0.1];
        let b = [0.5, 0.5, -0.1, 0.3];
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn test_orthogonal_and_opposite() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_vector_returns_neutral_score() {
        let zero = [0.0, 0.0, 0.0];
        assert_eq!(cosine_similarity(&zero, &[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0, 3.0], &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[test]
    fn test_dimension_mismatch_returns_neutral_score() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0, 0.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_percentage_rounds() {
        assert_eq!(to_percentage(0.754), 75);
        assert_eq!(to_percentage(0.756), 76);
        assert_eq!(to_percentage(1.0), 100);
        assert_eq!(to_percentage(0.0), 0);
    }

    #[test]
    fn test_negative_similarity_floors_at_zero() {
        assert_eq!(to_percentage(-0.4), 0);
        assert_eq!(to_percentage(-1.0), 0);
        assert_eq!(to_percentage(f32::NAN), 0);
    }
}
