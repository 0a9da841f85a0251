/// Cosine similarity of two equal-length vectors. Zero-norm or non-finite input yields 0.
///
/// Accumulates in f64 so the squared norms neither overflow nor underflow for
/// any finite f32 input.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    let dot: f64 = a.iter().zip(b.iter()).map(|(&x, &y)| f64::from(x) * f64::from(y)).sum();
    let sq_a: f64 = a.iter().map(|&x| f64::from(x) * f64::from(x)).sum();
    let sq_b: f64 = b.iter().map(|&x| f64::from(x) * f64::from(x)).sum();

    if sq_a == 0.0 || sq_b == 0.0 {
        return 0.0;
    }

    // One sqrt over the product keeps identical vectors at exactly 1.0.
    let cosine = dot / (sq_a * sq_b).sqrt();
    if !cosine.is_finite() {
        return 0.0;
    }
    cosine.clamp(-1.0, 1.0) as f32
}

/// Map cosine from `[-1, 1]` onto `[0, 1]` so score floors mean the same regardless of sign.
pub fn relevance_score(cosine: f32) -> f32 {
    ((cosine + 1.0) / 2.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vectors_score_one() {
        let v = [0.3, -1.2, 4.0];
        assert!((relevance_score(cosine_similarity(&v, &v)) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn opposite_vectors_score_zero_and_orthogonal_half() {
        assert!(relevance_score(cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0])).abs() < 1e-6);
        assert!((relevance_score(cosine_similarity(&[1.0, 0.0], &[0.0, 2.0])) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn zero_vector_is_neutral() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn non_finite_components_are_neutral() {
        assert_eq!(cosine_similarity(&[f32::NAN, 1.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[f32::INFINITY, 1.0], &[1.0, 1.0]), 0.0);
    }
}
