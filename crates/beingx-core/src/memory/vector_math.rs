//! Vector operations used for similarity recall.
//!
//! Accumulation happens in `f64` so long embeddings do not lose precision in
//! the running sums. Callers must only pass vectors of equal length.

const COSINE_EPSILON: f64 = 1e-9;

pub fn dot(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| *x as f64 * *y as f64)
        .sum()
}

pub fn norm(v: &[f32]) -> f64 {
    dot(v, v).sqrt()
}

/// `dot(a, b) / (norm(a) * norm(b) + 1e-9)`.
///
/// A zero vector yields 0 instead of NaN. The result is not re-normalized.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    dot(a, b) / (norm(a) * norm(b) + COSINE_EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_and_norm() {
        assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
        assert!((norm(&[3.0, 4.0]) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        let c = vec![0.0, 1.0, 0.0];

        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 0.001);
        assert!((cosine_similarity(&a, &c) - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_cosine_of_self_and_negation() {
        let v = vec![0.3, -1.2, 4.5, 0.01];
        let neg: Vec<f32> = v.iter().map(|x| -x).collect();

        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
        assert!((cosine_similarity(&v, &neg) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_with_zero_vector_is_finite() {
        let zero = vec![0.0, 0.0, 0.0];
        let v = vec![1.0, 2.0, 3.0];
        let sim = cosine_similarity(&zero, &v);
        assert!(sim.is_finite());
        assert_eq!(sim, 0.0);
    }
}
