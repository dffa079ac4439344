use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;

/// `len` values drawn uniformly from `range`, reproducible per `seed`.
pub fn uniform_dataset(seed: u64, len: usize, range: Range<f64>) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(range.clone())).collect()
}

/// Signed values in `(-magnitude, magnitude)` with a guaranteed zero and at
/// least one value of each sign.
pub fn signed_dataset(seed: u64, len: usize, magnitude: f64) -> Vec<f64> {
    let mut out = uniform_dataset(seed, len.max(3), -magnitude..magnitude);
    out[0] = -out[0].abs().max(f64::EPSILON);
    out[1] = 0.0;
    out[2] = out[2].abs().max(f64::EPSILON);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_values() {
        assert_eq!(
            uniform_dataset(42, 16, 0.0..1.0),
            uniform_dataset(42, 16, 0.0..1.0)
        );
        assert_ne!(
            uniform_dataset(1, 16, 0.0..1.0),
            uniform_dataset(2, 16, 0.0..1.0)
        );
    }

    #[test]
    fn values_stay_in_range() {
        let v = uniform_dataset(3, 100, -2.0..5.0);
        assert_eq!(v.len(), 100);
        assert!(v.iter().all(|x| (-2.0..5.0).contains(x)));
    }

    #[test]
    fn signed_dataset_has_every_sign() {
        let v = signed_dataset(9, 2, 10.0);
        assert_eq!(v.len(), 3);
        assert!(v[0] < 0.0);
        assert_eq!(v[1], 0.0);
        assert!(v[2] > 0.0);
    }
}
