//! Seeded point sampling
//!
//! All randomness in the engine flows through here. PCG32 keeps streams
//! identical across platforms, so a `(dimension, num_points, seed)` triple
//! names exactly one point set on native and wasm alike.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::error::{SimError, SimResult};

use super::point::Point;

/// Draw `num_points` points uniformly from `[0, 1)^dimension`.
///
/// Duplicate points are legal output; the scheduler resolves coincident
/// seeds by freezing them at radius zero.
pub fn sample_points(dimension: usize, num_points: usize, seed: u64) -> SimResult<Vec<Point>> {
    if dimension < 1 {
        return Err(SimError::invalid(format!(
            "dimension must be at least 1, got {dimension}"
        )));
    }
    if num_points < 1 {
        return Err(SimError::invalid(format!(
            "num_points must be at least 1, got {num_points}"
        )));
    }

    let mut rng = Pcg32::seed_from_u64(seed);
    let points = (0..num_points)
        .map(|_| Point::new((0..dimension).map(|_| rng.random_range(0.0..1.0)).collect()))
        .collect();
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_count_and_dimension() {
        let points = sample_points(3, 7, 42).unwrap();
        assert_eq!(points.len(), 7);
        assert!(points.iter().all(|p| p.dimension() == 3));
    }

    #[test]
    fn test_samples_stay_in_half_open_unit_cube() {
        let points = sample_points(4, 200, 9).unwrap();
        for p in &points {
            for &c in p.coords() {
                assert!((0.0..1.0).contains(&c), "coordinate {c} out of range");
            }
        }
    }

    #[test]
    fn test_same_seed_same_points() {
        let a = sample_points(2, 50, 1234).unwrap();
        let b = sample_points(2, 50, 1234).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = sample_points(2, 50, 1).unwrap();
        let b = sample_points(2, 50, 2).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_rejects_zero_dimension() {
        let err = sample_points(0, 5, 0).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_rejects_zero_points() {
        let err = sample_points(2, 0, 0).unwrap_err();
        assert!(err.is_invalid_parameter());
    }
}
