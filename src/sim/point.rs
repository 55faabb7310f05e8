//! Points in d-dimensional space
//!
//! Dimensionality is a runtime value, not a const generic: the same engine
//! serves 1-D number lines and 6-D experiments without monomorphizing per
//! dimension.

use serde::{Deserialize, Serialize};

/// A position in d-dimensional Euclidean space.
///
/// Serializes as a bare coordinate array, so a 2-D point renders as
/// `[0.25, 0.75]` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Point(Vec<f64>);

impl Point {
    pub fn new(coords: Vec<f64>) -> Self {
        Point(coords)
    }

    /// Number of coordinates.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn coords(&self) -> &[f64] {
        &self.0
    }

    /// Euclidean distance to `other`.
    ///
    /// Both points must have the same dimension; mixed-dimension inputs are
    /// rejected at engine entry.
    pub fn distance(&self, other: &Point) -> f64 {
        debug_assert_eq!(self.0.len(), other.0.len());
        self.0
            .iter()
            .zip(&other.0)
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}

impl From<Vec<f64>> for Point {
    fn from(coords: Vec<f64>) -> Self {
        Point(coords)
    }
}
