//! Final packaging of a finished run
//!
//! Pairs each input point with its frozen radius and re-asserts the
//! geometric invariants on the way out. A violation here is always an
//! engine defect surfacing late, so it maps to `Internal` rather than a
//! caller-facing parameter error.

use serde::{Deserialize, Serialize};

use crate::consts::NON_OVERLAP_EPS;
use crate::error::{SimError, SimResult};

use super::point::Point;
use super::state::GrowthOutcome;

/// One grown ball: its seed point and final radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub point: Point,
    pub radius: f64,
}

/// Combine points and their resolved states into the output list.
///
/// Checks that every ball froze, that no radius is negative, and that no
/// two balls overlap beyond `NON_OVERLAP_EPS`.
pub fn assemble(points: Vec<Point>, outcome: GrowthOutcome) -> SimResult<Vec<Ball>> {
    if points.len() != outcome.balls.len() {
        return Err(SimError::internal(format!(
            "{} points but {} ball states",
            points.len(),
            outcome.balls.len()
        )));
    }
    for (i, state) in outcome.balls.iter().enumerate() {
        if !state.frozen {
            return Err(SimError::internal(format!(
                "ball {i} still active after resolution"
            )));
        }
        if !state.radius.is_finite() || state.radius < 0.0 {
            return Err(SimError::internal(format!(
                "ball {i} has radius {}",
                state.radius
            )));
        }
    }
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            let d = points[i].distance(&points[j]);
            let sum = outcome.balls[i].radius + outcome.balls[j].radius;
            if d < sum - NON_OVERLAP_EPS {
                return Err(SimError::internal(format!(
                    "balls {i} and {j} overlap: distance {d}, radii sum {sum}"
                )));
            }
        }
    }

    Ok(points
        .into_iter()
        .zip(outcome.balls)
        .map(|(point, state)| Ball {
            point,
            radius: state.radius,
        })
        .collect())
}
