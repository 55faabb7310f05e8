//! Per-ball growth state and the applied freeze log

use super::event::EventKind;

/// Mutable growth record for one ball, addressed by point index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallState {
    /// Once set, `radius` never changes again.
    pub frozen: bool,
    /// Final radius when frozen. An active ball's current radius is implied
    /// by the clock instead (growth runs at unit rate from zero).
    pub radius: f64,
    /// Simulated time of the freeze; meaningful only when `frozen`.
    pub freeze_time: f64,
}

impl BallState {
    /// A ball that is still growing.
    pub fn active() -> Self {
        BallState {
            frozen: false,
            radius: 0.0,
            freeze_time: 0.0,
        }
    }

    /// Stop the ball at `time`. Radius equals freeze time under unit-rate
    /// growth from zero.
    pub fn freeze(&mut self, time: f64) {
        self.frozen = true;
        self.radius = time;
        self.freeze_time = time;
    }
}

/// One applied freeze, as opposed to a candidate that was merely considered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreezeRecord {
    pub time: f64,
    pub kind: EventKind,
    pub point: u32,
    /// Present for contact freezes, absent for wall and policy freezes.
    pub partner: Option<u32>,
}

/// Everything the scheduler knows when the last ball stops.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthOutcome {
    /// Final state per ball, index-aligned with the input points.
    pub balls: Vec<BallState>,
    /// Freezes in application order. Times never decrease.
    pub freezes: Vec<FreezeRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freeze_locks_radius_to_time() {
        let mut b = BallState::active();
        assert!(!b.frozen);
        assert_eq!(b.radius, 0.0);
        b.freeze(0.375);
        assert!(b.frozen);
        assert_eq!(b.radius, 0.375);
        assert_eq!(b.freeze_time, 0.375);
    }
}
