//! Candidate freeze events
//!
//! An event is a derived value: the earliest way one active ball could
//! freeze given current knowledge. Events live only in the scheduler's
//! per-ball cache and are recomputed whenever a freeze invalidates them.

use std::cmp::Ordering;

/// How an active ball can be stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Two active balls meet; both freeze at half their separation.
    MutualGrowth,
    /// An active ball reaches the surface of an already-frozen ball.
    HitFrozen,
    /// An active ball reaches the domain wall.
    Boundary,
}

impl EventKind {
    // Last key of the event order; only reachable on full (time, point,
    // partner) ties.
    fn rank(self) -> u8 {
        match self {
            EventKind::MutualGrowth => 0,
            EventKind::HitFrozen => 1,
            EventKind::Boundary => 2,
        }
    }
}

/// The earliest known freeze opportunity for one ball.
///
/// The derived order is total: `(time, point, partner, kind)` with times
/// compared via `total_cmp` and `None` partners sorting first. Equal-time
/// candidates therefore resolve the same way on every platform.
#[derive(Debug, Clone, Copy)]
pub struct CandidateEvent {
    /// Simulated time of the contact. Growth runs at unit rate from zero,
    /// so this is also the radius the ball freezes at.
    pub time: f64,
    pub kind: EventKind,
    /// The ball this event freezes.
    pub point: u32,
    /// Second ball involved: `Some` for `MutualGrowth` (freezes too) and
    /// `HitFrozen` (stays as it is), `None` for `Boundary`.
    pub partner: Option<u32>,
}

impl CandidateEvent {
    pub fn mutual(time: f64, point: u32, partner: u32) -> Self {
        CandidateEvent {
            time,
            kind: EventKind::MutualGrowth,
            point,
            partner: Some(partner),
        }
    }

    pub fn hit_frozen(time: f64, point: u32, partner: u32) -> Self {
        CandidateEvent {
            time,
            kind: EventKind::HitFrozen,
            point,
            partner: Some(partner),
        }
    }

    pub fn boundary(time: f64, point: u32) -> Self {
        CandidateEvent {
            time,
            kind: EventKind::Boundary,
            point,
            partner: None,
        }
    }
}

impl PartialEq for CandidateEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CandidateEvent {}

impl PartialOrd for CandidateEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CandidateEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .total_cmp(&other.time)
            .then_with(|| self.point.cmp(&other.point))
            .then_with(|| self.partner.cmp(&other.partner))
            .then_with(|| self.kind.rank().cmp(&other.kind.rank()))
    }
}
