//! Deterministic growth simulation
//!
//! All engine logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable tie-breaking (by point index, then partner, then kind)
//! - Index strategies prune work, never change results
//! - No rendering or platform dependencies

pub mod assemble;
pub mod engine;
pub mod event;
pub mod index;
pub mod params;
pub mod point;
pub mod sampler;
pub mod scheduler;
pub mod state;

pub use assemble::{Ball, assemble};
pub use engine::{run_growth, simulate};
pub use event::{CandidateEvent, EventKind};
pub use index::{GridIndex, NeighborSearch, ScanIndex};
pub use params::{Domain, IndexStrategy, SimParams};
pub use point::Point;
pub use sampler::sample_points;
pub use scheduler::GrowthScheduler;
pub use state::{BallState, FreezeRecord, GrowthOutcome};
