//! Lilypond growth - maximal systems of non-overlapping balls
//!
//! Seed points are scattered in d-dimensional space and grow as balls at
//! unit rate, each freezing the instant it first touches another ball or
//! the domain wall. The finished configuration is maximal: nothing can keep
//! growing, nothing overlaps.
//!
//! Core modules:
//! - `sim`: Deterministic growth engine (sampling, scheduling, indexing)
//! - `error`: Two-tier error contract (caller mistakes vs engine defects)
//! - `wasm`: Browser bindings over the same engine (wasm32 only)

pub mod error;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use error::{SimError, SimResult};
pub use sim::{Ball, Domain, IndexStrategy, Point, SimParams, simulate};

/// Engine constants
pub mod consts {
    /// Tolerance for the non-overlap re-check on assembled output and for
    /// the scheduler's freeze-time monotonicity guard. Growth at unit rate
    /// keeps times and distances on the same scale, so one slack covers
    /// both. Absorbs accumulated rounding in distance sums, nothing more.
    pub const NON_OVERLAP_EPS: f64 = 1e-9;

    /// Radius assigned to a single ball growing with no walls and no
    /// neighbors, which would otherwise never stop.
    pub const LONE_POINT_RADIUS: f64 = 0.5;

    /// Default spatial dimension for `SimParams`.
    pub const DEFAULT_DIMENSION: usize = 2;
    /// Default ball count for `SimParams`.
    pub const DEFAULT_NUM_POINTS: usize = 5;
}
