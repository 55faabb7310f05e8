//! Engine facade
//!
//! One call from parameters to frozen balls. Everything below this module
//! is deterministic and log-free; the facade is where the effective seed is
//! resolved and recorded so any run can be replayed.

use crate::error::SimResult;

use super::assemble::{Ball, assemble};
use super::index::{GRID_MAX_DIMENSION, GRID_MIN_POINTS, GridIndex, ScanIndex};
use super::params::{Domain, IndexStrategy, SimParams};
use super::point::Point;
use super::sampler::sample_points;
use super::scheduler::GrowthScheduler;
use super::state::GrowthOutcome;

/// Run a full simulation: sample seeds, grow until everything freezes,
/// package the result.
///
/// With `params.seed == None` a fresh seed is drawn and logged at info
/// level; pass that value back in to replay the run exactly.
pub fn simulate(params: &SimParams) -> SimResult<Vec<Ball>> {
    let seed = params.seed.unwrap_or_else(rand::random);
    log::info!(
        "simulating {} balls in {} dimensions with seed {}",
        params.num_points,
        params.dimension,
        seed
    );

    let points = sample_points(params.dimension, params.num_points, seed)?;
    let outcome = run_growth(&points, params.domain, params.index)?;
    log::debug!("growth resolved in {} freeze events", outcome.freezes.len());
    assemble(points, outcome)
}

/// Resolve growth over caller-supplied points.
///
/// The strategy choice never changes results; `Auto` picks the grid for
/// large low-dimensional sets and the scan for everything else.
pub fn run_growth(
    points: &[Point],
    domain: Domain,
    strategy: IndexStrategy,
) -> SimResult<GrowthOutcome> {
    let use_grid = match strategy {
        IndexStrategy::Scan => false,
        IndexStrategy::Grid => true,
        IndexStrategy::Auto => {
            points.len() >= GRID_MIN_POINTS
                && points.first().is_some_and(|p| p.dimension() <= GRID_MAX_DIMENSION)
        }
    };
    if use_grid {
        log::debug!("using grid index for {} points", points.len());
        GrowthScheduler::new(points, domain, GridIndex::build(points))?.run()
    } else {
        log::debug!("using scan index for {} points", points.len());
        GrowthScheduler::new(points, domain, ScanIndex::new())?.run()
    }
}
