//! Candidate partner lookup
//!
//! After every freeze the scheduler re-derives candidate events from the
//! points near an active ball. Lookup strategies only have to be complete:
//! every point within the query radius must come back, extras are harmless
//! because the scheduler re-checks exact distances and times. Pruning here
//! can therefore never change results, only how much work deriving them
//! takes.

use rustc_hash::FxHashMap;

use super::point::Point;

/// Smallest point count at which `IndexStrategy::Auto` switches to the grid.
pub const GRID_MIN_POINTS: usize = 256;

/// Largest dimension at which `IndexStrategy::Auto` still picks the grid.
/// Cell boxes grow exponentially with dimension, so past this the scan wins.
pub const GRID_MAX_DIMENSION: usize = 6;

/// Complete-within-radius neighbor lookup.
pub trait NeighborSearch {
    /// Append every point id within `radius` of point `origin_id` to `out`,
    /// excluding `origin_id` itself. May over-return; must never miss a
    /// point at distance `<= radius`. `out` is not cleared.
    fn neighbors_within(&self, points: &[Point], origin_id: u32, radius: f64, out: &mut Vec<u32>);

    /// A radius at which `neighbors_within` is guaranteed exhaustive, so
    /// callers can stop widening their search.
    fn covering_radius(&self) -> f64;

    /// Radius to try first when searching outward.
    fn initial_radius(&self) -> f64;
}

/// Exhaustive lookup: every other point is always a candidate.
///
/// Correct at any scale and the baseline the grid is checked against.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanIndex;

impl ScanIndex {
    pub fn new() -> Self {
        ScanIndex
    }
}

impl NeighborSearch for ScanIndex {
    fn neighbors_within(&self, points: &[Point], origin_id: u32, _radius: f64, out: &mut Vec<u32>) {
        out.extend((0..points.len() as u32).filter(|&j| j != origin_id));
    }

    fn covering_radius(&self) -> f64 {
        0.0
    }

    fn initial_radius(&self) -> f64 {
        f64::INFINITY
    }
}

/// Uniform hash grid over point positions.
///
/// Cells are cubes of side `cell_size`; each holds the ids of the points
/// whose coordinates floor into it. Points never move during a run, so the
/// grid is built once and queried many times; active/frozen bookkeeping
/// stays in the scheduler.
#[derive(Debug)]
pub struct GridIndex {
    cell_size: f64,
    inv_cell_size: f64,
    cells: FxHashMap<Vec<i32>, Vec<u32>>,
    /// Upper bound on any pairwise distance. A query at this radius must
    /// return everyone.
    diameter: f64,
}

impl GridIndex {
    /// Build over `points`, sizing cells for order-one occupancy.
    pub fn build(points: &[Point]) -> Self {
        let Some(first) = points.first() else {
            return GridIndex {
                cell_size: 1.0,
                inv_cell_size: 1.0,
                cells: FxHashMap::default(),
                diameter: 0.0,
            };
        };

        let dim = first.dimension();
        let mut lo = first.coords().to_vec();
        let mut hi = first.coords().to_vec();
        for p in points {
            for (axis, &c) in p.coords().iter().enumerate() {
                lo[axis] = lo[axis].min(c);
                hi[axis] = hi[axis].max(c);
            }
        }

        let mut extent_max: f64 = 0.0;
        let mut diag_sq = 0.0;
        for axis in 0..dim {
            let extent = hi[axis] - lo[axis];
            extent_max = extent_max.max(extent);
            diag_sq += extent * extent;
        }
        // Slack absorbs rounding between the diagonal here and pairwise
        // distances computed later.
        let diameter = diag_sq.sqrt() + 1e-9;

        let cell_size = if extent_max > 0.0 {
            (extent_max * (points.len() as f64).powf(-1.0 / dim as f64)).max(1e-12)
        } else {
            1.0
        };
        let inv_cell_size = 1.0 / cell_size;

        let mut cells: FxHashMap<Vec<i32>, Vec<u32>> = FxHashMap::default();
        for (id, p) in points.iter().enumerate() {
            let key: Vec<i32> = p
                .coords()
                .iter()
                .map(|&c| (c * inv_cell_size).floor() as i32)
                .collect();
            cells.entry(key).or_default().push(id as u32);
        }

        GridIndex {
            cell_size,
            inv_cell_size,
            cells,
            diameter,
        }
    }
}

impl NeighborSearch for GridIndex {
    fn neighbors_within(&self, points: &[Point], origin_id: u32, radius: f64, out: &mut Vec<u32>) {
        let origin = &points[origin_id as usize];

        // Past the diameter nothing can be missing.
        if radius >= self.diameter {
            out.extend((0..points.len() as u32).filter(|&j| j != origin_id));
            return;
        }

        // Cell bounds of the query ball's bounding box, per axis.
        let dim = origin.dimension();
        let mut lo = Vec::with_capacity(dim);
        let mut hi = Vec::with_capacity(dim);
        let mut probes = 1.0f64;
        for &c in origin.coords() {
            let l = ((c - radius) * self.inv_cell_size).floor() as i32;
            let h = ((c + radius) * self.inv_cell_size).floor() as i32;
            probes *= (h as f64 - l as f64) + 1.0;
            lo.push(l);
            hi.push(h);
        }

        // When the box holds more cells than there are points, walking it
        // costs more than checking every point directly.
        if probes > points.len() as f64 {
            for (j, p) in points.iter().enumerate() {
                if j as u32 != origin_id && origin.distance(p) <= radius {
                    out.push(j as u32);
                }
            }
            return;
        }

        let mut cursor = lo.clone();
        'walk: loop {
            if let Some(ids) = self.cells.get(&cursor) {
                for &j in ids {
                    if j != origin_id && origin.distance(&points[j as usize]) <= radius {
                        out.push(j);
                    }
                }
            }
            let mut axis = 0;
            loop {
                if axis == dim {
                    break 'walk;
                }
                cursor[axis] += 1;
                if cursor[axis] <= hi[axis] {
                    break;
                }
                cursor[axis] = lo[axis];
                axis += 1;
            }
        }
    }

    fn covering_radius(&self) -> f64 {
        self.diameter
    }

    fn initial_radius(&self) -> f64 {
        2.0 * self.cell_size
    }
}
