//! The growth resolution loop
//!
//! All balls grow from radius zero at unit rate, simultaneously; each
//! freezes the instant it first touches another ball or the domain wall.
//! The scheduler resolves those contacts in global time order. It keeps one
//! cached candidate per active ball (the earliest event currently possible
//! for it), applies the smallest cached event, then repairs the caches the
//! freeze invalidated. Each applied event freezes at least one ball, so a
//! run is at most n events, each costing O(n) repair work.
//!
//! The neighbor index only prunes how many partners a re-derivation looks
//! at. A candidate is accepted only once the searched radius certifies that
//! no unseen partner could produce an earlier event, so every index
//! strategy yields bit-identical results.

use crate::consts::{LONE_POINT_RADIUS, NON_OVERLAP_EPS};
use crate::error::{SimError, SimResult};

use super::event::{CandidateEvent, EventKind};
use super::index::NeighborSearch;
use super::params::Domain;
use super::point::Point;
use super::state::{BallState, FreezeRecord, GrowthOutcome};

/// Resolves one growth run over a fixed set of points.
#[derive(Debug)]
pub struct GrowthScheduler<'a, I> {
    points: &'a [Point],
    domain: Domain,
    index: I,
    balls: Vec<BallState>,
    /// Earliest candidate per ball; `None` once frozen.
    best: Vec<Option<CandidateEvent>>,
    freezes: Vec<FreezeRecord>,
    active_count: usize,
    /// Largest frozen radius so far; bounds how far away a frozen ball can
    /// still matter when certifying a search radius.
    max_frozen_radius: f64,
    last_freeze_time: f64,
    scratch: Vec<u32>,
}

impl<'a, I: NeighborSearch> GrowthScheduler<'a, I> {
    /// Validate the point set and set up an all-active run.
    ///
    /// `index` must have been built over the same `points`.
    pub fn new(points: &'a [Point], domain: Domain, index: I) -> SimResult<Self> {
        let Some(first) = points.first() else {
            return Err(SimError::invalid("at least one point is required"));
        };
        let dim = first.dimension();
        if dim < 1 {
            return Err(SimError::invalid(
                "points must have at least one coordinate",
            ));
        }
        for (i, p) in points.iter().enumerate() {
            if p.dimension() != dim {
                return Err(SimError::invalid(format!(
                    "point {i} has dimension {}, point 0 has {dim}",
                    p.dimension()
                )));
            }
            if !domain.contains(p) {
                return Err(SimError::invalid(format!(
                    "point {i} lies outside the growth domain"
                )));
            }
        }

        Ok(GrowthScheduler {
            points,
            domain,
            index,
            balls: vec![BallState::active(); points.len()],
            best: vec![None; points.len()],
            freezes: Vec::with_capacity(points.len()),
            active_count: points.len(),
            max_frozen_radius: 0.0,
            last_freeze_time: 0.0,
            scratch: Vec::new(),
        })
    }

    /// Run to completion: every ball frozen, or an `Internal` error if an
    /// invariant breaks on the way.
    ///
    /// A lone point in an unbounded domain has nothing to ever stop it; it
    /// is frozen at `LONE_POINT_RADIUS` by policy and logged as a
    /// `Boundary` freeze (the no-partner kind).
    pub fn run(mut self) -> SimResult<GrowthOutcome> {
        if self.points.len() == 1 && self.domain.wall_distance(&self.points[0]).is_none() {
            self.freeze_ball(0, LONE_POINT_RADIUS)?;
            self.freezes.push(FreezeRecord {
                time: LONE_POINT_RADIUS,
                kind: EventKind::Boundary,
                point: 0,
                partner: None,
            });
            return Ok(self.finish());
        }

        for i in 0..self.points.len() {
            let ev = self.derive_candidate(i as u32)?;
            self.best[i] = Some(ev);
        }
        while self.active_count > 0 {
            let ev = self.next_event()?;
            self.apply(ev)?;
        }
        Ok(self.finish())
    }

    fn finish(self) -> GrowthOutcome {
        GrowthOutcome {
            balls: self.balls,
            freezes: self.freezes,
        }
    }

    /// Global minimum over all cached candidates, in the total event order.
    fn next_event(&self) -> SimResult<CandidateEvent> {
        self.best
            .iter()
            .flatten()
            .min()
            .copied()
            .ok_or_else(|| SimError::internal("active balls remain but no candidate exists"))
    }

    /// Freeze the event's ball(s) and repair invalidated caches.
    fn apply(&mut self, ev: CandidateEvent) -> SimResult<()> {
        if !ev.time.is_finite() || ev.time < 0.0 {
            return Err(SimError::internal(format!(
                "freeze time {} out of range",
                ev.time
            )));
        }
        if ev.time < self.last_freeze_time - NON_OVERLAP_EPS {
            return Err(SimError::internal(format!(
                "freeze time regressed from {} to {}",
                self.last_freeze_time, ev.time
            )));
        }

        let frozen_now: [Option<u32>; 2] = match ev.kind {
            EventKind::MutualGrowth => {
                let Some(partner) = ev.partner else {
                    return Err(SimError::internal("mutual growth event without a partner"));
                };
                if self.balls[partner as usize].frozen {
                    return Err(SimError::internal(format!(
                        "mutual growth against already-frozen ball {partner}"
                    )));
                }
                self.freeze_ball(ev.point, ev.time)?;
                self.freeze_ball(partner, ev.time)?;
                [Some(ev.point), Some(partner)]
            }
            EventKind::HitFrozen => {
                let Some(partner) = ev.partner else {
                    return Err(SimError::internal("hit-frozen event without a partner"));
                };
                if !self.balls[partner as usize].frozen {
                    return Err(SimError::internal(format!(
                        "hit-frozen event against still-active ball {partner}"
                    )));
                }
                self.freeze_ball(ev.point, ev.time)?;
                [Some(ev.point), None]
            }
            EventKind::Boundary => {
                self.freeze_ball(ev.point, ev.time)?;
                [Some(ev.point), None]
            }
        };

        self.freezes.push(FreezeRecord {
            time: ev.time,
            kind: ev.kind,
            point: ev.point,
            partner: ev.partner,
        });
        self.last_freeze_time = self.last_freeze_time.max(ev.time);
        self.max_frozen_radius = self.max_frozen_radius.max(ev.time);

        // Repair pass. A cache whose partner just froze is re-derived from
        // scratch; every other active ball can at worst gain one of the
        // newly frozen balls as a cheaper partner, a constant-time check.
        for p in 0..self.points.len() as u32 {
            if self.balls[p as usize].frozen {
                continue;
            }
            let Some(current) = self.best[p as usize] else {
                return Err(SimError::internal(format!(
                    "active ball {p} has no cached candidate"
                )));
            };
            let partner_froze = matches!(current.partner, Some(q) if frozen_now.contains(&Some(q)));
            if partner_froze {
                let ev2 = self.derive_candidate(p)?;
                self.best[p as usize] = Some(ev2);
            } else {
                let mut best = current;
                for q in frozen_now.into_iter().flatten() {
                    let frozen = self.balls[q as usize];
                    let t =
                        self.points[p as usize].distance(&self.points[q as usize]) - frozen.radius;
                    // q can only stop p after q itself stopped.
                    if t < frozen.freeze_time {
                        continue;
                    }
                    let cand = CandidateEvent::hit_frozen(t, p, q);
                    if cand < best {
                        best = cand;
                    }
                }
                self.best[p as usize] = Some(best);
            }
        }
        Ok(())
    }

    fn freeze_ball(&mut self, i: u32, time: f64) -> SimResult<()> {
        let ball = &mut self.balls[i as usize];
        if ball.frozen {
            return Err(SimError::internal(format!("ball {i} frozen twice")));
        }
        ball.freeze(time);
        self.best[i as usize] = None;
        self.active_count -= 1;
        Ok(())
    }

    /// Earliest possible event for ball `i`, searched outward through the
    /// index until the result is certified complete.
    fn derive_candidate(&mut self, i: u32) -> SimResult<CandidateEvent> {
        let points = self.points;
        let origin = &points[i as usize];
        let wall = self
            .domain
            .wall_distance(origin)
            .map(|w| CandidateEvent::boundary(w, i));

        let mut radius = self.index.initial_radius();
        loop {
            self.scratch.clear();
            self.index
                .neighbors_within(points, i, radius, &mut self.scratch);

            let mut best = wall;
            for &j in &self.scratch {
                let other = self.balls[j as usize];
                let d = origin.distance(&points[j as usize]);
                let cand = if other.frozen {
                    let t = d - other.radius;
                    if t < other.freeze_time {
                        continue;
                    }
                    CandidateEvent::hit_frozen(t, i, j)
                } else {
                    CandidateEvent::mutual(d / 2.0, i, j)
                };
                if best.is_none_or(|b| cand < b) {
                    best = Some(cand);
                }
            }

            let exhaustive = radius >= self.index.covering_radius();
            if let Some(ev) = best {
                // Certified once nothing outside the searched radius can
                // beat it: an unseen active partner would need d > R, so
                // t > R/2; an unseen frozen one, t > R - max_frozen_radius.
                let needed = (2.0 * ev.time).max(ev.time + self.max_frozen_radius);
                if exhaustive || radius >= needed {
                    return Ok(ev);
                }
            } else if exhaustive {
                return Err(SimError::internal(format!(
                    "ball {i} has no possible freeze event"
                )));
            }
            radius = (radius * 2.0).min(self.index.covering_radius());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::index::{GridIndex, ScanIndex};
    use crate::sim::sampler::sample_points;

    fn pt(coords: &[f64]) -> Point {
        Point::new(coords.to_vec())
    }

    fn run_scan(points: &[Point], domain: Domain) -> GrowthOutcome {
        GrowthScheduler::new(points, domain, ScanIndex::new())
            .unwrap()
            .run()
            .unwrap()
    }

    #[test]
    fn test_two_active_balls_meet_halfway() {
        let points = [pt(&[0.0, 0.5]), pt(&[1.0, 0.5])];
        let out = run_scan(&points, Domain::Unbounded);

        assert_eq!(out.balls[0].radius, 0.5);
        assert_eq!(out.balls[1].radius, 0.5);
        assert!(out.balls.iter().all(|b| b.frozen));

        assert_eq!(out.freezes.len(), 1);
        let f = out.freezes[0];
        assert_eq!(f.time, 0.5);
        assert_eq!(f.kind, EventKind::MutualGrowth);
        assert_eq!(f.point, 0);
        assert_eq!(f.partner, Some(1));
    }

    #[test]
    fn test_wall_stops_balls_seeded_on_the_boundary() {
        let points = [pt(&[0.0, 0.5]), pt(&[1.0, 0.5])];
        let out = run_scan(&points, Domain::UnitCube);

        assert_eq!(out.balls[0].radius, 0.0);
        assert_eq!(out.balls[1].radius, 0.0);
        assert_eq!(out.freezes.len(), 2);
        assert!(out.freezes.iter().all(|f| f.kind == EventKind::Boundary));
        assert!(out.freezes.iter().all(|f| f.time == 0.0));
    }

    #[test]
    fn test_chain_freezes_mutual_then_hit_frozen() {
        // 0 and 1 meet at t = 0.5; 2 then grows until it reaches 1's
        // surface at t = 2.0 - 0.5.
        let points = [pt(&[0.0]), pt(&[1.0]), pt(&[3.0])];
        let out = run_scan(&points, Domain::Unbounded);

        assert_eq!(out.balls[0].radius, 0.5);
        assert_eq!(out.balls[1].radius, 0.5);
        assert_eq!(out.balls[2].radius, 1.5);

        assert_eq!(out.freezes.len(), 2);
        assert_eq!(out.freezes[0].kind, EventKind::MutualGrowth);
        assert_eq!(out.freezes[0].time, 0.5);
        assert_eq!(out.freezes[1].kind, EventKind::HitFrozen);
        assert_eq!(out.freezes[1].point, 2);
        assert_eq!(out.freezes[1].partner, Some(1));
        assert_eq!(out.freezes[1].time, 1.5);
    }

    #[test]
    fn test_single_ball_freezes_on_nearest_wall() {
        let points = [pt(&[0.25, 0.5])];
        let out = run_scan(&points, Domain::UnitCube);
        assert_eq!(out.balls[0].radius, 0.25);
        assert_eq!(out.freezes.len(), 1);
        assert_eq!(out.freezes[0].kind, EventKind::Boundary);
        assert_eq!(out.freezes[0].partner, None);
    }

    #[test]
    fn test_single_ball_unbounded_gets_policy_radius() {
        let points = [pt(&[123.0, -4.0])];
        let out = run_scan(&points, Domain::Unbounded);
        assert_eq!(out.balls[0].radius, LONE_POINT_RADIUS);
        assert_eq!(out.freezes.len(), 1);
        assert_eq!(out.freezes[0].kind, EventKind::Boundary);
    }

    #[test]
    fn test_coincident_pair_freezes_at_time_zero() {
        let points = [pt(&[0.25, 0.25]), pt(&[0.25, 0.25]), pt(&[0.75, 0.75])];
        let out = run_scan(&points, Domain::UnitCube);

        assert_eq!(out.balls[0].radius, 0.0);
        assert_eq!(out.balls[1].radius, 0.0);
        // The third ball is untouched by the degenerate pair and freezes on
        // its own nearest wall.
        assert_eq!(out.balls[2].radius, 0.25);

        let first = out.freezes[0];
        assert_eq!(first.time, 0.0);
        assert_eq!(first.kind, EventKind::MutualGrowth);
        assert_eq!(first.point, 0);
        assert_eq!(first.partner, Some(1));
    }

    #[test]
    fn test_coincident_triple_all_freeze_at_zero() {
        let points = [pt(&[0.5, 0.5]), pt(&[0.5, 0.5]), pt(&[0.5, 0.5])];
        let out = run_scan(&points, Domain::UnitCube);
        assert!(out.balls.iter().all(|b| b.frozen && b.radius == 0.0));
        assert_eq!(out.freezes.len(), 2);
        assert!(out.freezes.iter().all(|f| f.time == 0.0));
    }

    #[test]
    fn test_freeze_times_never_decrease() {
        let points = sample_points(2, 40, 3).unwrap();
        let out = run_scan(&points, Domain::UnitCube);
        assert!(!out.freezes.is_empty());
        for w in out.freezes.windows(2) {
            assert!(w[1].time >= w[0].time, "{} then {}", w[0].time, w[1].time);
        }
    }

    #[test]
    fn test_every_ball_frozen_and_disjoint() {
        let points = sample_points(3, 60, 8).unwrap();
        let out = run_scan(&points, Domain::UnitCube);
        assert!(out.balls.iter().all(|b| b.frozen));
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                let d = points[i].distance(&points[j]);
                let sum = out.balls[i].radius + out.balls[j].radius;
                assert!(
                    d >= sum - NON_OVERLAP_EPS,
                    "balls {i} and {j} overlap: d={d} r+r={sum}"
                );
            }
        }
    }

    #[test]
    fn test_grid_and_scan_agree_exactly() {
        let points = sample_points(2, 120, 21).unwrap();
        let scan = run_scan(&points, Domain::UnitCube);
        let grid = GrowthScheduler::new(&points, Domain::UnitCube, GridIndex::build(&points))
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(scan, grid);
    }

    #[test]
    fn test_rejects_empty_point_set() {
        let err = GrowthScheduler::new(&[], Domain::UnitCube, ScanIndex::new()).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_rejects_mixed_dimensions() {
        let points = [pt(&[0.5]), pt(&[0.5, 0.5])];
        let err =
            GrowthScheduler::new(&points, Domain::Unbounded, ScanIndex::new()).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_rejects_points_outside_unit_cube() {
        let points = [pt(&[0.5, 1.5])];
        let err = GrowthScheduler::new(&points, Domain::UnitCube, ScanIndex::new()).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_rejects_non_finite_coordinates() {
        let points = [pt(&[f64::NAN])];
        let err =
            GrowthScheduler::new(&points, Domain::Unbounded, ScanIndex::new()).unwrap_err();
        assert!(err.is_invalid_parameter());
    }
}
