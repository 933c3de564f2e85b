//! Per-point visibility thresholds over a family of label sizes.
//!
//! Purpose
//! - Answer, for every point of a scatter, up to which label size the greedy
//!   pass still gives it a label. A zooming client can then decide visibility
//!   with one comparison per point instead of a placement run per frame.
//!
//! Search
//! - Each point carries a bracket `[lo, hi]`: `lo` is the largest size it was
//!   observed labeled at, `hi` the smallest size it was observed unlabeled
//!   at. Three phases tighten the brackets, each built from stateless runs
//!   of the fixed-corner pass:
//!   1. a log-spaced sweep across `[smin, smax]`,
//!   2. a geometric growth walk from `smin` that stops once no point has
//!      survived every probe so far,
//!   3. batched bisection, probing the median of all unresolved midpoints so
//!      one run serves many brackets.
//! - Greedy placement is not monotone in the size, so a point can die below
//!   its best known alive size. Such observations are ignored rather than
//!   allowed to invert the bracket; the reported threshold is always a size
//!   the point was actually labeled at.

use nalgebra::Vector2;

use crate::clearance::fixed_corners;
use crate::geom::{candidate_index, generate_candidates, Corner};
use crate::grid::PointGrid;
use crate::place::{place_on_grid, validate_points, validate_size};
use crate::place::{CornerRule, PlaceCfg, PlaceError};

/// Search parameters for [`zoom_thresholds`].
#[derive(Clone, Copy, Debug)]
pub struct ThresholdCfg {
    /// Smallest size probed.
    pub smin: f64,
    /// Largest size probed; thresholds saturate here.
    pub smax: f64,
    /// Brackets at most this wide count as resolved.
    pub eps: f64,
    /// Multiplicative step of the growth walk, above 1.
    pub growth: f64,
    /// Probe cap for the growth walk.
    pub max_growth: u32,
    /// Probe cap for the bisection phase.
    pub max_refine: u32,
    /// Number of sweep probes; 0 derives a count from the size range and
    /// `growth`.
    pub samples: u32,
    /// Whether the sweep phase runs at all. Off, the search relies on the
    /// growth walk and bisection alone.
    pub multi_sample: bool,
    /// Placement settings shared by every probe.
    pub place: PlaceCfg,
}

impl Default for ThresholdCfg {
    fn default() -> Self {
        Self {
            smin: 1e-4,
            smax: 1.0,
            eps: 1e-4,
            growth: 1.2,
            max_growth: 56,
            max_refine: 64,
            samples: 0,
            multi_sample: true,
            place: PlaceCfg::default(),
        }
    }
}

impl ThresholdCfg {
    pub fn validate(&self) -> Result<(), PlaceError> {
        self.place.validate()?;
        if !self.smin.is_finite() || self.smin <= 0.0 {
            return Err(PlaceError::cfg("smin must be finite and positive"));
        }
        if !self.smax.is_finite() || self.smax <= self.smin {
            return Err(PlaceError::cfg("smax must be finite and larger than smin"));
        }
        if !self.eps.is_finite() || self.eps <= 0.0 {
            return Err(PlaceError::cfg("eps must be finite and positive"));
        }
        if !self.growth.is_finite() || self.growth <= 1.0 {
            return Err(PlaceError::cfg("growth must be finite and larger than 1"));
        }
        Ok(())
    }

    /// Sweep probe count: the explicit `samples`, or enough log-spaced steps
    /// to cover `[smin, smax]` at `growth` spacing, at least 8.
    fn sample_count(&self) -> usize {
        if self.samples > 0 {
            return self.samples as usize;
        }
        let steps = (self.smax / self.smin).ln() / self.growth.ln();
        steps.ceil().max(8.0) as usize
    }
}

/// Outcome of one stateless fixed-corner run at a single size.
#[derive(Clone, Debug)]
pub struct ScaleRun {
    /// Whether each point won its label.
    pub alive: Vec<bool>,
    /// The corner each point anchored at, from the run's clearance pass.
    pub corner: Vec<Corner>,
}

/// One fixed-corner placement run at `size`, on fresh candidates.
pub fn run_at_scale(
    points: &[Vector2<f64>],
    size: f64,
    cfg: &PlaceCfg,
) -> Result<ScaleRun, PlaceError> {
    cfg.validate()?;
    validate_size(size)?;
    validate_points(points)?;
    Ok(probe(points, size, cfg))
}

fn probe(points: &[Vector2<f64>], size: f64, cfg: &PlaceCfg) -> ScaleRun {
    let grid = PointGrid::build(points, size);
    let corner = fixed_corners(points, &grid, cfg.eps_quadrant);
    let mut candidates = generate_candidates(points, size);
    place_on_grid(
        points,
        &mut candidates,
        &grid,
        CornerRule::Fixed(&corner),
        cfg,
        size,
    );
    let alive = corner
        .iter()
        .enumerate()
        .map(|(p, &c)| candidates[candidate_index(p, c)].valid)
        .collect();
    ScaleRun { alive, corner }
}

/// Per-point search outcome of [`zoom_thresholds`].
#[derive(Clone, Debug)]
pub struct ThresholdResult {
    /// Largest size each point was observed labeled at; `f64::INFINITY` for
    /// points that lost at every probed size.
    pub size: Vec<f64>,
    /// Corner in effect at the recorded size; for never-labeled points, the
    /// fixed corner at `smin`.
    pub corner: Vec<Corner>,
    /// Whether the point was labeled at any probed size.
    pub labeled: Vec<bool>,
    /// Probes spent in the sweep phase.
    pub sweep_runs: u32,
    /// Probes spent in the growth walk.
    pub growth_runs: u32,
    /// Probes spent in bisection.
    pub refine_runs: u32,
}

/// Per-point brackets folded over probe outcomes.
struct Brackets {
    lo: Vec<f64>,
    hi: Vec<f64>,
    ever: Vec<bool>,
    corner: Vec<Corner>,
}

impl Brackets {
    fn new(cfg: &ThresholdCfg, corner: Vec<Corner>) -> Self {
        let n = corner.len();
        Self {
            lo: vec![cfg.smin; n],
            hi: vec![cfg.smax; n],
            ever: vec![false; n],
            corner,
        }
    }

    fn observe(&mut self, run: &ScaleRun, size: f64) {
        for p in 0..self.lo.len() {
            self.observe_point(p, run, size);
        }
    }

    /// The lower edge only rises and carries the run's corner with it; the
    /// upper edge only tightens, and a death at or below the best known
    /// alive size is discarded.
    fn observe_point(&mut self, p: usize, run: &ScaleRun, size: f64) {
        if run.alive[p] {
            if size >= self.lo[p] {
                self.lo[p] = size;
                self.corner[p] = run.corner[p];
            }
            self.ever[p] = true;
        } else if self.lo[p] < size && size < self.hi[p] {
            self.hi[p] = size;
        }
    }

    fn unresolved(&self, p: usize, eps: f64) -> bool {
        self.hi[p] - self.lo[p] > eps
    }
}

/// Bracket every point's visibility threshold within `[cfg.smin, cfg.smax]`.
///
/// The result reports, per point, the largest size it was actually labeled
/// at, so thresholds under-estimate rather than over-estimate visibility.
/// Points that lost at every probe report `f64::INFINITY` with
/// `labeled = false`.
pub fn zoom_thresholds(
    points: &[Vector2<f64>],
    cfg: &ThresholdCfg,
) -> Result<ThresholdResult, PlaceError> {
    cfg.validate()?;
    validate_points(points)?;

    let n = points.len();
    let initial = {
        let grid = PointGrid::build(points, cfg.smin);
        fixed_corners(points, &grid, cfg.place.eps_quadrant)
    };
    let mut br = Brackets::new(cfg, initial);

    let mut sweep_runs = 0u32;
    if cfg.multi_sample {
        let samples = cfg.sample_count();
        let log_min = cfg.smin.ln();
        let log_max = cfg.smax.ln();
        for i in 0..samples {
            // Endpoints are probed exactly; interpolating through logs can
            // drift off them by an ulp.
            let size = if i == 0 {
                cfg.smin
            } else if i + 1 == samples {
                cfg.smax
            } else {
                let t = i as f64 / (samples - 1) as f64;
                (log_min + t * (log_max - log_min)).exp()
            };
            let run = probe(points, size, &cfg.place);
            sweep_runs += 1;
            br.observe(&run, size);
        }
    }

    let mut growth_runs = 0u32;
    {
        let mut alive = vec![true; n];
        let mut size = cfg.smin;
        let mut step = 0;
        while step < cfg.max_growth && size < cfg.smax {
            let run = probe(points, size, &cfg.place);
            growth_runs += 1;
            br.observe(&run, size);
            let mut any = false;
            for p in 0..n {
                alive[p] &= run.alive[p];
                any |= alive[p];
            }
            if !any {
                break;
            }
            step += 1;
            size *= cfg.growth;
            if size > cfg.smax {
                size = cfg.smax;
            }
        }
    }

    let mut refine_runs = 0u32;
    for _ in 0..cfg.max_refine {
        let mut mids: Vec<f64> = (0..n)
            .filter(|&p| br.unresolved(p, cfg.eps))
            .map(|p| 0.5 * (br.lo[p] + br.hi[p]))
            .collect();
        if mids.is_empty() {
            break;
        }
        // One probe serves every open bracket: test at the median midpoint.
        let m = mids.len() / 2;
        let test_size = *mids.select_nth_unstable_by(m, |a, b| a.total_cmp(b)).1;
        let run = probe(points, test_size, &cfg.place);
        refine_runs += 1;
        for p in 0..n {
            if br.unresolved(p, cfg.eps) {
                br.observe_point(p, &run, test_size);
            }
        }
    }

    let mut size = vec![f64::INFINITY; n];
    let mut labeled = vec![false; n];
    for p in 0..n {
        if br.ever[p] {
            size[p] = br.lo[p];
            labeled[p] = true;
        }
    }
    Ok(ThresholdResult {
        size,
        corner: br.corner,
        labeled,
        sweep_runs,
        growth_runs,
        refine_runs,
    })
}
