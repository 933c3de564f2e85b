//! Retention and growth passes for repeated placement under a changing size.

use std::cmp::Reverse;

use nalgebra::Vector2;

use crate::clearance::fixed_corners;
use crate::geom::{candidate_index, LabelCandidate, Rect};
use crate::grid::{PointGrid, RectStore};

use super::greedy::{feasible, validate_layout, validate_points, validate_size};
use super::types::{MonotoneState, PlaceCfg, PlaceError};

/// Greedy placement with hysteresis across calls.
///
/// Every call first re-tests the previously active labels at the new size
/// and retains those still feasible, in the order they were accepted. Only
/// when the size shrank (the view zoomed out) does a growth pass follow, in
/// which unlabeled points may claim their fixed corner, densest-first. A size
/// increase therefore only ever removes labels and a decrease only ever adds
/// them, so the active set changes monotonically with the zoom direction and
/// labels never flicker.
///
/// The state is rebuilt from scratch when the point count differs from the
/// one the state was built for. Swapping in a different point set of the
/// same cardinality requires a fresh `MonotoneState`; the engine cannot
/// detect that.
///
/// Incoming `valid` flags and candidate sizes are ignored: all candidates
/// are reset to invalid at `size` before the passes run.
pub fn place_labels_monotone(
    points: &[Vector2<f64>],
    candidates: &mut [LabelCandidate],
    size: f64,
    state: &mut MonotoneState,
    cfg: &PlaceCfg,
) -> Result<Vec<Rect>, PlaceError> {
    cfg.validate()?;
    validate_size(size)?;
    validate_points(points)?;
    validate_layout(points, candidates)?;

    let n = points.len();
    let reinit = state.fixed_corner.len() != n || state.labeled_once.len() != n;
    if !reinit {
        if let Some(&k) = state.active.iter().find(|&&k| k >= candidates.len()) {
            return Err(PlaceError::input(format!(
                "state holds active candidate {k}, out of range for {} candidates",
                candidates.len()
            )));
        }
    }

    let grid = PointGrid::build(points, size);

    if reinit {
        state.fixed_corner = fixed_corners(points, &grid, cfg.eps_quadrant);
        state.labeled_once = vec![false; n];
        state.active.clear();
        state.last_size = -1.0;
    }
    let zooming_out = !state.is_initialized() || size < state.last_size;

    for c in candidates.iter_mut() {
        c.valid = false;
        c.size = size;
    }

    let mut store = RectStore::for_run(cfg.store, points, size);
    let mut placed = Vec::new();
    let mut next_active = Vec::new();
    let mut labeled = vec![false; n];

    // Retention: previously active labels stay whenever still feasible.
    let prev_active = std::mem::take(&mut state.active);
    for &k in &prev_active {
        let p = candidates[k].point;
        let rect = candidates[k].rect(points[p]);
        if feasible(points, &grid, &store, &rect, p) {
            candidates[k].valid = true;
            store.insert(rect);
            placed.push(rect);
            next_active.push(k);
            labeled[p] = true;
        }
    }

    // Growth: only a zoom out may label new points.
    if zooming_out {
        let mut order: Vec<u32> = (0..n as u32).filter(|&p| !labeled[p as usize]).collect();
        order.sort_by_key(|&p| (Reverse(grid.local_density(points[p as usize])), p));
        for &p in &order {
            let p = p as usize;
            let k = candidate_index(p, state.fixed_corner[p]);
            let rect = candidates[k].rect(points[p]);
            if feasible(points, &grid, &store, &rect, p) {
                candidates[k].valid = true;
                store.insert(rect);
                placed.push(rect);
                next_active.push(k);
            }
        }
    }

    next_active.sort_unstable();
    for &k in &next_active {
        state.labeled_once[candidates[k].point] = true;
    }
    state.active = next_active;
    state.last_size = size;
    Ok(placed)
}
