//! The stateless greedy placement pass.

use std::cmp::Reverse;

use nalgebra::Vector2;

use crate::geom::{candidate_index, LabelCandidate, Rect, CORNERS};
use crate::grid::{PointGrid, RectStore};

use super::types::{CornerRule, PlaceCfg, PlaceError};

/// One greedy placement pass over all points.
///
/// Points are visited densest-first (3x3 cell neighborhood count at the
/// current size, ties by index) so crowded regions are resolved while the
/// most freedom remains. Each point's candidate square is rejected if it
/// strictly contains a foreign anchor or overlaps an accepted label; under
/// `CornerRule::Free` the feasible corner with the largest distance to the
/// placed set wins, ties resolving in `CORNERS` order. Infeasibility is an
/// ordinary outcome, not an error: such a point keeps all candidates
/// invalid for this pass.
///
/// Candidates arriving with `valid = true` are treated as externally forced:
/// their rectangles are inserted unchecked and their points are skipped.
///
/// Returns the accepted rectangles in placement order. Precondition
/// violations are rejected without mutating `candidates`.
pub fn place_labels(
    points: &[Vector2<f64>],
    candidates: &mut [LabelCandidate],
    size: f64,
    rule: CornerRule<'_>,
    cfg: &PlaceCfg,
) -> Result<Vec<Rect>, PlaceError> {
    cfg.validate()?;
    validate_size(size)?;
    validate_points(points)?;
    validate_layout(points, candidates)?;
    for (k, c) in candidates.iter().enumerate() {
        if !c.size.is_finite() || c.size <= 0.0 {
            return Err(PlaceError::input(format!(
                "candidate {k} has a non-positive size"
            )));
        }
    }
    for p in 0..points.len() {
        let forced = (0..4).filter(|&c| candidates[p * 4 + c].valid).count();
        if forced > 1 {
            return Err(PlaceError::input(format!(
                "point {p} has {forced} forced candidates, at most one is allowed"
            )));
        }
    }
    if let CornerRule::Fixed(corners) = rule {
        if corners.len() != points.len() {
            return Err(PlaceError::input(format!(
                "expected {} fixed corners, got {}",
                points.len(),
                corners.len()
            )));
        }
    }

    let grid = PointGrid::build(points, size);
    Ok(place_on_grid(points, candidates, &grid, rule, cfg, size))
}

/// The pass body, on a caller-supplied point grid. Inputs are assumed valid.
pub(crate) fn place_on_grid(
    points: &[Vector2<f64>],
    candidates: &mut [LabelCandidate],
    grid: &PointGrid,
    rule: CornerRule<'_>,
    cfg: &PlaceCfg,
    size: f64,
) -> Vec<Rect> {
    let mut store = RectStore::for_run(cfg.store, points, size);
    let mut placed = Vec::new();
    let mut done = vec![false; points.len()];

    for k in 0..candidates.len() {
        if candidates[k].valid {
            let p = candidates[k].point;
            let rect = candidates[k].rect(points[p]);
            store.insert(rect);
            placed.push(rect);
            done[p] = true;
        }
    }

    let mut order: Vec<u32> = (0..points.len() as u32)
        .filter(|&p| !done[p as usize])
        .collect();
    order.sort_by_key(|&p| (Reverse(grid.local_density(points[p as usize])), p));

    for &p in &order {
        let p = p as usize;
        let chosen = match rule {
            CornerRule::Fixed(corners) => {
                let k = candidate_index(p, corners[p]);
                let rect = candidates[k].rect(points[p]);
                if feasible(points, grid, &store, &rect, p) {
                    Some((k, rect))
                } else {
                    None
                }
            }
            CornerRule::Free => {
                let mut best: Option<(usize, Rect, f64)> = None;
                for &corner in &CORNERS {
                    let k = candidate_index(p, corner);
                    let rect = candidates[k].rect(points[p]);
                    if !feasible(points, grid, &store, &rect, p) {
                        continue;
                    }
                    let score = store.min_gap_to_any(&rect);
                    let better = match &best {
                        Some((_, _, s)) => score > *s,
                        None => true,
                    };
                    if better {
                        best = Some((k, rect, score));
                    }
                }
                best.map(|(k, rect, _)| (k, rect))
            }
        };
        if let Some((k, rect)) = chosen {
            candidates[k].valid = true;
            store.insert(rect);
            placed.push(rect);
        }
    }
    placed
}

/// A candidate square is feasible when it neither strictly contains a
/// foreign anchor nor overlaps an accepted label.
pub(crate) fn feasible(
    points: &[Vector2<f64>],
    grid: &PointGrid,
    store: &RectStore,
    rect: &Rect,
    owner: usize,
) -> bool {
    !grid.any_foreign_point_inside(points, rect, owner) && !store.overlaps_any(rect)
}

pub(crate) fn validate_points(points: &[Vector2<f64>]) -> Result<(), PlaceError> {
    for (i, p) in points.iter().enumerate() {
        if !(p.x.is_finite() && p.y.is_finite()) {
            return Err(PlaceError::input(format!(
                "point {i} has a non-finite coordinate"
            )));
        }
    }
    Ok(())
}

pub(crate) fn validate_size(size: f64) -> Result<(), PlaceError> {
    if !size.is_finite() || size <= 0.0 {
        return Err(PlaceError::input("label size must be finite and positive"));
    }
    Ok(())
}

pub(crate) fn validate_layout(
    points: &[Vector2<f64>],
    candidates: &[LabelCandidate],
) -> Result<(), PlaceError> {
    if candidates.len() != points.len() * 4 {
        return Err(PlaceError::input(format!(
            "expected {} candidates for {} points, got {}",
            points.len() * 4,
            points.len(),
            candidates.len()
        )));
    }
    for (k, c) in candidates.iter().enumerate() {
        if c.point != k / 4 || c.corner != CORNERS[k % 4] {
            return Err(PlaceError::input(format!(
                "candidate {k} breaks the four-per-point corner layout"
            )));
        }
    }
    Ok(())
}
