//! Per-quadrant clearance and corner fixing.
//!
//! Purpose
//! - Fix a stable anchor corner per point before any placement runs: the
//!   label extends into the quadrant with the most room, and the choice is
//!   cached across size changes so labels do not flip orientation while the
//!   user zooms.
//!
//! Model
//! - Clearance of a quadrant is `min(|dx|, |dy|)` to the nearest foreign
//!   point strictly inside that open quadrant, infinite when the quadrant is
//!   empty. An empty quadrant wins immediately in priority order; otherwise
//!   the quadrant of maximum clearance wins, ties resolving to the earlier
//!   entry of `CORNERS`.
//!
//! Code cross-refs: `grid::PointGrid` (cell walk), `place::MonotoneState`
//! (caches the result per point set).

use crate::geom::{Corner, CORNERS};
use crate::grid::PointGrid;
use nalgebra::Vector2;

/// Clearance of `point`'s open quadrant in `corner`'s direction.
///
/// Walks grid cells ring by ring outward from the point's cell, restricted
/// to the quadrant's quarter-plane of cells. The walk stops once the best
/// clearance is at or below `ring * cell` (farther rings are taken as
/// unbeatable) or once the rings have swept the occupied extent.
pub fn quadrant_clearance(
    points: &[Vector2<f64>],
    grid: &PointGrid,
    point: usize,
    corner: Corner,
    eps: f64,
) -> f64 {
    let (lo, hi) = match grid.occupied_bounds() {
        Some(b) => b,
        None => return f64::INFINITY,
    };
    let p = points[point];
    let (sx, sy) = corner.signs();
    let (ci, cj) = grid.cell_of(p);
    let cell = grid.cell_size();
    let mut best = f64::INFINITY;
    let mut r: i64 = 0;
    loop {
        scan_quadrant_ring(points, grid, point, p, (sx, sy), (ci, cj), r, eps, &mut best);
        if best <= (r as f64) * cell {
            return best;
        }
        if ci - r <= lo.0 && cj - r <= lo.1 && ci + r >= hi.0 && cj + r >= hi.1 {
            return best;
        }
        r += 1;
    }
}

/// Fixed corner per point: the quadrant with maximum clearance, chosen once
/// per distinct point set and reused across sizes.
pub fn fixed_corners(points: &[Vector2<f64>], grid: &PointGrid, eps: f64) -> Vec<Corner> {
    (0..points.len())
        .map(|i| fix_corner(points, grid, i, eps))
        .collect()
}

fn fix_corner(points: &[Vector2<f64>], grid: &PointGrid, point: usize, eps: f64) -> Corner {
    let mut best = f64::NEG_INFINITY;
    let mut chosen = Corner::TopLeft;
    for &corner in &CORNERS {
        let c = quadrant_clearance(points, grid, point, corner, eps);
        if c == f64::INFINITY {
            return corner;
        }
        if c > best {
            best = c;
            chosen = corner;
        }
    }
    chosen
}

#[allow(clippy::too_many_arguments)]
fn scan_quadrant_ring(
    points: &[Vector2<f64>],
    grid: &PointGrid,
    point: usize,
    p: Vector2<f64>,
    signs: (f64, f64),
    center: (i64, i64),
    r: i64,
    eps: f64,
    best: &mut f64,
) {
    let (ci, cj) = center;
    let mut scan = |i: i64, j: i64| {
        // Quadrant points can only live in cells on the quadrant's side of
        // the anchor cell (the anchor's own row and column included).
        if ((i - ci) as f64) * signs.0 < 0.0 || ((j - cj) as f64) * signs.1 < 0.0 {
            return;
        }
        for &idx in grid.points_in_cell((i, j)) {
            if idx as usize == point {
                continue;
            }
            let q = points[idx as usize];
            let dx = q.x - p.x;
            let dy = q.y - p.y;
            if dx * signs.0 > eps && dy * signs.1 > eps {
                let c = dx.abs().min(dy.abs());
                if c < *best {
                    *best = c;
                }
            }
        }
    };
    if r == 0 {
        scan(ci, cj);
        return;
    }
    for i in (ci - r)..=(ci + r) {
        scan(i, cj - r);
        scan(i, cj + r);
    }
    for j in (cj - r + 1)..(cj + r) {
        scan(ci - r, j);
        scan(ci + r, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_for(points: &[Vector2<f64>], cell: f64) -> PointGrid {
        PointGrid::build(points, cell)
    }

    #[test]
    fn isolated_point_prefers_top_left() {
        let pts = [Vector2::new(0.3, -0.7)];
        let grid = grid_for(&pts, 0.5);
        assert_eq!(fixed_corners(&pts, &grid, 1e-12), vec![Corner::TopLeft]);
        assert_eq!(
            quadrant_clearance(&pts, &grid, 0, Corner::BottomRight, 1e-12),
            f64::INFINITY
        );
    }

    #[test]
    fn first_empty_quadrant_wins() {
        // The only neighbor sits top-right, so top-left is empty and wins
        // before the top-right clearance is even considered.
        let pts = [Vector2::new(0.0, 0.0), Vector2::new(0.4, 0.3)];
        let grid = grid_for(&pts, 0.5);
        let corners = fixed_corners(&pts, &grid, 1e-12);
        assert_eq!(corners[0], Corner::TopLeft);
        let tr = quadrant_clearance(&pts, &grid, 0, Corner::TopRight, 1e-12);
        assert!((tr - 0.3).abs() < 1e-12);
    }

    #[test]
    fn surrounded_point_takes_max_clearance() {
        let pts = [
            Vector2::new(0.0, 0.0),
            Vector2::new(-0.5, 0.2),
            Vector2::new(0.4, 0.3),
            Vector2::new(0.2, -0.6),
            Vector2::new(-0.1, -0.1),
        ];
        let grid = grid_for(&pts, 0.5);
        let c = |corner| quadrant_clearance(&pts, &grid, 0, corner, 1e-12);
        assert!((c(Corner::TopLeft) - 0.2).abs() < 1e-12);
        assert!((c(Corner::TopRight) - 0.3).abs() < 1e-12);
        assert!((c(Corner::BottomRight) - 0.2).abs() < 1e-12);
        assert!((c(Corner::BottomLeft) - 0.1).abs() < 1e-12);
        assert_eq!(fixed_corners(&pts, &grid, 1e-12)[0], Corner::TopRight);
    }

    #[test]
    fn clearance_tie_breaks_by_priority() {
        let pts = [
            Vector2::new(0.0, 0.0),
            Vector2::new(-0.3, 0.3),
            Vector2::new(0.3, 0.3),
            Vector2::new(0.3, -0.3),
            Vector2::new(-0.3, -0.3),
        ];
        let grid = grid_for(&pts, 0.5);
        assert_eq!(fixed_corners(&pts, &grid, 1e-12)[0], Corner::TopLeft);
    }

    #[test]
    fn axis_aligned_neighbors_land_in_no_quadrant() {
        // dy == 0 fails the strict quadrant test on every corner.
        let pts = [Vector2::new(0.0, 0.0), Vector2::new(0.5, 0.0)];
        let grid = grid_for(&pts, 0.5);
        for &corner in &CORNERS {
            assert_eq!(
                quadrant_clearance(&pts, &grid, 0, corner, 1e-12),
                f64::INFINITY
            );
        }
        assert_eq!(fixed_corners(&pts, &grid, 1e-12)[0], Corner::TopLeft);
    }

    #[test]
    fn coincident_points_see_empty_quadrants() {
        let pts = [Vector2::new(0.5, 0.5), Vector2::new(0.5, 0.5)];
        let grid = grid_for(&pts, 0.25);
        let corners = fixed_corners(&pts, &grid, 1e-12);
        assert_eq!(corners, vec![Corner::TopLeft, Corner::TopLeft]);
    }

    #[test]
    fn far_neighbor_is_found_across_rings() {
        // Neighbor several cells away in the top-right quadrant; the ring
        // walk has to expand past empty rings to find it.
        let pts = [Vector2::new(0.0, 0.0), Vector2::new(1.7, 1.3)];
        let grid = grid_for(&pts, 0.25);
        let tr = quadrant_clearance(&pts, &grid, 0, Corner::TopRight, 1e-12);
        assert!((tr - 1.3).abs() < 1e-12);
    }
}
