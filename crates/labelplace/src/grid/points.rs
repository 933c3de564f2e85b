//! Uniform hash grid over anchor points.

use nalgebra::Vector2;
use rustc_hash::FxHashMap;

/// Buckets point indices into square cells keyed by floored coordinates.
///
/// The cell side is chosen equal to the current label size, so a candidate
/// square touches at most a handful of cells and the 3x3 neighborhood around
/// a point approximates its crowding at the current scale.
pub struct PointGrid {
    cell: f64,
    cells: FxHashMap<(i64, i64), Vec<u32>>,
    lo: (i64, i64),
    hi: (i64, i64),
}

impl PointGrid {
    /// Bucket `points` into cells of side `cell`.
    pub fn build(points: &[Vector2<f64>], cell: f64) -> Self {
        let cell = cell.max(1e-12);
        let mut cells: FxHashMap<(i64, i64), Vec<u32>> = FxHashMap::default();
        let mut lo = (i64::MAX, i64::MAX);
        let mut hi = (i64::MIN, i64::MIN);
        for (i, p) in points.iter().enumerate() {
            let key = cell_key(*p, cell);
            lo = (lo.0.min(key.0), lo.1.min(key.1));
            hi = (hi.0.max(key.0), hi.1.max(key.1));
            cells.entry(key).or_default().push(i as u32);
        }
        Self { cell, cells, lo, hi }
    }

    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell
    }

    /// Cell coordinates of a position.
    #[inline]
    pub fn cell_of(&self, p: Vector2<f64>) -> (i64, i64) {
        cell_key(p, self.cell)
    }

    /// Point indices bucketed in `key`; empty when the cell is vacant.
    #[inline]
    pub fn points_in_cell(&self, key: (i64, i64)) -> &[u32] {
        self.cells.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Inclusive bounds of occupied cells, `None` when the grid is empty.
    pub fn occupied_bounds(&self) -> Option<((i64, i64), (i64, i64))> {
        if self.cells.is_empty() {
            None
        } else {
            Some((self.lo, self.hi))
        }
    }

    /// True when any point other than `exclude` lies strictly inside `rect`.
    ///
    /// Scans only the cells overlapped by the rectangle's extent; membership
    /// is re-checked exactly, so the answer does not depend on the cell size.
    pub fn any_foreign_point_inside(
        &self,
        points: &[Vector2<f64>],
        rect: &crate::geom::Rect,
        exclude: usize,
    ) -> bool {
        let (ix0, iy0) = cell_key(Vector2::new(rect.xmin, rect.ymin), self.cell);
        let (ix1, iy1) = cell_key(Vector2::new(rect.xmax, rect.ymax), self.cell);
        for i in ix0..=ix1 {
            for j in iy0..=iy1 {
                for &idx in self.points_in_cell((i, j)) {
                    if idx as usize != exclude && rect.strictly_contains(points[idx as usize]) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Number of points in the 3x3 cell block around `p` (including `p`
    /// itself). Used to order placement densest-first.
    pub fn local_density(&self, p: Vector2<f64>) -> usize {
        let (ci, cj) = self.cell_of(p);
        let mut n = 0;
        for i in (ci - 1)..=(ci + 1) {
            for j in (cj - 1)..=(cj + 1) {
                n += self.points_in_cell((i, j)).len();
            }
        }
        n
    }
}

#[inline]
fn cell_key(p: Vector2<f64>, cell: f64) -> (i64, i64) {
    ((p.x / cell).floor() as i64, (p.y / cell).floor() as i64)
}
