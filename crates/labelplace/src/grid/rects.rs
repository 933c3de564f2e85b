//! Uniform hash grid over placed rectangles.

use crate::geom::Rect;
use rustc_hash::FxHashMap;

/// Cell-bucketed index of accepted label rectangles.
///
/// A rectangle is registered in every cell its extent overlaps, so an
/// overlap query only visits the query's own cells. Gap queries expand
/// outward ring by ring until no farther cell can hold a closer rectangle.
pub struct RectGrid {
    cell: f64,
    rects: Vec<Rect>,
    cells: FxHashMap<(i64, i64), Vec<u32>>,
    lo: (i64, i64),
    hi: (i64, i64),
}

impl RectGrid {
    /// Empty grid with cells of side `cell` (usually the current label size).
    pub fn new(cell: f64) -> Self {
        Self {
            cell: cell.max(1e-12),
            rects: Vec::new(),
            cells: FxHashMap::default(),
            lo: (i64::MAX, i64::MAX),
            hi: (i64::MIN, i64::MIN),
        }
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Register `rect` in every cell it overlaps.
    pub fn insert(&mut self, rect: Rect) {
        let id = self.rects.len() as u32;
        self.rects.push(rect);
        let (x0, y0, x1, y1) = self.cell_range(&rect);
        self.lo = (self.lo.0.min(x0), self.lo.1.min(y0));
        self.hi = (self.hi.0.max(x1), self.hi.1.max(y1));
        for i in x0..=x1 {
            for j in y0..=y1 {
                self.cells.entry((i, j)).or_default().push(id);
            }
        }
    }

    /// True when `rect` overlaps any registered rectangle (open interiors).
    pub fn overlaps_any(&self, rect: &Rect) -> bool {
        let (x0, y0, x1, y1) = self.cell_range(rect);
        for i in x0..=x1 {
            for j in y0..=y1 {
                if let Some(ids) = self.cells.get(&(i, j)) {
                    for &id in ids {
                        if self.rects[id as usize].overlaps(rect) {
                            return true;
                        }
                    }
                }
            }
        }
        false
    }

    /// Smallest separation from `rect` to any registered rectangle;
    /// `f64::INFINITY` when the grid is empty, `0.0` on touch or overlap.
    ///
    /// Rings are scanned outward from the query's covered cells. A rectangle
    /// first reachable at ring `r+1` lies entirely outside the covered range
    /// expanded by `r` cells, so its gap is at least `r * cell`; once the
    /// best gap drops to that bound the scan stops.
    pub fn min_gap_to_any(&self, rect: &Rect) -> f64 {
        if self.rects.is_empty() {
            return f64::INFINITY;
        }
        let (x0, y0, x1, y1) = self.cell_range(rect);
        let mut best = f64::INFINITY;
        let mut r: i64 = 0;
        loop {
            self.scan_ring(rect, (x0, y0, x1, y1), r, &mut best);
            if best == 0.0 {
                return 0.0;
            }
            if best <= (r as f64) * self.cell {
                return best;
            }
            let covered = (x0 - r, y0 - r, x1 + r, y1 + r);
            if covered.0 <= self.lo.0
                && covered.1 <= self.lo.1
                && covered.2 >= self.hi.0
                && covered.3 >= self.hi.1
            {
                return best;
            }
            r += 1;
        }
    }

    fn scan_ring(&self, rect: &Rect, range: (i64, i64, i64, i64), r: i64, best: &mut f64) {
        let (x0, y0, x1, y1) = range;
        if r == 0 {
            for i in x0..=x1 {
                for j in y0..=y1 {
                    self.scan_cell((i, j), rect, best);
                }
            }
            return;
        }
        let (lx, hx) = (x0 - r, x1 + r);
        let (ly, hy) = (y0 - r, y1 + r);
        for i in lx..=hx {
            self.scan_cell((i, ly), rect, best);
            self.scan_cell((i, hy), rect, best);
        }
        for j in (ly + 1)..hy {
            self.scan_cell((lx, j), rect, best);
            self.scan_cell((hx, j), rect, best);
        }
    }

    #[inline]
    fn scan_cell(&self, key: (i64, i64), rect: &Rect, best: &mut f64) {
        if let Some(ids) = self.cells.get(&key) {
            for &id in ids {
                let g = self.rects[id as usize].gap(rect);
                if g < *best {
                    *best = g;
                }
            }
        }
    }

    #[inline]
    fn cell_range(&self, rect: &Rect) -> (i64, i64, i64, i64) {
        (
            (rect.xmin / self.cell).floor() as i64,
            (rect.ymin / self.cell).floor() as i64,
            (rect.xmax / self.cell).floor() as i64,
            (rect.ymax / self.cell).floor() as i64,
        )
    }
}
