//! Closed dispatch over the two rectangle indices.

use crate::geom::Rect;
use crate::grid::{RectGrid, RectQuadtree};
use nalgebra::Vector2;

/// Which rectangle index a placement run should use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Grid,
    Quadtree,
}

impl Default for StoreKind {
    fn default() -> Self {
        StoreKind::Grid
    }
}

/// The rectangle index of one placement run.
///
/// A two-variant enum rather than a trait object: both structures are
/// hot-path and the match arms stay inlineable.
pub enum RectStore {
    Grid(RectGrid),
    Quadtree(RectQuadtree),
}

impl RectStore {
    /// Empty store sized for a run over `points` at label side `size`.
    pub fn for_run(kind: StoreKind, points: &[Vector2<f64>], size: f64) -> Self {
        match kind {
            StoreKind::Grid => RectStore::Grid(RectGrid::new(size)),
            StoreKind::Quadtree => {
                // Labels extend at most `size` beyond their anchors.
                let region = match Rect::bounding(points) {
                    Some(b) => b.expand(size),
                    None => Rect::new(-1.0, -1.0, 1.0, 1.0),
                };
                RectStore::Quadtree(RectQuadtree::new(region))
            }
        }
    }

    pub fn insert(&mut self, rect: Rect) {
        match self {
            RectStore::Grid(g) => g.insert(rect),
            RectStore::Quadtree(t) => t.insert(rect),
        }
    }

    pub fn overlaps_any(&self, rect: &Rect) -> bool {
        match self {
            RectStore::Grid(g) => g.overlaps_any(rect),
            RectStore::Quadtree(t) => t.overlaps_any(rect),
        }
    }

    pub fn min_gap_to_any(&self, rect: &Rect) -> f64 {
        match self {
            RectStore::Grid(g) => g.min_gap_to_any(rect),
            RectStore::Quadtree(t) => t.min_gap_to_any(rect),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            RectStore::Grid(g) => g.len(),
            RectStore::Quadtree(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
