//! Core value types: anchor corners, axis-aligned rectangles, candidates.

use nalgebra::Vector2;

/// The four quadrant directions a square label can extend into from its
/// anchor. `TopLeft` means the square spans `[x-s, x] × [y, y+s]` in a y-up
/// frame, so the anchor sits at the label's bottom-right corner.
///
/// Indices follow the tabular output convention: 0 = top-left, 1 = top-right,
/// 2 = bottom-right, 3 = bottom-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

/// All corners in priority order; ties in clearance and gap scoring resolve
/// to the earliest entry.
pub const CORNERS: [Corner; 4] = [
    Corner::TopLeft,
    Corner::TopRight,
    Corner::BottomRight,
    Corner::BottomLeft,
];

impl Corner {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Corner::TopLeft => 0,
            Corner::TopRight => 1,
            Corner::BottomRight => 2,
            Corner::BottomLeft => 3,
        }
    }

    #[inline]
    pub fn from_index(i: usize) -> Option<Corner> {
        match i {
            0 => Some(Corner::TopLeft),
            1 => Some(Corner::TopRight),
            2 => Some(Corner::BottomRight),
            3 => Some(Corner::BottomLeft),
            _ => None,
        }
    }

    /// Outward signs `(sx, sy)` of the quadrant the square extends into.
    #[inline]
    pub fn signs(self) -> (f64, f64) {
        match self {
            Corner::TopLeft => (-1.0, 1.0),
            Corner::TopRight => (1.0, 1.0),
            Corner::BottomRight => (1.0, -1.0),
            Corner::BottomLeft => (-1.0, -1.0),
        }
    }
}

/// Axis-aligned rectangle `[xmin, xmax] × [ymin, ymax]`.
///
/// Rectangles are derived values: the engine recomputes them from a
/// candidate's anchor, size, and corner rather than storing them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Rect {
    #[inline]
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Square of side `size` hanging off `anchor` into `corner`'s quadrant.
    #[inline]
    pub fn anchored(anchor: Vector2<f64>, size: f64, corner: Corner) -> Self {
        let (sx, sy) = corner.signs();
        let xmin = if sx < 0.0 { anchor.x - size } else { anchor.x };
        let ymin = if sy < 0.0 { anchor.y - size } else { anchor.y };
        Self {
            xmin,
            ymin,
            xmax: xmin + size,
            ymax: ymin + size,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Open-interior overlap. Rectangles sharing only an edge or a corner
    /// point do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.xmin < other.xmax
            && other.xmin < self.xmax
            && self.ymin < other.ymax
            && other.ymin < self.ymax
    }

    /// True when `p` lies strictly inside; boundary points do not count.
    #[inline]
    pub fn strictly_contains(&self, p: Vector2<f64>) -> bool {
        self.xmin < p.x && p.x < self.xmax && self.ymin < p.y && p.y < self.ymax
    }

    /// True when `other` lies inside `self`, boundary contact allowed.
    #[inline]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.xmin <= other.xmin
            && other.xmax <= self.xmax
            && self.ymin <= other.ymin
            && other.ymax <= self.ymax
    }

    /// Euclidean separation between two rectangles; zero when they touch or
    /// overlap. Computed from the per-axis clamped differences.
    #[inline]
    pub fn gap(&self, other: &Rect) -> f64 {
        let dx = (self.xmin - other.xmax).max(other.xmin - self.xmax).max(0.0);
        let dy = (self.ymin - other.ymax).max(other.ymin - self.ymax).max(0.0);
        dx.hypot(dy)
    }

    /// Grow by `margin` on every side.
    #[inline]
    pub fn expand(&self, margin: f64) -> Rect {
        Rect {
            xmin: self.xmin - margin,
            ymin: self.ymin - margin,
            xmax: self.xmax + margin,
            ymax: self.ymax + margin,
        }
    }

    /// Tight bounding box of a point set; `None` for an empty slice.
    pub fn bounding(points: &[Vector2<f64>]) -> Option<Rect> {
        let first = points.first()?;
        let mut b = Rect::new(first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            b.xmin = b.xmin.min(p.x);
            b.ymin = b.ymin.min(p.y);
            b.xmax = b.xmax.max(p.x);
            b.ymax = b.ymax.max(p.y);
        }
        Some(b)
    }
}

/// One of the four proposed squares for a point; `valid` marks the chosen
/// one, at most one per point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelCandidate {
    pub point: usize,
    pub size: f64,
    pub corner: Corner,
    pub valid: bool,
}

impl LabelCandidate {
    /// The square this candidate occupies, given its anchor position.
    #[inline]
    pub fn rect(&self, anchor: Vector2<f64>) -> Rect {
        Rect::anchored(anchor, self.size, self.corner)
    }
}

/// Flat index of the candidate for `point` at `corner`: four slots per point
/// in `CORNERS` order.
#[inline]
pub fn candidate_index(point: usize, corner: Corner) -> usize {
    point * 4 + corner.index()
}

/// Four candidates per point in `CORNERS` order, all initially invalid.
pub fn generate_candidates(points: &[Vector2<f64>], size: f64) -> Vec<LabelCandidate> {
    let mut out = Vec::with_capacity(points.len() * 4);
    for point in 0..points.len() {
        for &corner in &CORNERS {
            out.push(LabelCandidate {
                point,
                size,
                corner,
                valid: false,
            });
        }
    }
    out
}
