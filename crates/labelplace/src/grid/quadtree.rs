//! Region quadtree over placed rectangles.

use crate::geom::Rect;

const NO_CHILD: u32 = u32::MAX;
/// Descent cap; below this the region side has shrunk by 2^16 and further
/// splitting cannot pay off.
const MAX_DEPTH: u32 = 16;

struct Node {
    region: Rect,
    children: [u32; 4],
    items: Vec<u32>,
}

/// Quadtree whose nodes live in an arena and reference children by index.
///
/// A rectangle is stored at the shallowest node whose region fully contains
/// it, so straddling rectangles sit at interior nodes instead of being
/// duplicated per quadrant. Rectangles outside the root region stay at the
/// root; queries always visit it.
pub struct RectQuadtree {
    nodes: Vec<Node>,
    rects: Vec<Rect>,
}

impl RectQuadtree {
    /// Empty tree covering `region`.
    pub fn new(region: Rect) -> Self {
        Self {
            nodes: vec![Node {
                region,
                children: [NO_CHILD; 4],
                items: Vec::new(),
            }],
            rects: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Store `rect` at the shallowest node fully containing it.
    pub fn insert(&mut self, rect: Rect) {
        let id = self.rects.len() as u32;
        self.rects.push(rect);
        let mut node = 0usize;
        for _ in 0..MAX_DEPTH {
            match self.containing_quadrant(node, &rect) {
                Some(q) => node = self.ensure_child(node, q),
                None => break,
            }
        }
        self.nodes[node].items.push(id);
    }

    /// True when `rect` overlaps any stored rectangle (open interiors).
    pub fn overlaps_any(&self, rect: &Rect) -> bool {
        let mut stack = vec![0u32];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id as usize];
            for &item in &node.items {
                if self.rects[item as usize].overlaps(rect) {
                    return true;
                }
            }
            for &child in &node.children {
                if child != NO_CHILD && self.nodes[child as usize].region.overlaps(rect) {
                    stack.push(child);
                }
            }
        }
        false
    }

    /// Smallest separation from `rect` to any stored rectangle;
    /// `f64::INFINITY` when the tree is empty, `0.0` on touch or overlap.
    ///
    /// Subtrees are pruned by the gap to their region: every rectangle below
    /// a node lies inside that node's region, so the region gap bounds the
    /// item gaps from below. Root items are exempt (they may straddle or sit
    /// outside the region) and are always checked.
    pub fn min_gap_to_any(&self, rect: &Rect) -> f64 {
        let mut best = f64::INFINITY;
        let mut stack = vec![0u32];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id as usize];
            if id != 0 && rect.gap(&node.region) >= best {
                continue;
            }
            for &item in &node.items {
                let g = self.rects[item as usize].gap(rect);
                if g < best {
                    best = g;
                }
            }
            if best == 0.0 {
                return 0.0;
            }
            for &child in &node.children {
                if child != NO_CHILD && rect.gap(&self.nodes[child as usize].region) < best {
                    stack.push(child);
                }
            }
        }
        best
    }

    /// Index of the quadrant of `node`'s region fully containing `rect`,
    /// `None` when it straddles a split line or falls outside.
    fn containing_quadrant(&self, node: usize, rect: &Rect) -> Option<usize> {
        let region = self.nodes[node].region;
        for (q, quadrant) in quadrants(&region).iter().enumerate() {
            if quadrant.contains_rect(rect) {
                return Some(q);
            }
        }
        None
    }

    fn ensure_child(&mut self, node: usize, q: usize) -> usize {
        if self.nodes[node].children[q] == NO_CHILD {
            let region = quadrants(&self.nodes[node].region)[q];
            let child = self.nodes.len() as u32;
            self.nodes.push(Node {
                region,
                children: [NO_CHILD; 4],
                items: Vec::new(),
            });
            self.nodes[node].children[q] = child;
        }
        self.nodes[node].children[q] as usize
    }
}

#[inline]
fn quadrants(region: &Rect) -> [Rect; 4] {
    let mx = 0.5 * (region.xmin + region.xmax);
    let my = 0.5 * (region.ymin + region.ymax);
    [
        Rect::new(region.xmin, my, mx, region.ymax),
        Rect::new(mx, my, region.xmax, region.ymax),
        Rect::new(mx, region.ymin, region.xmax, my),
        Rect::new(region.xmin, region.ymin, mx, my),
    ]
}
