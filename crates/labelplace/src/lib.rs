//! Greedy square-label placement for 2D point sets.
//!
//! Given N anchor points and a label side length, the engine places at most
//! one axis-aligned square label per point such that no label overlaps
//! another and no label covers a foreign anchor. On top of the single-pass
//! engine sit a zoom state machine that keeps placements stable across size
//! changes and a batched search for each point's visibility threshold (the
//! largest size at which it still gets a label).
//!
//! Layout
//! - `geom`: corners, anchored squares, overlap/containment/gap predicates.
//! - `grid`: spatial indices (point grid, rectangle grid, rectangle quadtree).
//! - `clearance`: per-quadrant clearance and corner fixing.
//! - `place`: the greedy pass and the monotone zoom state machine.
//! - `threshold`: visibility-threshold search over the stateless engine.
//! - `scatter`: reproducible random point sets for tests, benches, and demos.

pub mod api;
pub mod clearance;
pub mod geom;
pub mod grid;
pub mod place;
pub mod scatter;
pub mod threshold;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom::{Corner, LabelCandidate, Rect};
pub use nalgebra::Vector2 as Vec2;
