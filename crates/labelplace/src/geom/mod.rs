//! Label geometry: corners, anchored squares, and the candidate model.
//!
//! Purpose
//! - Provide the small value types every other component operates on and keep
//!   the boundary semantics in one place: rectangle overlap and point
//!   containment are open-interior tests, so labels may share edges but never
//!   interiors, and a label touching a foreign anchor on its boundary does
//!   not occlude it.
//!
//! Code cross-refs: `grid::{PointGrid, RectStore}`, `place::place_labels`.

mod types;

pub use types::{candidate_index, generate_candidates, Corner, LabelCandidate, Rect, CORNERS};
