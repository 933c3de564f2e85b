//! Curated internal API (UNSTABLE).
//!
//! Important
//! - This is not a stable public surface. It is a convenience collection for
//!   project-internal callers; breaking changes are allowed and expected.
//! - Prefer these re-exports for clarity and consistency across tools.

// Core geometry
pub use crate::geom::{
    candidate_index, generate_candidates, Corner, LabelCandidate, Rect, CORNERS,
};
// Spatial indices
pub use crate::grid::{PointGrid, RectGrid, RectQuadtree, RectStore, StoreKind};
// Corner fixing
pub use crate::clearance::{fixed_corners, quadrant_clearance};
// Greedy placement and the zoom state machine
pub use crate::place::{
    place_labels, place_labels_monotone, CornerRule, MonotoneState, PlaceCfg, PlaceError,
};
// Visibility thresholds
pub use crate::threshold::{run_at_scale, zoom_thresholds, ScaleRun, ThresholdCfg, ThresholdResult};
// Reproducible scatters
pub use crate::scatter::{
    draw_points_clustered, draw_points_uniform, ClusterCfg, Domain2, ReplayToken, UniformCfg,
};
