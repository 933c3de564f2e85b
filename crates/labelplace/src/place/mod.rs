//! Greedy label placement and the monotone zoom state machine.
//!
//! Purpose
//! - `place_labels`: one stateless densest-first pass over all points, with
//!   a fixed corner per point or free corner choice.
//! - `place_labels_monotone`: the same pass split into a retention and a
//!   growth phase so repeated calls under a changing label size keep the
//!   active set monotone in the zoom direction.
//!
//! Both passes share the feasibility rule: a label square must not strictly
//! contain a foreign anchor and must not overlap an already accepted label.

mod greedy;
mod monotone;
mod types;

pub use greedy::place_labels;
pub use monotone::place_labels_monotone;
pub use types::{CornerRule, MonotoneState, PlaceCfg, PlaceError};

pub(crate) use greedy::{place_on_grid, validate_points, validate_size};
