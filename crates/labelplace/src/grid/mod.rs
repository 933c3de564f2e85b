//! Spatial indices over anchor points and placed rectangles.
//!
//! Purpose
//! - Answer the two hot queries of the placement loop in expected sub-linear
//!   time: "does this square strictly contain a foreign anchor?"
//!   (`PointGrid`) and "does this square overlap anything already placed,
//!   and how far is the nearest placed label?" (`RectGrid`, `RectQuadtree`).
//! - All three are per-pass scratch structures: built from the current
//!   point/rectangle set at the start of a pass and dropped at its end.
//!
//! Why two rectangle indices
//! - The uniform grid wins on uniform scatters; the quadtree degrades more
//!   gracefully under clustering. `RectStore` folds both behind one closed
//!   enum so the engine picks per run without a trait object.

mod points;
mod quadtree;
mod rects;
mod store;

pub use points::PointGrid;
pub use quadtree::RectQuadtree;
pub use rects::RectGrid;
pub use store::{RectStore, StoreKind};
