//! Configuration, corner rules, zoom state, and the shared error type.

use crate::geom::Corner;
use crate::grid::StoreKind;
use std::fmt;

/// Placement configuration.
#[derive(Clone, Copy, Debug)]
pub struct PlaceCfg {
    /// Strictness margin for the open-quadrant membership test in corner
    /// fixing.
    pub eps_quadrant: f64,
    /// Rectangle index used for conflict and gap queries.
    pub store: StoreKind,
}

impl Default for PlaceCfg {
    fn default() -> Self {
        Self {
            eps_quadrant: 1e-12,
            store: StoreKind::Grid,
        }
    }
}

impl PlaceCfg {
    pub fn validate(&self) -> Result<(), PlaceError> {
        if !self.eps_quadrant.is_finite() || self.eps_quadrant < 0.0 {
            return Err(PlaceError::cfg("eps_quadrant must be finite and >= 0"));
        }
        Ok(())
    }
}

/// How a placement pass chooses corners.
#[derive(Clone, Copy, Debug)]
pub enum CornerRule<'a> {
    /// One pre-fixed corner per point, usually from `clearance::fixed_corners`.
    /// Only that corner's candidate is tested.
    Fixed(&'a [Corner]),
    /// All four corners compete per point; the feasible one with the largest
    /// distance to already placed labels wins, ties resolving in `CORNERS`
    /// order.
    Free,
}

/// Error type shared by the placement and threshold entry points.
#[derive(Debug)]
pub enum PlaceError {
    InvalidInput { reason: String },
    InvalidCfg { reason: String },
}

impl PlaceError {
    pub(crate) fn input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn cfg(reason: impl Into<String>) -> Self {
        Self::InvalidCfg {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { reason } => write!(f, "invalid placement input: {reason}"),
            Self::InvalidCfg { reason } => write!(f, "invalid placement config: {reason}"),
        }
    }
}

impl std::error::Error for PlaceError {}

/// Placement state carried across zoom passes.
///
/// Owned by the caller and threaded through every `place_labels_monotone`
/// call; the engine only reads and rewrites it. One state belongs to one
/// point set. The engine re-initializes itself when the point count changes,
/// but a caller swapping in a different set of the same cardinality must
/// reset the state itself (`MonotoneState::new()`).
#[derive(Clone, Debug)]
pub struct MonotoneState {
    /// Size of the previous pass; negative while uninitialized.
    pub last_size: f64,
    /// Candidate indices active after the previous pass, ascending.
    pub active: Vec<usize>,
    /// Cached corner per point, computed once per point set.
    pub fixed_corner: Vec<Corner>,
    /// Points that have been labeled in at least one pass.
    pub labeled_once: Vec<bool>,
}

impl MonotoneState {
    pub fn new() -> Self {
        Self {
            last_size: -1.0,
            active: Vec::new(),
            fixed_corner: Vec::new(),
            labeled_once: Vec::new(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.last_size >= 0.0
    }
}

impl Default for MonotoneState {
    fn default() -> Self {
        Self::new()
    }
}
