//! Distance-function descriptors

use serde::{Deserialize, Serialize};

/// The distance function attached to a shape.
///
/// Marked `#[non_exhaustive]` so new primitives can be added without
/// breaking downstream matches.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum ShapeSdf {
    /// Degenerate function that reports zero everywhere.
    ///
    /// Used by shapes that have no meaningful volume (a flat square).
    #[default]
    Empty,

    /// Axis-aligned box centered at the origin
    Box { half_extents: [f64; 3] },
}

impl ShapeSdf {
    /// Box distance function for full extents `w`, `h`, `d`
    pub fn cuboid(w: f64, h: f64, d: f64) -> Self {
        ShapeSdf::Box {
            half_extents: [w / 2.0, h / 2.0, d / 2.0],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ShapeSdf::Empty)
    }

    /// Half extents of a box descriptor
    pub fn half_extents(&self) -> Option<[f64; 3]> {
        match self {
            ShapeSdf::Box { half_extents } => Some(*half_extents),
            ShapeSdf::Empty => None,
        }
    }
}
