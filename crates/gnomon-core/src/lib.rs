//! # Gnomon Core
//!
//! Named geometric construction for renderer-ready scenes.
//!
//! A [`Scene`] is built by a sequence of construction calls. Points are
//! registered under short names and every later call refers to them by name:
//! shapes lay out template corners, helpers derive new points from old ones,
//! planes and edges connect what is already there. The finished scene is
//! exported as a [`SceneDocument`] for an external renderer.
//!
//! ## Quick Start
//!
//! ```rust
//! use gnomon_core::prelude::*;
//!
//! let mut scene = Scene::new();
//!
//! // Eight corners A..H of a 2x2x2 cube
//! scene.cube("ABCDEFGH")?;
//!
//! // The cube's center, and a diagonal section through it
//! scene.mid_point("M", "AG")?;
//! scene.section("ACG")?;
//! scene.arrow("AM")?;
//!
//! let json = scene.export_json(&ExportOptions::default())?;
//! assert!(json.contains("BoxGeometry"));
//! # Ok::<(), gnomon_core::Error>(())
//! ```
//!
//! ## Names
//!
//! - A name is any string; scripts mostly use single letters.
//! - Pair arguments accept a two-character code (`"AB"`) or an explicit
//!   `("p0", "p1")` tuple.
//! - Registering an existing name moves that point. Nothing is ever deleted.

pub mod edge;
pub mod export;
pub mod names;
pub mod plane;
pub mod point;
pub mod scene;
pub mod shape;

mod error;

pub use error::{Error, Result};
pub use export::{ExportOptions, SceneDocument};
pub use scene::{RenderSettings, Scene};

/// Prelude module for convenient imports
pub mod prelude {
    // Construction
    pub use crate::names::{IntoNameList, IntoNamePair, NamePair};
    pub use crate::plane::{Plane, PlaneKind, PlaneValues};
    pub use crate::point::Point;
    pub use crate::scene::{RenderSettings, Scene};
    pub use crate::shape::{Face, Geometry, Shape, ShapeKind};

    // Edges
    pub use crate::edge::{Edge, EdgeKind};

    // Export
    pub use crate::export::{ExportOptions, SceneDocument};

    // Math
    pub use gnomon_math::Vector;

    // Error handling
    pub use crate::{Error, Result};
}
