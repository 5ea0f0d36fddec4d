//! Gnomon Math - vector algebra for named construction scenes
//!
//! Everything in a Gnomon scene is positioned with a [`Vector`]: a plain
//! `(x, y, z)` triple of `f64`. The type is deliberately small. It interops
//! with [`glam::DVec3`] for anything heavier.
//!
//! ## Example
//!
//! ```rust
//! use gnomon_math::Vector;
//!
//! let ab = Vector::new(1.0, 0.0, 0.0);
//! let ac = Vector::new(0.0, 1.0, 0.0);
//!
//! assert_eq!(ab.cross(ac), Vector::new(0.0, 0.0, 1.0));
//! assert_eq!(ab.dot(ac), 0.0);
//! assert_eq!(Vector::ZERO.normalized(), Vector::ZERO);
//! ```

mod vector;

pub use vector::{Vector, cross, dot, lerp, normalize};

// Re-export glam for callers that want the full linear algebra toolbox
pub use glam::DVec3;
