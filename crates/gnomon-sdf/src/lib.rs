//! Gnomon SDF - distance-function descriptors and shader source generation
//!
//! Gnomon never evaluates distance functions itself. Each shape carries a
//! [`ShapeSdf`] descriptor, and [`GlslGenerator`] turns it into GLSL source
//! that a ray-marching renderer compiles and runs.
//!
//! ## Example
//!
//! ```rust
//! use gnomon_sdf::{ShapeSdf, shape_sdf_source};
//!
//! let sdf = ShapeSdf::Box { half_extents: [1.0, 0.5, 2.0] };
//! let glsl = shape_sdf_source(&sdf);
//!
//! assert!(glsl.contains("float shapeSDF(vec3 p)"));
//! assert!(glsl.contains("vec3(1.0,0.5,2.0)"));
//! ```

mod glsl_gen;
mod shape_sdf;

pub use glsl_gen::{DEFAULT_FUNCTION_NAME, GlslGenerator, glsl_float, shape_sdf_source};
pub use shape_sdf::ShapeSdf;
