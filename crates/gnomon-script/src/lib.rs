//! # Gnomon Script
//!
//! Rhai scripting for Gnomon scenes.
//!
//! ## Example
//!
//! ```rhai
//! // Unit square, its center, and the diagonal from A
//! square("ABCD");
//! mid_point("M", "AC");
//! point_from_vec("AN", 0.5 * vec("AB"));
//! line("MN");
//! arrow("AM");
//! dont_rotate();
//! ```
//!
//! Scripts run top to bottom against one scene; nothing needs to be returned.

pub mod engine;
pub mod scene_api;

pub use engine::ScriptEngine;
pub use scene_api::{ConstructionFailure, SharedScene};
