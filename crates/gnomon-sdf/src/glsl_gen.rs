//! SDF to GLSL source generator
//!
//! Produces a self-contained GLSL snippet per shape. The renderer splices the
//! snippet into its ray-marching shader and calls the generated function.

// String writing is infallible, so .unwrap() is safe here
#![allow(clippy::unwrap_used)]

use std::fmt::Write;

use crate::ShapeSdf;

/// Function name the renderer looks for when a single shape is spliced in
pub const DEFAULT_FUNCTION_NAME: &str = "shapeSDF";

const FUNCTION_NAME_MARKER: &str = "@name@";

const EMPTY_TEMPLATE: &str = r#"
    float @name@(vec3 p) {
        return 0.0;
    }
    "#;

const VMAX_HELPER: &str = r#"
    float vmax(vec3 v) {
        return max(max(v.x, v.y), v.z);
    }
"#;

const BOX_TEMPLATE: &str = r#"
    float @name@(vec3 p) {
        return vmax(abs(p) - vec3(@w@,@h@,@d@));
    }

    "#;

/// Generate GLSL source for shape distance functions
pub struct GlslGenerator {
    function_name: String,
}

impl GlslGenerator {
    pub fn new() -> Self {
        Self {
            function_name: DEFAULT_FUNCTION_NAME.to_string(),
        }
    }

    /// Use a different name for the generated function.
    ///
    /// Lets a renderer splice several shapes into one shader without the
    /// functions colliding.
    pub fn with_function_name(mut self, name: impl Into<String>) -> Self {
        self.function_name = name.into();
        self
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    /// Generate the distance function for one shape
    pub fn generate(&self, sdf: &ShapeSdf) -> String {
        match sdf {
            ShapeSdf::Empty => EMPTY_TEMPLATE.replace(FUNCTION_NAME_MARKER, &self.function_name),
            ShapeSdf::Box { half_extents } => {
                let [w, h, d] = half_extents.map(glsl_float);
                let mut code = String::from(VMAX_HELPER);
                let body = BOX_TEMPLATE
                    .replace(FUNCTION_NAME_MARKER, &self.function_name)
                    .replace("@w@", &w)
                    .replace("@h@", &h)
                    .replace("@d@", &d);
                code.push_str(&body);
                code
            }
        }
    }
}

impl Default for GlslGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a float as a GLSL literal.
///
/// Always keeps a decimal point (`1.0`, not `1`) so the literal is typed as a
/// float by the shader compiler.
pub fn glsl_float(value: f64) -> String {
    let mut text = String::new();
    write!(text, "{:?}", value).unwrap();
    text
}

/// Generate the default `shapeSDF` function for a descriptor
pub fn shape_sdf_source(sdf: &ShapeSdf) -> String {
    GlslGenerator::new().generate(sdf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_returns_zero() {
        let code = shape_sdf_source(&ShapeSdf::Empty);
        assert!(code.contains("float shapeSDF(vec3 p)"));
        assert!(code.contains("return 0.0;"));
        assert!(!code.contains("vmax"));
    }

    #[test]
    fn test_box_substitutes_half_extents() {
        let code = shape_sdf_source(&ShapeSdf::cuboid(2.0, 3.0, 0.5));
        assert!(code.contains("float vmax(vec3 v)"));
        assert!(code.contains("return vmax(abs(p) - vec3(1.0,1.5,0.25));"));
        assert!(!code.contains('@'));
    }

    #[test]
    fn test_custom_function_name() {
        let generator = GlslGenerator::new().with_function_name("shape3SDF");
        let code = generator.generate(&ShapeSdf::cuboid(2.0, 2.0, 2.0));
        assert!(code.contains("float shape3SDF(vec3 p)"));
        assert!(!code.contains("shapeSDF("));
    }

    #[test]
    fn test_glsl_float_keeps_decimal_point() {
        assert_eq!(glsl_float(1.0), "1.0");
        assert_eq!(glsl_float(0.5), "0.5");
        assert_eq!(glsl_float(-2.0), "-2.0");
    }
}
