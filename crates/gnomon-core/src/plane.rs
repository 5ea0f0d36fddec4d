//! Planes and sections through three named points

use crate::names::{IntoNameList, exact_names};
use crate::scene::Scene;
use crate::Result;
use gnomon_math::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How the renderer should treat a plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaneKind {
    #[default]
    Plane,
    /// Same geometry, drawn as a cut through the scene
    Section,
}

/// An oriented plane through three named points.
///
/// The normal follows the point order: swapping `b` and `c` flips it.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    points: [String; 3],
    kind: PlaneKind,
    size: f64,
}

/// Exported plane record: `[normal, a, b, c, is_section, size]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneValues(pub Vector, pub Vector, pub Vector, pub Vector, pub bool, pub f64);

impl PlaneValues {
    pub fn normal(&self) -> Vector {
        self.0
    }

    pub fn is_section(&self) -> bool {
        self.4
    }
}

impl Plane {
    pub fn point_names(&self) -> &[String; 3] {
        &self.points
    }

    pub fn kind(&self) -> PlaneKind {
        self.kind
    }

    pub fn is_section(&self) -> bool {
        self.kind == PlaneKind::Section
    }

    /// Rendering extent; has no geometric meaning
    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn positions(&self, scene: &Scene) -> Result<[Vector; 3]> {
        let [a, b, c] = &self.points;
        Ok([
            scene.position_of(a, "plane")?,
            scene.position_of(b, "plane")?,
            scene.position_of(c, "plane")?,
        ])
    }

    /// `normalize(cross(b - a, c - a))`
    pub fn normal(&self, scene: &Scene) -> Result<Vector> {
        let [a, b, c] = self.positions(scene)?;
        Ok((b - a).cross(c - a).normalized())
    }

    pub fn values(&self, scene: &Scene) -> Result<PlaneValues> {
        let [a, b, c] = self.positions(scene)?;
        let normal = (b - a).cross(c - a).normalized();
        Ok(PlaneValues(normal, a, b, c, self.is_section(), self.size))
    }
}

impl Scene {
    /// Add a plane through three registered points, default size 1
    pub fn plane(&mut self, names: impl IntoNameList) -> Result<&Plane> {
        self.add_plane(names, PlaneKind::Plane, 1.0)
    }

    /// Add a section through three registered points, default size 1
    pub fn section(&mut self, names: impl IntoNameList) -> Result<&Plane> {
        self.add_plane(names, PlaneKind::Section, 1.0)
    }

    pub fn add_plane(
        &mut self,
        names: impl IntoNameList,
        kind: PlaneKind,
        size: f64,
    ) -> Result<&Plane> {
        let points: [String; 3] = exact_names(names, "plane")?;
        for name in &points {
            self.resolve(name, "plane")?;
        }

        debug!(?points, ?kind, size, "plane added");
        self.planes.push(Plane { points, kind, size });
        Ok(&self.planes[self.planes.len() - 1])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Error;

    fn triangle() -> Scene {
        let mut scene = Scene::new();
        scene.insert_point("O", Vector::ZERO);
        scene.insert_point("X", Vector::X);
        scene.insert_point("Y", Vector::Y);
        scene
    }

    #[test]
    fn test_normal_follows_point_order() {
        let mut scene = triangle();
        let up = scene.plane("OXY").unwrap().clone();
        let down = scene.plane("OYX").unwrap().clone();
        assert_eq!(up.normal(&scene).unwrap(), Vector::Z);
        assert_eq!(down.normal(&scene).unwrap(), -Vector::Z);
    }

    #[test]
    fn test_values_record() {
        let mut scene = triangle();
        let plane = scene
            .add_plane(["O", "X", "Y"], PlaneKind::Plane, 3.0)
            .unwrap()
            .clone();
        let values = plane.values(&scene).unwrap();
        assert_eq!(
            values,
            PlaneValues(Vector::Z, Vector::ZERO, Vector::X, Vector::Y, false, 3.0)
        );
    }

    #[test]
    fn test_section_sets_flag_only() {
        let mut scene = triangle();
        let section = scene.section("OXY").unwrap().clone();
        assert!(section.is_section());
        assert!((section.size() - 1.0).abs() < f64::EPSILON);
        let values = section.values(&scene).unwrap();
        assert!(values.is_section());
        assert_eq!(values.normal(), Vector::Z);
    }

    #[test]
    fn test_plane_requires_known_points() {
        let mut scene = triangle();
        let err = scene.plane("OXQ").unwrap_err();
        assert_eq!(err.unknown_name(), Some("Q"));
        assert_eq!(err.operation(), Some("plane"));
        assert!(scene.planes().is_empty());
    }

    #[test]
    fn test_plane_needs_three_names() {
        let mut scene = triangle();
        assert!(matches!(
            scene.plane("OX"),
            Err(Error::InvalidOperand { operation: "plane", .. })
        ));
    }

    #[test]
    fn test_collinear_points_give_zero_normal() {
        let mut scene = triangle();
        scene.insert_point("W", Vector::new(2.0, 0.0, 0.0));
        let plane = scene.plane("OXW").unwrap().clone();
        assert_eq!(plane.normal(&scene).unwrap(), Vector::ZERO);
    }

    #[test]
    fn test_values_serialize_as_array() {
        let values = PlaneValues(Vector::Z, Vector::ZERO, Vector::X, Vector::Y, true, 1.0);
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(
            json,
            "[[0.0,0.0,1.0],[0.0,0.0,0.0],[1.0,0.0,0.0],[0.0,1.0,0.0],true,1.0]"
        );
    }
}
