//! Scene document export
//!
//! Walks a finished [`Scene`] and produces the document the renderer reads:
//! five independent arrays (points, shapes, planes, lines, arrows) plus the
//! auto-rotation control.
//!
//! Shapes carry their resolved faces (`faces_data`) as the canonical payload.
//! The older `geometry` / `sdf` fields are kept as convenience data and can be
//! switched off with [`ExportOptions::include_convenience`].

use crate::plane::PlaneValues;
use crate::point::Point;
use crate::scene::Scene;
use crate::shape::{Face, Geometry, Shape};
use crate::Result;
use gnomon_math::Vector;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Options controlling document export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Pretty-print the JSON output
    pub pretty: bool,

    /// Emit each shape's `geometry` and `sdf` fields next to `faces_data`
    pub include_convenience: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            include_convenience: true,
        }
    }
}

impl ExportOptions {
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_convenience(mut self, include: bool) -> Self {
        self.include_convenience = include;
        self
    }
}

/// `{name, x, y, z}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointRecord {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<&Point> for PointRecord {
    fn from(point: &Point) -> Self {
        Self {
            name: point.name.clone(),
            x: point.position.x,
            y: point.position.y,
            z: point.position.z,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaceRecord {
    pub normal: Vector,
    pub constant: f64,
    pub points: Vec<PointRecord>,
}

impl From<&Face> for FaceRecord {
    fn from(face: &Face) -> Self {
        Self {
            normal: face.normal,
            constant: face.constant,
            points: face.points.iter().map(PointRecord::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeRecord {
    pub points: Vec<String>,
    pub faces_data: Vec<FaceRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdf: Option<String>,
}

impl ShapeRecord {
    fn from_shape(shape: &Shape, scene: &Scene, options: &ExportOptions) -> Result<Self> {
        let faces = shape.faces(scene)?;
        let (geometry, sdf) = if options.include_convenience {
            (Some(shape.geometry()), Some(shape.sdf_source()))
        } else {
            (None, None)
        };
        Ok(Self {
            points: shape.point_names().to_vec(),
            faces_data: faces.iter().map(FaceRecord::from).collect(),
            geometry,
            sdf,
        })
    }
}

/// The complete wire document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneDocument {
    pub points: Vec<PointRecord>,
    pub shapes: Vec<ShapeRecord>,
    pub planes: Vec<PlaneValues>,
    pub lines: Vec<String>,
    pub arrows: Vec<String>,
    pub rotate: f64,
}

impl SceneDocument {
    /// Build the document from the scene's current state
    pub fn from_scene(scene: &Scene, options: &ExportOptions) -> Result<Self> {
        let points = scene.points().map(PointRecord::from).collect();
        let shapes = scene
            .shapes()
            .iter()
            .map(|shape| ShapeRecord::from_shape(shape, scene, options))
            .collect::<Result<Vec<_>>>()?;
        let planes = scene
            .planes()
            .iter()
            .map(|plane| plane.values(scene))
            .collect::<Result<Vec<_>>>()?;

        let document = Self {
            points,
            shapes,
            planes,
            lines: scene.lines().codes(),
            arrows: scene.arrows().codes(),
            rotate: scene.settings().rotate,
        };
        info!(
            points = document.points.len(),
            shapes = document.shapes.len(),
            planes = document.planes.len(),
            lines = document.lines.len(),
            arrows = document.arrows.len(),
            "scene exported"
        );
        Ok(document)
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Scene {
    /// Export straight to JSON text
    pub fn export_json(&self, options: &ExportOptions) -> Result<String> {
        SceneDocument::from_scene(self, options)?.to_json(options.pretty)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_scene() -> Scene {
        let mut scene = Scene::new();
        scene.cube("ABCDEFGH").unwrap();
        scene.mid_point("M", "AG").unwrap();
        scene.square("PQRS").unwrap();
        scene.plane("ABC").unwrap();
        scene.section("ABF").unwrap();
        scene.arrow("AM").unwrap();
        scene.line("MA").unwrap();
        scene.rotate(0.5);
        scene
    }

    #[test]
    fn test_points_exported_once_in_order() {
        let scene = sample_scene();
        let doc = SceneDocument::from_scene(&scene, &ExportOptions::default()).unwrap();
        let names: Vec<_> = doc.points.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["A", "B", "C", "D", "E", "F", "G", "H", "M", "P", "Q", "R", "S"]
        );
        for record in &doc.points {
            let position = scene.position(&record.name).unwrap();
            assert_eq!([record.x, record.y, record.z], position.to_array());
        }
    }

    #[test]
    fn test_shapes_in_construction_order() {
        let scene = sample_scene();
        let doc = SceneDocument::from_scene(&scene, &ExportOptions::default()).unwrap();
        assert_eq!(doc.shapes.len(), 2);
        assert_eq!(doc.shapes[0].points.len(), 8);
        assert_eq!(doc.shapes[0].faces_data.len(), 6);
        assert_eq!(doc.shapes[1].points, vec!["P", "Q", "R", "S"]);
        assert_eq!(doc.shapes[1].faces_data.len(), 1);
        assert_eq!(doc.shapes[1].faces_data[0].normal, Vector::Z);
    }

    #[test]
    fn test_document_shape() {
        let scene = sample_scene();
        let value = SceneDocument::from_scene(&scene, &ExportOptions::default())
            .unwrap()
            .to_value()
            .unwrap();

        assert_eq!(value["points"][8], json!({"name": "M", "x": 0.0, "y": 0.0, "z": 0.0}));
        assert_eq!(value["shapes"][0]["geometry"], json!(["BoxGeometry", 2.0, 2.0, 2.0]));
        assert!(value["shapes"][0]["sdf"].as_str().unwrap().contains("vec3(1.0,1.0,1.0)"));
        assert_eq!(value["shapes"][1]["geometry"], json!(["BoxGeometry", 2.0, 2.0, 0.0]));
        assert_eq!(value["planes"][0][0], json!([0.0, 0.0, 1.0]));
        assert_eq!(value["planes"][0][4], json!(false));
        assert_eq!(value["planes"][1][4], json!(true));
        assert_eq!(value["arrows"], json!(["AM"]));
        assert_eq!(value["rotate"], json!(0.5));

        let lines = value["lines"].as_array().unwrap();
        assert_eq!(lines.len(), 12 + 4 + 1);
        assert!(lines.contains(&json!("MA")));
    }

    #[test]
    fn test_convenience_fields_optional() {
        let scene = sample_scene();
        let options = ExportOptions::default().with_convenience(false);
        let value = SceneDocument::from_scene(&scene, &options)
            .unwrap()
            .to_value()
            .unwrap();
        let shape = value["shapes"][0].as_object().unwrap();
        assert!(shape.contains_key("faces_data"));
        assert!(!shape.contains_key("geometry"));
        assert!(!shape.contains_key("sdf"));
    }

    #[test]
    fn test_faces_follow_moved_points() {
        let mut scene = Scene::new();
        scene.square("ABCD").unwrap();
        scene.insert_point("A", Vector::new(-1.0, -1.0, 1.0));
        let doc = SceneDocument::from_scene(&scene, &ExportOptions::default()).unwrap();
        let face = &doc.shapes[0].faces_data[0];
        assert_eq!(face.points[0].z, 1.0);
        assert_ne!(face.normal, Vector::Z);
    }

    #[test]
    fn test_empty_scene() {
        let json = Scene::new().export_json(&ExportOptions::default()).unwrap();
        assert_eq!(
            json,
            r#"{"points":[],"shapes":[],"planes":[],"lines":[],"arrows":[],"rotate":1.0}"#
        );
    }

    #[test]
    fn test_options_from_partial_json() {
        let options: ExportOptions = serde_json::from_str(r#"{"pretty": true}"#).unwrap();
        assert!(options.pretty);
        assert!(options.include_convenience);
    }
}
