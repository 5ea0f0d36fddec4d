//! Template-driven shape builders
//!
//! Each builder lays out a fixed local template from its dimensions, binds
//! every template corner to a caller-supplied name, records the edges of its
//! face loops as lines, and appends itself to the scene. Builders never look
//! at what was registered before: reusing a name moves that point.

use crate::names::{IntoNameList, NamePair, exact_names};
use crate::point::Point;
use crate::scene::Scene;
use crate::Result;
use gnomon_math::Vector;
use gnomon_sdf::{GlslGenerator, ShapeSdf};
use serde::ser::{Serialize, SerializeTuple, Serializer};
use tracing::debug;

/// Face loop of a flat square: the four corners in order
const SQUARE_FACES: &[[usize; 4]] = &[[0, 1, 2, 3]];

/// Face loops of a box: near cap, far cap, then the four sides
const BOX_FACES: &[[usize; 4]] = &[
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [1, 2, 6, 5],
    [7, 6, 2, 3],
    [4, 7, 3, 0],
];

/// Corner layout shared by the square and both box caps
const QUAD_CORNERS: [[f64; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];

/// Which builder produced a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Square,
    Box,
    Cube,
}

/// Renderer primitive and dimensions.
///
/// Serializes as `["BoxGeometry", w, h, d]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Box { width: f64, height: f64, depth: f64 },
}

impl Geometry {
    pub fn primitive(&self) -> &'static str {
        match self {
            Geometry::Box { .. } => "BoxGeometry",
        }
    }

    pub fn dimensions(&self) -> [f64; 3] {
        match *self {
            Geometry::Box {
                width,
                height,
                depth,
            } => [width, height, depth],
        }
    }
}

impl Serialize for Geometry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let [w, h, d] = self.dimensions();
        let mut tuple = serializer.serialize_tuple(4)?;
        tuple.serialize_element(self.primitive())?;
        tuple.serialize_element(&w)?;
        tuple.serialize_element(&h)?;
        tuple.serialize_element(&d)?;
        tuple.end()
    }
}

/// One resolved face of a shape
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// Unit normal from the face's first three corners (winding order)
    pub normal: Vector,
    /// `normal . first corner`
    pub constant: f64,
    pub points: Vec<Point>,
}

/// A shape built from named points
#[derive(Debug, Clone)]
pub struct Shape {
    kind: ShapeKind,
    points: Vec<String>,
    geometry: Geometry,
    sdf: ShapeSdf,
    face_loops: &'static [[usize; 4]],
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Point names in template order
    pub fn point_names(&self) -> &[String] {
        &self.points
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn sdf(&self) -> ShapeSdf {
        self.sdf
    }

    /// GLSL source of the shape's `shapeSDF` function
    pub fn sdf_source(&self) -> String {
        GlslGenerator::new().generate(&self.sdf)
    }

    /// Face loops as indices into [`Shape::point_names`]
    pub fn face_loops(&self) -> &'static [[usize; 4]] {
        self.face_loops
    }

    /// Every directed edge of every face loop, duplicates included
    pub fn edges(&self) -> impl Iterator<Item = NamePair> + '_ {
        self.face_loops.iter().flat_map(move |face| {
            (0..4).map(move |k| {
                NamePair::new(
                    self.points[face[k]].clone(),
                    self.points[face[(k + 1) % 4]].clone(),
                )
            })
        })
    }

    /// Resolve the face loops against the scene's current point positions
    pub fn faces(&self, scene: &Scene) -> Result<Vec<Face>> {
        self.face_loops
            .iter()
            .map(|face| {
                let points = face
                    .iter()
                    .map(|&i| scene.resolve(&self.points[i], "faces").cloned())
                    .collect::<Result<Vec<_>>>()?;
                let [p0, p1, p2] = [0, 1, 2].map(|i| points[i].position);
                let normal = (p1 - p0).cross(p2 - p0).normalized();
                Ok(Face {
                    normal,
                    constant: normal.dot(p0),
                    points,
                })
            })
            .collect()
    }
}

// ============================================================================
// Builders
// ============================================================================

impl Scene {
    /// Flat 2x2 square in the z = 0 plane.
    ///
    /// Corners `(-1,-1) (1,-1) (1,1) (-1,1)`. The square has no volume so it
    /// keeps the always-zero distance function.
    pub fn square(&mut self, names: impl IntoNameList) -> Result<&Shape> {
        let names: [String; 4] = exact_names(names, "square")?;
        let template = QUAD_CORNERS.map(|[x, y]| Vector::new(x, y, 0.0));
        let geometry = Geometry::Box {
            width: 2.0,
            height: 2.0,
            depth: 0.0,
        };
        Ok(self.build_shape(
            ShapeKind::Square,
            Vec::from(names),
            &template,
            geometry,
            ShapeSdf::Empty,
            SQUARE_FACES,
        ))
    }

    /// Axis-aligned box of extents `w`, `h`, `d` centered at the origin.
    ///
    /// Points 0-3 are the near cap (z = -d/2), points 4-7 the far cap.
    pub fn cuboid(&mut self, names: impl IntoNameList, w: f64, h: f64, d: f64) -> Result<&Shape> {
        let names: [String; 8] = exact_names(names, "box")?;
        Ok(self.build_box(ShapeKind::Box, names, w, h, d))
    }

    /// 2x2x2 box
    pub fn cube(&mut self, names: impl IntoNameList) -> Result<&Shape> {
        let names: [String; 8] = exact_names(names, "cube")?;
        Ok(self.build_box(ShapeKind::Cube, names, 2.0, 2.0, 2.0))
    }

    fn build_box(
        &mut self,
        kind: ShapeKind,
        names: [String; 8],
        w: f64,
        h: f64,
        d: f64,
    ) -> &Shape {
        let template: Vec<Vector> = (0..8)
            .map(|i| {
                let [x, y] = QUAD_CORNERS[i % 4];
                let z = if i < 4 { -d / 2.0 } else { d / 2.0 };
                Vector::new(x * w / 2.0, y * h / 2.0, z)
            })
            .collect();
        let geometry = Geometry::Box {
            width: w,
            height: h,
            depth: d,
        };
        self.build_shape(
            kind,
            Vec::from(names),
            &template,
            geometry,
            ShapeSdf::cuboid(w, h, d),
            BOX_FACES,
        )
    }

    fn build_shape(
        &mut self,
        kind: ShapeKind,
        names: Vec<String>,
        template: &[Vector],
        geometry: Geometry,
        sdf: ShapeSdf,
        face_loops: &'static [[usize; 4]],
    ) -> &Shape {
        for (name, position) in names.iter().zip(template) {
            self.insert_point(name.clone(), *position);
        }

        let shape = Shape {
            kind,
            points: names,
            geometry,
            sdf,
            face_loops,
        };
        for edge in shape.edges() {
            self.record_line(edge);
        }

        debug!(?kind, points = ?shape.points, "shape built");
        self.shapes.push(shape);
        &self.shapes[self.shapes.len() - 1]
    }
}
