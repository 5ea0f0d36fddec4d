//! The scene-construction context
//!
//! A [`Scene`] owns every registry a construction pass touches: points,
//! shapes, planes, lines and arrows, plus the render settings. Scripts and
//! Rust callers mutate one scene in sequence and hand it to the exporter at
//! the end. Nothing is ever removed; points may be overwritten.
//!
//! All name lookups go through one resolution path so a missing point is
//! always reported as [`Error::UnknownName`] together with the operation that
//! asked for it.

use crate::edge::{EdgeKind, EdgeSet};
use crate::names::{IntoNamePair, NamePair};
use crate::plane::Plane;
use crate::point::{Point, PointRegistry};
use crate::shape::Shape;
use crate::{Error, Result};
use gnomon_math::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Renderer controls carried alongside the geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Auto-rotation speed; `0.0` disables rotation
    pub rotate: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self { rotate: 1.0 }
    }
}

impl RenderSettings {
    pub fn rotates(&self) -> bool {
        self.rotate > 0.0
    }
}

/// Everything registered during one scene-definition pass
#[derive(Debug, Clone)]
pub struct Scene {
    pub(crate) points: PointRegistry,
    pub(crate) shapes: Vec<Shape>,
    pub(crate) planes: Vec<Plane>,
    pub(crate) lines: EdgeSet,
    pub(crate) arrows: EdgeSet,
    pub(crate) settings: RenderSettings,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            points: PointRegistry::new(),
            shapes: Vec::new(),
            planes: Vec::new(),
            lines: EdgeSet::new(EdgeKind::Line),
            arrows: EdgeSet::new(EdgeKind::Arrow),
            settings: RenderSettings::default(),
        }
    }

    // ========================================================================
    // Registry access
    // ========================================================================

    /// Resolve a point by name
    pub fn point(&self, name: &str) -> Result<&Point> {
        self.resolve(name, "point")
    }

    /// Single resolution path for every helper and builder
    pub(crate) fn resolve(&self, name: &str, operation: &'static str) -> Result<&Point> {
        self.points
            .get(name)
            .ok_or_else(|| Error::unknown(name, operation))
    }

    pub(crate) fn position_of(&self, name: &str, operation: &'static str) -> Result<Vector> {
        self.resolve(name, operation).map(|p| p.position)
    }

    pub fn position(&self, name: &str) -> Result<Vector> {
        self.position_of(name, "position")
    }

    pub fn contains_point(&self, name: &str) -> bool {
        self.points.contains(name)
    }

    /// Register a point, silently replacing any earlier point of that name
    pub fn insert_point(&mut self, name: impl Into<String>, position: Vector) -> Point {
        let name = name.into();
        if let Some(previous) = self.points.insert(name.clone(), position) {
            debug!(%name, %previous, %position, "point overwritten");
        } else {
            debug!(%name, %position, "point registered");
        }
        Point::new(name, position)
    }

    /// Move an existing point, returning its previous position.
    ///
    /// Unlike [`Scene::insert_point`], fails when the name is not registered.
    pub fn redefine_point(&mut self, name: &str, position: Vector) -> Result<Vector> {
        let previous = self.position_of(name, "redefine_point")?;
        self.points.insert(name, position);
        debug!(%name, %previous, %position, "point redefined");
        Ok(previous)
    }

    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn lines(&self) -> &EdgeSet {
        &self.lines
    }

    pub fn arrows(&self) -> &EdgeSet {
        &self.arrows
    }

    pub fn settings(&self) -> RenderSettings {
        self.settings
    }

    // ========================================================================
    // Name-resolution helpers
    // ========================================================================

    /// Displacement from the pair's first point to its second point
    pub fn vec(&self, pair: impl IntoNamePair) -> Result<Vector> {
        let pair = pair.into_name_pair("vec")?;
        self.displacement(&pair, "vec")
    }

    fn displacement(&self, pair: &NamePair, operation: &'static str) -> Result<Vector> {
        let tail = self.position_of(&pair.first, operation)?;
        let head = self.position_of(&pair.second, operation)?;
        Ok(head - tail)
    }

    /// Define one point of a pair from the other.
    ///
    /// `expression` is the displacement from the pair's first name to its
    /// second, the orientation [`Scene::vec`] returns. The first name anchors
    /// the computation unless the second name is already registered, in which
    /// case the second anchors it and the first is solved for. `fixed` forces
    /// the anchor regardless of what is registered.
    ///
    /// The solved point is registered (overwriting any stale entry) and
    /// returned.
    pub fn point_from_vec(
        &mut self,
        pair: impl IntoNamePair,
        expression: Vector,
        fixed: Option<&str>,
    ) -> Result<Point> {
        let pair = pair.into_name_pair("point_from_vec")?;
        self.solve_point(&pair, expression, fixed, "point_from_vec")
    }

    fn solve_point(
        &mut self,
        pair: &NamePair,
        expression: Vector,
        fixed: Option<&str>,
        operation: &'static str,
    ) -> Result<Point> {
        let forward = match fixed {
            Some(name) if name == pair.first => true,
            Some(name) if name == pair.second => false,
            Some(name) => {
                return Err(Error::invalid(
                    operation,
                    format!("fixed point '{}' is not part of pair '{}'", name, pair),
                ));
            }
            None => !self.contains_point(&pair.second),
        };

        let (anchor, target, offset) = if forward {
            (&pair.first, &pair.second, expression)
        } else {
            (&pair.second, &pair.first, -expression)
        };

        let origin = self.position_of(anchor, operation)?;
        debug!(%anchor, %target, %offset, operation, "solving point from vector");
        Ok(self.insert_point(target.clone(), origin + offset))
    }

    /// Define `name` halfway along the pair, anchored on the pair's first point
    pub fn mid_point(&mut self, name: &str, pair: impl IntoNamePair) -> Result<Point> {
        let pair = pair.into_name_pair("mid_point")?;
        let half = 0.5 * self.displacement(&pair, "mid_point")?;
        let solve = NamePair::new(pair.first.clone(), name);
        self.solve_point(&solve, half, Some(&pair.first), "mid_point")
    }

    // ========================================================================
    // Lines and arrows
    // ========================================================================

    /// Register an undirected edge and return both endpoints
    pub fn line(&mut self, pair: impl IntoNamePair) -> Result<(Point, Point)> {
        let pair = pair.into_name_pair("line")?;
        let a = self.resolve(&pair.first, "line")?.clone();
        let b = self.resolve(&pair.second, "line")?.clone();
        self.record_line(pair);
        Ok((a, b))
    }

    pub(crate) fn record_line(&mut self, pair: NamePair) {
        let code = pair.code();
        if self.lines.insert(pair) {
            debug!(%code, "line registered");
        }
    }

    /// Register a directed edge and return its name pair
    pub fn arrow(&mut self, pair: impl IntoNamePair) -> Result<NamePair> {
        let pair = pair.into_name_pair("arrow")?;
        self.resolve(&pair.first, "arrow")?;
        self.resolve(&pair.second, "arrow")?;
        if self.arrows.insert(pair.clone()) {
            debug!(code = %pair.code(), "arrow registered");
        }
        Ok(pair)
    }

    /// Same as [`Scene::arrow`]; reads better when the pair is a displacement
    pub fn show_vector(&mut self, pair: impl IntoNamePair) -> Result<NamePair> {
        self.arrow(pair)
    }

    // ========================================================================
    // Render settings
    // ========================================================================

    /// Auto-rotate the view at `speed` (relative; 1.0 is the renderer default)
    pub fn rotate(&mut self, speed: f64) {
        self.settings.rotate = speed;
    }

    pub fn dont_rotate(&mut self) {
        self.settings.rotate = 0.0;
    }
}
