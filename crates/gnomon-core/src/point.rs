//! Named points and the registry that owns them

use gnomon_math::Vector;
use serde::Serialize;
use std::collections::HashMap;

/// A named position in scene space
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub name: String,
    pub position: Vector,
}

impl Point {
    pub fn new(name: impl Into<String>, position: Vector) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// Name -> point mapping that remembers first-registration order.
///
/// Registering an existing name replaces its position in place: last write
/// wins, and the point keeps its original slot in [`PointRegistry::iter`].
#[derive(Debug, Clone, Default)]
pub struct PointRegistry {
    points: Vec<Point>,
    index: HashMap<String, usize>,
}

impl PointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` at `position`, returning the previous position if the
    /// name was already taken.
    pub fn insert(&mut self, name: impl Into<String>, position: Vector) -> Option<Vector> {
        let name = name.into();
        if let Some(&slot) = self.index.get(&name) {
            let previous = self.points[slot].position;
            self.points[slot].position = position;
            return Some(previous);
        }
        self.index.insert(name.clone(), self.points.len());
        self.points.push(Point::new(name, position));
        None
    }

    pub fn get(&self, name: &str) -> Option<&Point> {
        self.index.get(name).map(|&slot| &self.points[slot])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Points in first-registration order
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.points.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
