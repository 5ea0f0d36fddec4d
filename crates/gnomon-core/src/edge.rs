//! Lines and arrows between named points

use crate::names::NamePair;
use std::collections::HashSet;

/// Whether an edge has a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Undirected segment. `AB` and `BA` are the same line.
    Line,
    /// Directed indicator. `AB` and `BA` are different arrows.
    Arrow,
}

/// An edge between two named points, in the order it was first registered
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub pair: NamePair,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn line(pair: NamePair) -> Self {
        Self {
            pair,
            kind: EdgeKind::Line,
        }
    }

    pub fn arrow(pair: NamePair) -> Self {
        Self {
            pair,
            kind: EdgeKind::Arrow,
        }
    }

    /// Identity key: unordered for lines, ordered for arrows
    fn key(&self) -> (String, String) {
        let NamePair { first, second } = &self.pair;
        match self.kind {
            EdgeKind::Line if second < first => (second.clone(), first.clone()),
            _ => (first.clone(), second.clone()),
        }
    }

    /// Whether both edges describe the same line or arrow
    pub fn same_edge(&self, other: &Edge) -> bool {
        self.kind == other.kind && self.key() == other.key()
    }

    /// Wire form: the two names concatenated
    pub fn code(&self) -> String {
        self.pair.code()
    }
}

/// Insertion-ordered set of edges of one kind
#[derive(Debug, Clone)]
pub struct EdgeSet {
    kind: EdgeKind,
    edges: Vec<Edge>,
    seen: HashSet<(String, String)>,
}

impl EdgeSet {
    pub fn new(kind: EdgeKind) -> Self {
        Self {
            kind,
            edges: Vec::new(),
            seen: HashSet::new(),
        }
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    /// Add an edge; returns `false` if an equal edge is already present
    pub fn insert(&mut self, pair: NamePair) -> bool {
        let edge = Edge {
            pair,
            kind: self.kind,
        };
        if !self.seen.insert(edge.key()) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    pub fn contains(&self, pair: &NamePair) -> bool {
        let probe = Edge {
            pair: pair.clone(),
            kind: self.kind,
        };
        self.seen.contains(&probe.key())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Concatenated name codes, in registration order
    pub fn codes(&self) -> Vec<String> {
        self.edges.iter().map(Edge::code).collect()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
