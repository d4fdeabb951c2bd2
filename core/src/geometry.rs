//! Vertices and edges extracted from face topology.
//!
//! Coordinates are wrapped in `OrderedFloat` so vertices can key hash maps
//! and be ordered; NaN compares equal to itself and `-0.0 == 0.0`.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered triple of coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Vertex(pub [OrderedFloat<f64>; 3]);

impl Vertex {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self([OrderedFloat(x), OrderedFloat(y), OrderedFloat(z)])
    }

    /// Build a vertex from a 2D or 3D coordinate list. 2D points get z = 0.
    pub fn from_coords(coords: &[f64]) -> Option<Self> {
        match *coords {
            [x, y] => Some(Self::new(x, y, 0.0)),
            [x, y, z] => Some(Self::new(x, y, z)),
            _ => None,
        }
    }

    pub fn x(&self) -> f64 {
        self.0[0].into_inner()
    }

    pub fn y(&self) -> f64 {
        self.0[1].into_inner()
    }

    pub fn z(&self) -> f64 {
        self.0[2].into_inner()
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?}, {:?})", self.x(), self.y(), self.z())
    }
}

/// Whether edge direction is part of an edge's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationMode {
    /// `(a, b)` and `(b, a)` are the same edge.
    #[default]
    Unordered,
    /// `(a, b)` and `(b, a)` are distinct half-edges.
    Oriented,
}

/// An edge between two vertices.
///
/// Unordered edges are kept canonical (smaller endpoint first) so that
/// derived equality and hashing collapse both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Unordered(Vertex, Vertex),
    Oriented(Vertex, Vertex),
}

impl Edge {
    /// Create an edge from `a` to `b` in the given mode.
    pub fn new(a: Vertex, b: Vertex, mode: OrientationMode) -> Self {
        match mode {
            OrientationMode::Unordered => Self::unordered(a, b),
            OrientationMode::Oriented => Self::oriented(a, b),
        }
    }

    pub fn unordered(a: Vertex, b: Vertex) -> Self {
        if b < a {
            Edge::Unordered(b, a)
        } else {
            Edge::Unordered(a, b)
        }
    }

    pub fn oriented(a: Vertex, b: Vertex) -> Self {
        Edge::Oriented(a, b)
    }

    /// The two endpoints; for oriented edges in traversal order.
    pub fn endpoints(&self) -> (Vertex, Vertex) {
        match *self {
            Edge::Unordered(a, b) | Edge::Oriented(a, b) => (a, b),
        }
    }

    /// The same edge traversed the other way. Unordered edges are unchanged.
    pub fn reversed(&self) -> Self {
        match *self {
            Edge::Unordered(..) => *self,
            Edge::Oriented(a, b) => Edge::Oriented(b, a),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Unordered(a, b) => write!(f, "{} -- {}", a, b),
            Edge::Oriented(a, b) => write!(f, "{} -> {}", a, b),
        }
    }
}

impl Serialize for Edge {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.endpoints().serialize(serializer)
    }
}
