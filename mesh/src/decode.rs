//! Face set decoding into edges.
//!
//! Three encodings are supported:
//! - loop based face sets (`IfcConnectedFaceSet`), whose poly loops and
//!   oriented edges are found through the reference closure
//! - indexed triangle sets (`IfcTriangulatedFaceSet`)
//! - indexed polygon sets with optional voids (`IfcPolygonalFaceSet`)

use crate::error::{MeshError, MeshResult};
use bimv_core::{Edge, InstanceId, OrientationMode, Value, Vertex};
use bimv_graph::Model;
use tracing::trace;

/// Face set encoding of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceTopology {
    /// Faces bounded by poly loops or oriented edges.
    LoopBased,
    /// Triangles indexing into a shared coordinate list.
    IndexedTriangles,
    /// Polygons, possibly with holes, indexing into a shared coordinate list.
    IndexedPolygons,
}

impl FaceTopology {
    /// Classify an instance by type.
    pub fn of(model: &dyn Model, instance: InstanceId) -> MeshResult<Self> {
        if model.is_a(instance, "IfcConnectedFaceSet") {
            Ok(FaceTopology::LoopBased)
        } else if model.is_a(instance, "IfcTriangulatedFaceSet") {
            Ok(FaceTopology::IndexedTriangles)
        } else if model.is_a(instance, "IfcPolygonalFaceSet") {
            Ok(FaceTopology::IndexedPolygons)
        } else {
            let type_name = model.type_name(instance).unwrap_or("?");
            Err(MeshError::unsupported_encoding(
                model.describe(instance),
                type_name,
            ))
        }
    }
}

/// Decode every edge of the faces of `instance`, one entry per use.
pub fn decode_edges(
    model: &dyn Model,
    instance: InstanceId,
    mode: OrientationMode,
) -> MeshResult<Vec<Edge>> {
    let topology = FaceTopology::of(model, instance)?;
    let decoder = Decoder {
        model,
        instance,
        mode,
    };

    let edges = match topology {
        FaceTopology::LoopBased => decoder.loop_based()?,
        FaceTopology::IndexedTriangles => decoder.indexed_triangles()?,
        FaceTopology::IndexedPolygons => decoder.indexed_polygons()?,
    };
    trace!(%instance, ?topology, edges = edges.len(), "decoded face set");
    Ok(edges)
}

struct Decoder<'m> {
    model: &'m dyn Model,
    instance: InstanceId,
    mode: OrientationMode,
}

impl Decoder<'_> {
    fn malformed(&self, message: impl Into<String>) -> MeshError {
        MeshError::malformed(self.model.describe(self.instance), message)
    }

    // ==================== Loop Based ====================

    fn loop_based(&self) -> MeshResult<Vec<Edge>> {
        let closure = self.model.closure(self.instance);
        let mut edges = Vec::new();

        for &id in &closure {
            if self.model.is_a(id, "IfcPolyLoop") {
                let polygon = self.required(id, "Polygon")?;
                let points = polygon
                    .refs()
                    .into_iter()
                    .map(|point| self.point(point))
                    .collect::<MeshResult<Vec<_>>>()?;
                self.emit_loop(&points, &mut edges)?;
            }
        }

        for &id in &closure {
            if self.model.is_a(id, "IfcOrientedEdge") {
                let element = self.required_ref(id, "EdgeElement")?;
                let start = self.vertex_point(self.required_ref(element, "EdgeStart")?)?;
                let end = self.vertex_point(self.required_ref(element, "EdgeEnd")?)?;
                let edge = Edge::new(start, end, self.mode);
                edges.push(if self.orientation(id)? {
                    edge
                } else {
                    edge.reversed()
                });
            }
        }
        Ok(edges)
    }

    fn vertex_point(&self, vertex: InstanceId) -> MeshResult<Vertex> {
        let geometry = self.required_ref(vertex, "VertexGeometry")?;
        self.point(geometry)
    }

    fn point(&self, point: InstanceId) -> MeshResult<Vertex> {
        let coordinates = self.required(point, "Coordinates")?;
        self.vertex(coordinates)
            .ok_or_else(|| self.malformed(format!("{} has invalid coordinates", point)))
    }

    fn orientation(&self, oriented_edge: InstanceId) -> MeshResult<bool> {
        let value = self.required(oriented_edge, "Orientation")?;
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Enum(e) if e == "T" || e == "TRUE" => Ok(true),
            Value::Enum(e) if e == "F" || e == "FALSE" => Ok(false),
            other => Err(self.malformed(format!(
                "{} has non-boolean Orientation {}",
                oriented_edge, other
            ))),
        }
    }

    // ==================== Indexed ====================

    fn indexed_triangles(&self) -> MeshResult<Vec<Edge>> {
        let coords = self.coordinate_list()?;
        let triangles = self.required(self.instance, "CoordIndex")?;
        let mut edges = Vec::new();

        for triangle in self.list(triangles, "CoordIndex")? {
            let corners = self.resolve_indices(&coords, triangle)?;
            if corners.len() != 3 {
                return Err(self.malformed(format!(
                    "triangle with {} indices",
                    corners.len()
                )));
            }
            self.emit_loop(&corners, &mut edges)?;
        }
        Ok(edges)
    }

    fn indexed_polygons(&self) -> MeshResult<Vec<Edge>> {
        let coords = self.coordinate_list()?;
        let faces = self.required(self.instance, "Faces")?;
        let mut edges = Vec::new();

        for face in faces.refs() {
            let outer = self.required(face, "CoordIndex")?;
            self.emit_loop(&self.resolve_indices(&coords, outer)?, &mut edges)?;

            if self.model.is_a(face, "IfcIndexedPolygonalFaceWithVoids") {
                let inner = self.required(face, "InnerCoordIndices")?;
                for void in self.list(inner, "InnerCoordIndices")? {
                    self.emit_loop(&self.resolve_indices(&coords, void)?, &mut edges)?;
                }
            }
        }
        Ok(edges)
    }

    fn coordinate_list(&self) -> MeshResult<Vec<Vertex>> {
        let list = self.required_ref(self.instance, "Coordinates")?;
        let coord_list = self.required(list, "CoordList")?;
        self.list(coord_list, "CoordList")?
            .iter()
            .map(|point| {
                self.vertex(point)
                    .ok_or_else(|| self.malformed(format!("invalid coordinate {}", point)))
            })
            .collect()
    }

    /// Map 1-based indices to coordinates.
    fn resolve_indices(&self, coords: &[Vertex], indices: &Value) -> MeshResult<Vec<Vertex>> {
        self.list(indices, "index list")?
            .iter()
            .map(|index| {
                index
                    .as_int()
                    .filter(|&i| i >= 1)
                    .and_then(|i| coords.get(i as usize - 1))
                    .copied()
                    .ok_or_else(|| {
                        self.malformed(format!(
                            "index {} outside coordinate list of {} points",
                            index,
                            coords.len()
                        ))
                    })
            })
            .collect()
    }

    // ==================== Helpers ====================

    /// Consecutive pairs of a closed loop, including last to first.
    fn emit_loop(&self, points: &[Vertex], edges: &mut Vec<Edge>) -> MeshResult<()> {
        if points.is_empty() {
            return Err(self.malformed("empty loop"));
        }
        let shifted = points.iter().cycle().skip(1);
        edges.extend(
            points
                .iter()
                .zip(shifted)
                .map(|(&a, &b)| Edge::new(a, b, self.mode)),
        );
        Ok(())
    }

    fn vertex(&self, coordinates: &Value) -> Option<Vertex> {
        let numbers = coordinates
            .as_list()?
            .iter()
            .map(Value::as_number)
            .collect::<Option<Vec<f64>>>()?;
        Vertex::from_coords(&numbers)
    }

    fn list<'v>(&self, value: &'v Value, what: &str) -> MeshResult<&'v [Value]> {
        value
            .as_list()
            .ok_or_else(|| self.malformed(format!("{} is not a list", what)))
    }

    fn required(&self, id: InstanceId, attribute: &str) -> MeshResult<&Value> {
        self.model
            .get_attribute(id, attribute)
            .ok_or_else(|| self.malformed(format!("{} has no {}", id, attribute)))
    }

    fn required_ref(&self, id: InstanceId, attribute: &str) -> MeshResult<InstanceId> {
        self.required(id, attribute)?
            .as_ref_id()
            .ok_or_else(|| self.malformed(format!("{} of {} is not a reference", attribute, id)))
    }
}
