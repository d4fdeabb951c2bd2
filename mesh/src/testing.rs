//! Face set fixtures for unit tests.

use bimv_core::{attrs, InstanceId, Value, Vertex};
use bimv_graph::Graph;
use bimv_registry::Registry;

/// Corners of the unit tetrahedron, addressed 1-based.
pub const CORNERS: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

/// Consistently oriented faces of the closed tetrahedron.
pub const TETRAHEDRON_FACES: [[i64; 3]; 4] = [[1, 3, 2], [1, 2, 4], [2, 3, 4], [1, 4, 3]];

pub fn corner(index: usize) -> Vertex {
    let [x, y, z] = CORNERS[index - 1];
    Vertex::new(x, y, z)
}

pub fn ifc_registry() -> Registry {
    bimv_registry::testing::ifc_registry().unwrap()
}

fn coord_values(point: [f64; 3]) -> Value {
    Value::from(point.to_vec())
}

fn cartesian_points(g: &mut Graph) -> Vec<InstanceId> {
    CORNERS
        .iter()
        .map(|&c| g.insert("IfcCartesianPoint", attrs! { "Coordinates" => coord_values(c) }).unwrap())
        .collect()
}

fn point_list(g: &mut Graph) -> InstanceId {
    let coords: Vec<Value> = CORNERS.iter().map(|&c| coord_values(c)).collect();
    g.insert("IfcCartesianPointList3D", attrs! { "CoordList" => coords }).unwrap()
}

fn shell_of(g: &mut Graph, bounds: Vec<InstanceId>) -> InstanceId {
    let faces: Vec<InstanceId> = bounds
        .into_iter()
        .map(|bound_loop| {
            let bound = g
                .insert("IfcFaceOuterBound", attrs! { "Bound" => bound_loop, "Orientation" => true })
                .unwrap();
            g.insert("IfcFace", attrs! { "Bounds" => vec![bound] }).unwrap()
        })
        .collect();
    g.insert("IfcClosedShell", attrs! { "CfsFaces" => faces }).unwrap()
}

/// Loop based face set with one poly loop per face.
pub fn closed_shell<const N: usize>(g: &mut Graph, faces: &[[i64; N]]) -> InstanceId {
    let points = cartesian_points(g);
    let loops: Vec<InstanceId> = faces
        .iter()
        .map(|face| {
            let polygon: Vec<InstanceId> = face.iter().map(|&i| points[i as usize - 1]).collect();
            g.insert("IfcPolyLoop", attrs! { "Polygon" => polygon }).unwrap()
        })
        .collect();
    shell_of(g, loops)
}

/// Loop based face set with a single edge loop of `(start, end, orientation)`.
pub fn edge_loop_shell(g: &mut Graph, edges: &[(usize, usize, bool)]) -> InstanceId {
    let points = cartesian_points(g);
    let vertices: Vec<InstanceId> = points
        .iter()
        .map(|&p| g.insert("IfcVertexPoint", attrs! { "VertexGeometry" => p }).unwrap())
        .collect();
    let oriented: Vec<InstanceId> = edges
        .iter()
        .map(|&(start, end, orientation)| {
            let element = g
                .insert(
                    "IfcEdge",
                    attrs! { "EdgeStart" => vertices[start - 1], "EdgeEnd" => vertices[end - 1] },
                )
                .unwrap();
            g.insert(
                "IfcOrientedEdge",
                attrs! { "EdgeElement" => element, "Orientation" => orientation },
            )
            .unwrap()
        })
        .collect();
    let edge_loop = g.insert("IfcEdgeLoop", attrs! { "EdgeList" => oriented }).unwrap();
    shell_of(g, vec![edge_loop])
}

pub fn triangulated(g: &mut Graph, triangles: &[[i64; 3]]) -> InstanceId {
    let list = point_list(g);
    let index: Vec<Value> = triangles.iter().map(|t| Value::from(t.to_vec())).collect();
    g.insert(
        "IfcTriangulatedFaceSet",
        attrs! { "Coordinates" => list, "CoordIndex" => index },
    )
    .unwrap()
}

pub fn polygonal<const N: usize>(g: &mut Graph, polygons: &[[i64; N]]) -> InstanceId {
    let list = point_list(g);
    let faces: Vec<InstanceId> = polygons
        .iter()
        .map(|p| {
            g.insert("IfcIndexedPolygonalFace", attrs! { "CoordIndex" => p.to_vec() })
                .unwrap()
        })
        .collect();
    g.insert("IfcPolygonalFaceSet", attrs! { "Coordinates" => list, "Faces" => faces })
        .unwrap()
}

pub fn polygonal_with_void(g: &mut Graph, outer: [i64; 3], inner: [i64; 3]) -> InstanceId {
    let list = point_list(g);
    let face = g
        .insert(
            "IfcIndexedPolygonalFaceWithVoids",
            attrs! {
                "CoordIndex" => outer.to_vec(),
                "InnerCoordIndices" => vec![Value::from(inner.to_vec())],
            },
        )
        .unwrap();
    g.insert("IfcPolygonalFaceSet", attrs! { "Coordinates" => list, "Faces" => vec![face] })
        .unwrap()
}
