//! IFC fixture schema shared by the unit and integration tests.

use crate::{Registry, RegistryBuilder, RegistryError};

/// `(type, parent, abstract)` rows of the fixture schema, parents first.
pub const IFC_TYPES: &[(&str, Option<&str>, bool)] = &[
    // Spatial structure
    ("IfcRoot", None, true),
    ("IfcObjectDefinition", Some("IfcRoot"), true),
    ("IfcProject", Some("IfcObjectDefinition"), false),
    ("IfcProduct", Some("IfcObjectDefinition"), true),
    ("IfcSpatialStructureElement", Some("IfcProduct"), true),
    ("IfcSite", Some("IfcSpatialStructureElement"), false),
    ("IfcBuilding", Some("IfcSpatialStructureElement"), false),
    ("IfcBuildingStorey", Some("IfcSpatialStructureElement"), false),
    ("IfcElement", Some("IfcProduct"), true),
    ("IfcWall", Some("IfcElement"), false),
    ("IfcFurnishingElement", Some("IfcElement"), false),
    ("IfcRelationship", Some("IfcRoot"), true),
    ("IfcRelAggregates", Some("IfcRelationship"), false),
    ("IfcRelContainedInSpatialStructure", Some("IfcRelationship"), false),
    ("IfcObjectPlacement", None, true),
    ("IfcLocalPlacement", Some("IfcObjectPlacement"), false),
    ("IfcGridPlacement", Some("IfcObjectPlacement"), false),
    // Representations
    ("IfcProductDefinitionShape", None, false),
    ("IfcShapeRepresentation", None, false),
    // Geometry
    ("IfcRepresentationItem", None, true),
    ("IfcTopologicalRepresentationItem", Some("IfcRepresentationItem"), true),
    ("IfcConnectedFaceSet", Some("IfcTopologicalRepresentationItem"), false),
    ("IfcClosedShell", Some("IfcConnectedFaceSet"), false),
    ("IfcOpenShell", Some("IfcConnectedFaceSet"), false),
    ("IfcFace", Some("IfcTopologicalRepresentationItem"), false),
    ("IfcFaceBound", Some("IfcTopologicalRepresentationItem"), false),
    ("IfcFaceOuterBound", Some("IfcFaceBound"), false),
    ("IfcLoop", Some("IfcTopologicalRepresentationItem"), false),
    ("IfcPolyLoop", Some("IfcLoop"), false),
    ("IfcEdgeLoop", Some("IfcLoop"), false),
    ("IfcEdge", Some("IfcTopologicalRepresentationItem"), false),
    ("IfcOrientedEdge", Some("IfcEdge"), false),
    ("IfcVertexPoint", Some("IfcTopologicalRepresentationItem"), false),
    ("IfcCartesianPoint", Some("IfcRepresentationItem"), false),
    ("IfcCartesianPointList3D", Some("IfcRepresentationItem"), false),
    ("IfcTessellatedFaceSet", Some("IfcRepresentationItem"), true),
    ("IfcTriangulatedFaceSet", Some("IfcTessellatedFaceSet"), false),
    ("IfcPolygonalFaceSet", Some("IfcTessellatedFaceSet"), false),
    ("IfcIndexedPolygonalFace", None, false),
    ("IfcIndexedPolygonalFaceWithVoids", Some("IfcIndexedPolygonalFace"), false),
    ("IfcExtrudedAreaSolid", Some("IfcRepresentationItem"), false),
];

/// `(relationship, relating, related)` accessor rows.
pub const IFC_RELATIONSHIPS: &[(&str, &str, &str)] = &[
    ("IfcRelAggregates", "RelatingObject", "RelatedObjects"),
    (
        "IfcRelContainedInSpatialStructure",
        "RelatingStructure",
        "RelatedElements",
    ),
];

/// Build the fixture schema.
pub fn ifc_registry() -> Result<Registry, RegistryError> {
    let mut b = RegistryBuilder::new();
    for &(name, parent, is_abstract) in IFC_TYPES {
        let mut ty = b.add_type(name);
        if let Some(parent) = parent {
            ty = ty.extends(parent);
        }
        if is_abstract {
            ty = ty.abstract_type();
        }
        ty.done()?;
    }
    for &(relationship, relating, related) in IFC_RELATIONSHIPS {
        b.add_relationship(relationship, relating, related)?;
    }
    b.build()
}
