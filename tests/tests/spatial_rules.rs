//! Spatial structure rules: traversal, assignment, placement, counts and
//! file conditions.

use bimv_tests::prelude::*;

const RULES: &str = r#"{
    "rules": [
        {
            "name": "buildings under sites",
            "then": { "assigned_to": {
                "related": "IfcBuilding",
                "relating": "IfcSite",
                "relationship": "IfcRelAggregates"
            } }
        },
        {
            "name": "buildings under sites when siteless",
            "then": { "assigned_to": {
                "related": "IfcBuilding",
                "relating": "IfcSite",
                "relationship": "IfcRelAggregates",
                "condition": { "entity": "IfcSite", "presence": "absent" }
            } }
        },
        {
            "name": "walls placed in container",
            "then": { "placed_relative_to_container": {
                "entity": "IfcWall",
                "relationship": "IfcRelContainedInSpatialStructure",
                "expected_placement_type": "IfcLocalPlacement"
            } }
        },
        {
            "name": "storey wall names",
            "given": [{ "related": {
                "relationship": "IfcRelContainedInSpatialStructure",
                "source_role": "from",
                "target_role": "to",
                "target_type": "IfcBuildingStorey",
                "entity": "IfcWall"
            } }],
            "then": { "unique_values": { "attribute": "Name" } }
        },
        {
            "name": "broken traversal",
            "given": [{ "related": {
                "relationship": "IfcRelContainedInSpatialStructure",
                "source_role": "from",
                "target_role": "from",
                "target_type": "IfcBuildingStorey",
                "entity": "IfcWall"
            } }],
            "then": { "unique_values": { "attribute": "Name" } }
        },
        {
            "name": "a site exists",
            "then": { "instance_count": { "constraint": "at_least", "count": 1, "entity": "IfcSite" } }
        },
        {
            "name": "no buildings",
            "then": { "instance_count": { "constraint": "at_most", "count": 0, "entity": "IfcBuilding" } }
        },
        {
            "name": "single project in coordination view",
            "given": [{ "file": { "field": "model_view_definition", "values": ["coordinationview"] } }],
            "then": { "instance_count": { "constraint": "at_most", "count": 1, "entity": "IfcProject" } }
        },
        {
            "name": "ifc2x3 has no buildings",
            "given": [{ "file": { "field": "schema_identifier", "values": ["IFC2X3"] } }],
            "then": { "instance_count": { "constraint": "at_most", "count": 0, "entity": "IfcBuilding" } }
        }
    ]
}"#;

/// The spatial chain plus a stray building aggregated directly under the
/// project, and a storey containing two walls and a furnishing element.
/// The second wall is placed relative to the site.
fn scenario() -> TestResult<Scenario> {
    let mut b = ModelBuilder::new()?.schema("IFC4").view("CoordinationView");
    let ids = spatial_model(&mut b)?;

    let stray = b.product("IfcBuilding", "Annex", None)?;
    b.aggregate(ids.project, &[stray])?;

    let aligned = b.placement(Some(ids.storey_placement))?;
    let misaligned = b.placement(Some(ids.site_placement))?;
    let furnishing_placement = b.placement(Some(ids.storey_placement))?;
    let walls = [
        b.product("IfcWall", "Wall A", Some(aligned))?,
        b.product("IfcWall", "Wall A", Some(misaligned))?,
    ];
    let furnishing = b.product("IfcFurnishingElement", "Wall A", Some(furnishing_placement))?;
    b.contain(ids.storey, &[walls[0], walls[1], furnishing])?;

    Ok(Scenario::new("spatial").model(b.build()?).rules_json(RULES)?)
}

#[test]
fn test_structural_assignment() -> TestResult<()> {
    scenario()?
        .step("buildings under sites", |a| {
            a.fails(1)
                .kind("structural_assignment")
                .message_matches(r"^The instance #\d+=IfcBuilding is assigned to #1=IfcProject$")
        })
        .step("buildings under sites when siteless", |a| a.passes())
        .run()
}

#[test]
fn test_placement_relative_to_container() -> TestResult<()> {
    scenario()?
        .step("walls placed in container", |a| {
            a.fails(1).kind("placement_mismatch").message_matches(
                r"^The IfcLocalPlacement placement of #\d+=IfcWall is relative to #\d+=IfcLocalPlacement instead of #\d+=IfcLocalPlacement of its container #\d+=IfcBuildingStorey \(through #\d+=IfcRelContained.*\.\.\.ructure\)$",
            )
        })
        .run()
}

#[test]
fn test_traversal_selects_contained_walls() -> TestResult<()> {
    // The furnishing shares the wall name but is not an IfcWall.
    scenario()?
        .step("storey wall names", |a| {
            a.fails(1)
                .message_matches(r"Name: Wall A at instances #\d+=IfcWall;#\d+=IfcWall$")
        })
        .step("broken traversal", |a| a.error("Source and target role are both From"))
        .run()
}

#[test]
fn test_instance_counts() -> TestResult<()> {
    scenario()?
        .step("a site exists", |a| a.passes())
        .step("no buildings", |a| {
            a.fails(1).message_matches(
                r"^The following 2 instances of type IfcBuilding were encountered: #\d+=IfcBuilding;#\d+=IfcBuilding$",
            )
        })
        .run()
}

#[test]
fn test_file_conditions() -> TestResult<()> {
    scenario()?
        .step("single project in coordination view", |a| a.passes())
        .step("ifc2x3 has no buildings", |a| a.passes().not_applicable())
        .run()
}
