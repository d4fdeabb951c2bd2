//! Edge usage rules over the three face set encodings.

use bimv_tests::prelude::*;

const RULES: &str = r#"{
    "rules": [
        {
            "name": "shells are closed",
            "given": [{ "entity": "IfcClosedShell" }],
            "then": { "edges_referenced": { "expected": 2 } }
        },
        {
            "name": "shells are oriented",
            "given": [{ "entity": "IfcClosedShell" }],
            "then": { "edges_referenced": { "expected": 1, "oriented": true } }
        },
        {
            "name": "triangulations are closed",
            "given": [{ "entity": "IfcTriangulatedFaceSet" }],
            "then": { "edges_referenced": { "expected": 2 } }
        },
        {
            "name": "polygon sets are closed",
            "given": [{ "entity": "IfcPolygonalFaceSet" }],
            "then": { "edges_referenced": { "expected": 2 } }
        },
        {
            "name": "solids are closed",
            "given": [{ "entity": "IfcExtrudedAreaSolid" }],
            "then": { "edges_referenced": { "expected": 2 } }
        }
    ]
}"#;

fn faces(list: &[[usize; 3]]) -> Vec<&[usize]> {
    list.iter().map(|f| f.as_slice()).collect()
}

mod closed_geometry {
    use super::*;

    pub fn scenario() -> TestResult<Scenario> {
        let mut b = ModelBuilder::new()?.schema("IFC4");
        b.shell("IfcClosedShell", &TETRAHEDRON, &faces(&TETRAHEDRON_FACES))?;
        b.triangulated(&TETRAHEDRON, &TETRAHEDRON_FACES)?;
        b.polygonal(&TETRAHEDRON, &faces(&TETRAHEDRON_FACES))?;

        Ok(Scenario::new("closed_geometry")
            .model(b.build()?)
            .rules_json(RULES)?
            .step("shells are closed", |a| a.passes())
            .step("shells are oriented", |a| a.passes())
            .step("triangulations are closed", |a| a.passes())
            .step("polygon sets are closed", |a| a.passes()))
    }

    #[test]
    fn test_closed_geometry_passes() -> TestResult<()> {
        scenario()?.run()
    }
}

mod open_geometry {
    use super::*;

    pub fn scenario() -> TestResult<Scenario> {
        // Three of four faces: the rim of the missing face is used once.
        let mut b = ModelBuilder::new()?.schema("IFC4");
        b.shell("IfcClosedShell", &TETRAHEDRON, &faces(&TETRAHEDRON_FACES[..3]))?;
        b.triangulated(&TETRAHEDRON, &TETRAHEDRON_FACES[1..])?;

        Ok(Scenario::new("open_geometry")
            .model(b.build()?)
            .rules_json(RULES)?
            .step("shells are closed", |a| {
                a.fails(3)
                    .kind("edge_usage")
                    .message("was referenced 1 times")
                    .message_matches(r"^On instance #\d+=IfcClosedShell the edge ")
            })
            .step("triangulations are closed", |a| a.fails(3)))
    }

    #[test]
    fn test_open_geometry_reports_rim_edges() -> TestResult<()> {
        scenario()?.run()
    }
}

mod flipped_face {
    use super::*;

    pub fn scenario() -> TestResult<Scenario> {
        // First face wound the wrong way: its half-edges collide with the
        // neighbours' half-edges.
        let mut flipped = TETRAHEDRON_FACES;
        flipped[0] = [1, 2, 3];
        let mut b = ModelBuilder::new()?;
        b.shell("IfcClosedShell", &TETRAHEDRON, &faces(&flipped))?;

        Ok(Scenario::new("flipped_face")
            .model(b.build()?)
            .rules_json(RULES)?
            .step("shells are closed", |a| a.passes())
            .step("shells are oriented", |a| {
                a.fails(3).message("was referenced 2 times")
            }))
    }

    #[test]
    fn test_flipped_face_fails_orientation_only() -> TestResult<()> {
        scenario()?.run()
    }
}

mod unsupported_encoding {
    use super::*;

    #[test]
    fn test_unsupported_encoding_aborts_rule() -> TestResult<()> {
        let mut b = ModelBuilder::new()?;
        b.add("IfcExtrudedAreaSolid", attrs!())?;

        Scenario::new("unsupported_encoding")
            .model(b.build()?)
            .rules_json(RULES)?
            .step("solids are closed", |a| a.error("Unsupported face set encoding"))
            .run()
    }
}
