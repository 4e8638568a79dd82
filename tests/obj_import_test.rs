//! OBJ import pipeline, CPU side.
//!
//! Parses a small OBJ from memory, packs it into the fixed vertex layout
//! and bakes ambient occlusion, checking the invariants the renderer
//! relies on: one vertex per position triple, a drawable first submesh
//! and occlusion factors inside the attenuation bounds.

use std::io::{BufReader, Cursor};

use stillframe::resources::{
    mesh::pack_meshes,
    occlusion::{AoBakeParams, bake_vertex_occlusion},
};

const PYRAMID_OBJ: &str = "\
v 0.0 1.0 0.0
v -1.0 0.0 -1.0
v 1.0 0.0 -1.0
v 1.0 0.0 1.0
v -1.0 0.0 1.0
vt 0.5 1.0
vt 0.0 0.0
vt 1.0 0.0
f 1/1 2/2 3/3
f 1/1 3/2 4/3
f 1/1 4/2 5/3
f 1/1 5/2 2/3
";

fn load_pyramid() -> Vec<tobj::Model> {
    let mut reader = BufReader::new(Cursor::new(PYRAMID_OBJ));
    let (models, _materials) = tobj::load_obj_buf(
        &mut reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |_p| tobj::MTLLoadResult::Ok(Default::default()),
    )
    .expect("embedded OBJ should parse");
    models
}

#[test]
fn packs_an_obj_into_a_drawable_mesh() {
    let models = load_pyramid();
    let packed = pack_meshes(&models, "pyramid.obj");

    assert_eq!(packed.len(), 1);
    let mesh = &packed[0];
    assert!(!mesh.vertices.is_empty());
    // Triangulated quads still come out as a multiple of three indices.
    assert_eq!(mesh.indices.len() % 3, 0);
    assert!(!mesh.indices.is_empty(), "first submesh must be drawable");
}

#[test]
fn baked_occlusion_stays_within_attenuation_bounds() {
    let models = load_pyramid();
    let mut packed = pack_meshes(&models, "pyramid.obj");
    let params = AoBakeParams::default();

    let mesh = &mut packed[0];
    bake_vertex_occlusion(&mut mesh.vertices, &mesh.indices, &params);

    for v in &mesh.vertices {
        assert!(v.occlusion <= 1.0);
        assert!(v.occlusion >= 1.0 - params.attenuation - 1e-6);
    }
}
