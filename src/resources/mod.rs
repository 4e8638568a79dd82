//! Loading of external assets: shader source, OBJ models and textures.
//!
//! The demo treats every asset as a startup precondition. Anything that
//! cannot be read, parsed or uploaded is reported as an error and the app
//! layer terminates with a diagnostic.

use std::io::{BufReader, Cursor};

use anyhow::{Context, bail};

use crate::data_structures::model::Model;
use crate::resources::occlusion::AoBakeParams;

pub mod mesh;
pub mod occlusion;
pub mod texture;

/// Load a Wavefront OBJ file, pack it into the fixed vertex layout, bake
/// per-vertex ambient occlusion and upload the GPU buffers.
///
/// Materials referenced by the OBJ are ignored; the demo binds one
/// explicitly loaded texture instead. A file without any mesh or without
/// indexed geometry in its first mesh is an error, because the renderer
/// unconditionally draws the first mesh's first submesh.
pub async fn load_model_obj(
    file_name: &str,
    ao: &AoBakeParams,
    device: &wgpu::Device,
) -> anyhow::Result<Model> {
    let obj_text = texture::load_string(file_name).await?;
    let obj_cursor = Cursor::new(obj_text);
    let mut obj_reader = BufReader::new(obj_cursor);

    let (models, _materials) = tobj::load_obj_buf_async(
        &mut obj_reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        // The diffuse map is loaded separately, so .mtl files are skipped.
        |_p| async move { tobj::MTLLoadResult::Ok(Default::default()) },
    )
    .await
    .with_context(|| format!("could not parse OBJ file {file_name}"))?;

    if models.is_empty() {
        bail!("no mesh found in {file_name}");
    }

    let mut packed = mesh::pack_meshes(&models, file_name);
    if packed[0].indices.is_empty() {
        bail!("no submesh found in the first mesh of {file_name}");
    }

    log::info!(
        "baking ambient occlusion for {} ({} meshes, quality {}, attenuation {})",
        file_name,
        packed.len(),
        ao.quality,
        ao.attenuation
    );
    for data in &mut packed {
        occlusion::bake_vertex_occlusion(&mut data.vertices, &data.indices, ao);
    }

    let meshes = packed
        .iter()
        .map(|data| mesh::upload_mesh(data, device))
        .collect();

    Ok(Model { meshes })
}
