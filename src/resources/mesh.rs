//! OBJ geometry packing and GPU upload.
//!
//! `tobj` hands back flat f32 attribute arrays; this module packs them
//! into the fixed 24-byte [`ModelVertex`] layout and uploads vertex and
//! index buffers. Each OBJ model becomes one mesh with a single submesh
//! covering its whole index range.

use wgpu::util::DeviceExt;

use crate::data_structures::model::{Mesh, ModelVertex, Submesh};

/// CPU-side packed mesh, ready for occlusion baking and GPU upload.
#[derive(Clone, Debug)]
pub struct MeshData {
    pub name: String,
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

/// Pack every model in an OBJ file into the fixed vertex layout.
///
/// Texture coordinates are V-flipped to match the wgpu convention.
/// Missing texcoords default to (0, 0); colors start opaque white and the
/// occlusion channel starts fully lit until the baker runs.
pub fn pack_meshes(models: &[tobj::Model], file_name: &str) -> Vec<MeshData> {
    models
        .iter()
        .map(|m| {
            let vertices = (0..m.mesh.positions.len() / 3)
                .map(|i| {
                    ModelVertex::pack(
                        [
                            m.mesh.positions[i * 3],
                            m.mesh.positions[i * 3 + 1],
                            m.mesh.positions[i * 3 + 2],
                        ],
                        [
                            m.mesh.texcoords.get(i * 2).map_or(0.0, |f| *f),
                            1.0 - m.mesh.texcoords.get(i * 2 + 1).map_or(0.0, |f| *f),
                        ],
                    )
                })
                .collect::<Vec<_>>();

            MeshData {
                name: file_name.to_string(),
                vertices,
                indices: m.mesh.indices.clone(),
            }
        })
        .collect()
}

/// Upload a packed mesh into GPU buffers.
pub fn upload_mesh(data: &MeshData, device: &wgpu::Device) -> Mesh {
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{:?} Vertex Buffer", data.name)),
        contents: bytemuck::cast_slice(&data.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{:?} Index Buffer", data.name)),
        contents: bytemuck::cast_slice(&data.indices),
        usage: wgpu::BufferUsages::INDEX,
    });

    Mesh {
        name: data.name.clone(),
        vertex_buffer,
        submeshes: vec![Submesh {
            index_buffer,
            num_elements: data.indices.len() as u32,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_model() -> tobj::Model {
        tobj::Model {
            name: "quad".to_string(),
            mesh: tobj::Mesh {
                positions: vec![
                    0.0, 0.0, 0.0, //
                    1.0, 0.0, 0.0, //
                    1.0, 1.0, 0.0, //
                    0.0, 1.0, 0.0,
                ],
                texcoords: vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0],
                indices: vec![0, 1, 2, 0, 2, 3],
                ..Default::default()
            },
        }
    }

    #[test]
    fn packs_one_vertex_per_position_triple() {
        let packed = pack_meshes(&[quad_model()], "quad.obj");
        assert_eq!(packed.len(), 1);
        assert_eq!(packed[0].vertices.len(), 4);
        assert_eq!(packed[0].indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(packed[0].name, "quad.obj");
    }

    #[test]
    fn flips_v_coordinate() {
        let packed = pack_meshes(&[quad_model()], "quad.obj");
        let v = &packed[0].vertices;
        assert_eq!(v[0].tex_coords[1].to_f32(), 1.0);
        assert_eq!(v[2].tex_coords[1].to_f32(), 0.0);
        assert_eq!(v[2].tex_coords[0].to_f32(), 1.0);
    }

    #[test]
    fn missing_texcoords_default_to_origin() {
        let mut model = quad_model();
        model.mesh.texcoords.clear();
        let packed = pack_meshes(&[model], "quad.obj");
        for v in &packed[0].vertices {
            assert_eq!(v.tex_coords[0].to_f32(), 0.0);
            assert_eq!(v.tex_coords[1].to_f32(), 1.0);
        }
    }

    #[test]
    fn packed_vertices_start_white_and_unoccluded() {
        let packed = pack_meshes(&[quad_model()], "quad.obj");
        for v in &packed[0].vertices {
            assert_eq!(v.color, [255, 255, 255, 255]);
            assert_eq!(v.occlusion, 1.0);
        }
    }
}
