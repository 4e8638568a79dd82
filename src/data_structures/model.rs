//! Mesh and vertex definitions plus the render-pass draw extension.
//!
//! The vertex format is packed to a fixed 24-byte stride: position as
//! three floats, color as four normalized bytes, texture coordinates as
//! two half-floats and a per-vertex occlusion factor as one float. The
//! occlusion channel is filled by the ambient occlusion baker at load
//! time and multiplied into the fragment color by the shader.

use half::f16;

/// Types that can describe their GPU vertex buffer layout.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// A single packed vertex. 24 bytes, see module docs for the layout.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub color: [u8; 4],
    pub tex_coords: [f16; 2],
    pub occlusion: f32,
}

impl ModelVertex {
    /// Pack a vertex from unpacked f32 attributes. Color defaults to
    /// opaque white and occlusion to fully lit until the baker runs.
    pub fn pack(position: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Self {
            position,
            color: [255, 255, 255, 255],
            tex_coords: [f16::from_f32(tex_coords[0]), f16::from_f32(tex_coords[1])],
            occlusion: 1.0,
        }
    }
}

impl Vertex for ModelVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Unorm8x4,
                },
                wgpu::VertexAttribute {
                    offset: 16,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float16x2,
                },
                wgpu::VertexAttribute {
                    offset: 20,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}

/// A named index range within a mesh, drawn as one indexed batch.
#[derive(Debug)]
pub struct Submesh {
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

impl Submesh {
    pub const INDEX_FORMAT: wgpu::IndexFormat = wgpu::IndexFormat::Uint32;
}

/// One vertex buffer plus its submeshes.
#[derive(Debug)]
pub struct Mesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub submeshes: Vec<Submesh>,
}

/// A loaded model. The renderer only ever draws the first mesh's first
/// submesh; the rest is carried for completeness of the import step.
#[derive(Debug)]
pub struct Model {
    pub meshes: Vec<Mesh>,
}

/// Render-pass extension for drawing meshes with the fixed bind groups.
pub trait DrawModel<'a> {
    fn draw_submesh(
        &mut self,
        mesh: &'a Mesh,
        submesh: &'a Submesh,
        uniforms: &'a wgpu::BindGroup,
        texture: &'a wgpu::BindGroup,
    );
}

impl<'a, 'b> DrawModel<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_submesh(
        &mut self,
        mesh: &'b Mesh,
        submesh: &'b Submesh,
        uniforms: &'b wgpu::BindGroup,
        texture: &'b wgpu::BindGroup,
    ) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(submesh.index_buffer.slice(..), Submesh::INDEX_FORMAT);
        self.set_bind_group(0, uniforms, &[]);
        self.set_bind_group(1, texture, &[]);
        self.draw_indexed(0..submesh.num_elements, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_stride_is_24_bytes() {
        assert_eq!(std::mem::size_of::<ModelVertex>(), 24);
        assert_eq!(
            ModelVertex::desc().array_stride,
            24 as wgpu::BufferAddress
        );
    }

    #[test]
    fn vertex_attribute_offsets_and_formats() {
        let desc = ModelVertex::desc();
        let offsets: Vec<u64> = desc.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 16, 20]);

        let formats: Vec<wgpu::VertexFormat> =
            desc.attributes.iter().map(|a| a.format).collect();
        assert_eq!(
            formats,
            vec![
                wgpu::VertexFormat::Float32x3,
                wgpu::VertexFormat::Unorm8x4,
                wgpu::VertexFormat::Float16x2,
                wgpu::VertexFormat::Float32,
            ]
        );
    }

    #[test]
    fn packed_vertex_defaults() {
        let v = ModelVertex::pack([1.0, 2.0, 3.0], [0.25, 0.75]);
        assert_eq!(v.color, [255, 255, 255, 255]);
        assert_eq!(v.occlusion, 1.0);
        assert_eq!(v.tex_coords[0].to_f32(), 0.25);
        assert_eq!(v.tex_coords[1].to_f32(), 0.75);
    }
}
