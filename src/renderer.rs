//! Per-frame rendering of the fixed scene.
//!
//! [`FrameRenderer`] owns every GPU object the demo draws with: the
//! pipeline, the write-once uniform buffer, the diffuse texture bind
//! group and the loaded model. All of it is created in [`FrameRenderer::new`]
//! and only read afterwards; each frame binds the same state and issues
//! exactly one indexed draw of the first mesh's first submesh.

use std::iter;

use anyhow::Context as _;
use wgpu::util::DeviceExt;

use crate::{
    app::ViewerConfig,
    context::Context,
    data_structures::{
        model::{DrawModel, Model},
        texture::Texture,
    },
    pipelines::textured,
    resources,
    transform::{self, Uniforms},
};

#[derive(Debug)]
pub struct FrameRenderer {
    pipeline: wgpu::RenderPipeline,
    #[allow(unused)]
    uniforms_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    #[allow(unused)]
    texture: Texture,
    texture_bind_group: wgpu::BindGroup,
    model: Model,
}

impl FrameRenderer {
    /// One-time setup: compute and upload the transform, compile the
    /// pipeline from the shader file and load the model and texture.
    ///
    /// Every failure here is a startup precondition violation; the caller
    /// terminates the process with the returned diagnostic.
    pub async fn new(ctx: &Context, config: &ViewerConfig) -> anyhow::Result<Self> {
        let mvp = transform::demo_mvp(ctx.config.width, ctx.config.height);
        let uniforms = Uniforms::new(mvp);
        let uniforms_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Uniforms Buffer"),
                contents: bytemuck::cast_slice(&[uniforms]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let uniform_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &textured::uniform_layout(&ctx.device),
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms_buffer.as_entire_binding(),
            }],
            label: Some("uniform_bind_group"),
        });

        log::info!("compiling shader {}", config.shader);
        let shader_source = resources::texture::load_string(&config.shader)
            .await
            .context("shader source is a startup requirement")?;
        let pipeline = textured::mk_textured_pipeline(&ctx.device, &ctx.config, &shader_source);

        log::info!("loading model {}", config.model);
        let model = resources::load_model_obj(&config.model, &config.ao, &ctx.device).await?;

        log::info!("loading texture {}", config.texture);
        let texture = resources::texture::load_texture(&config.texture, &ctx.device, &ctx.queue)
            .await
            .context("diffuse texture is a startup requirement")?;
        let texture_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &textured::diffuse_layout(&ctx.device),
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
            label: Some("diffuse_bind_group"),
        });

        Ok(Self {
            pipeline,
            uniforms_buffer,
            uniform_bind_group,
            texture,
            texture_bind_group,
            model,
        })
    }

    /// Draw one frame: acquire the next surface texture, clear colour and
    /// depth, issue the single indexed draw and present.
    pub fn render(&self, ctx: &Context) -> Result<(), wgpu::SurfaceError> {
        let output = ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            // The model is validated at load time to contain at least one
            // mesh with one submesh, so these lookups cannot fail.
            if let Some(mesh) = self.model.meshes.first()
                && let Some(submesh) = mesh.submeshes.first()
            {
                render_pass.draw_submesh(
                    mesh,
                    submesh,
                    &self.uniform_bind_group,
                    &self.texture_bind_group,
                );
            }
        }

        ctx.queue.submit(iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
