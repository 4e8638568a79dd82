//! stillframe
//!
//! A minimal textured single-mesh viewer. The crate loads a Wavefront OBJ
//! model and a PNG texture, bakes per-vertex ambient occlusion into the
//! mesh, computes one model-view-projection transform at startup and then
//! draws the first mesh's first submesh every frame. Everything is created
//! during initialization and lives for the process duration; nothing is
//! mutated after setup.
//!
//! High-level modules
//! - `app`: winit event loop and demo entry point
//! - `context`: central GPU and window context that owns device/queue/surface
//! - `data_structures`: vertex/mesh/texture data models and GPU handles
//! - `pipelines`: render pipeline and bind group layout definitions
//! - `renderer`: per-frame composition issuing the single indexed draw
//! - `resources`: helpers to load the shader/model/texture from files
//! - `transform`: model/view/projection matrix math
//!

pub mod app;
pub mod context;
pub mod data_structures;
pub mod pipelines;
pub mod renderer;
pub mod resources;
pub mod transform;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use wgpu::*;
pub use winit::event::WindowEvent;
