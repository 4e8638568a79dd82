//! Engine data structures: vertex layout, meshes and textures.
//!
//! - `model` contains the packed vertex format, mesh/submesh GPU handles
//!   and the render-pass draw extension
//! - `texture` contains the GPU texture wrapper and creation utilities

pub mod model;
pub mod texture;
