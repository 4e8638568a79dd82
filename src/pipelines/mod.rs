//! Render pipeline and bind group layout definitions.
//!
//! The viewer uses a single pipeline: `textured` draws the packed vertex
//! layout with one uniform transform and one diffuse texture.

pub mod textured;
