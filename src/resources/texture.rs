//! File loading helpers for shader, model and texture assets.
//!
//! All asset files live in `assets/` next to the working directory (the
//! build script stages the directory alongside the binary). Missing files
//! surface as errors here and become fatal diagnostics at the app layer,
//! since every asset is a startup precondition for the demo.

use anyhow::Context;

use crate::data_structures::texture::Texture;

fn asset_path(file_name: &str) -> std::path::PathBuf {
    std::path::Path::new("./").join("assets").join(file_name)
}

/// Read a text asset (shader source, OBJ text) to a string.
pub async fn load_string(file_name: &str) -> anyhow::Result<String> {
    let path = asset_path(file_name);
    tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("could not read asset {}", path.display()))
}

/// Read a binary asset (image data) fully into memory.
pub async fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    let path = asset_path(file_name);
    tokio::fs::read(&path)
        .await
        .with_context(|| format!("could not read asset {}", path.display()))
}

/// Load an image file and upload it as an sRGB GPU texture.
pub async fn load_texture(
    file_name: &str,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<Texture> {
    let data = load_binary(file_name).await?;
    Texture::from_bytes(device, queue, &data, file_name)
}
