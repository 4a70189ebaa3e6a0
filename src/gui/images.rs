//! Image Asset Cache
//! Decodes static PNG assets once and keeps them as egui textures.

use anyhow::Context as _;
use egui::{ColorImage, Context, TextureHandle, TextureOptions};
use std::collections::HashMap;
use std::path::Path;

/// Textures keyed by asset path. A failed decode is cached as `None` so the
/// warning is logged once, not every frame.
#[derive(Default)]
pub struct ImageCache {
    textures: HashMap<String, Option<TextureHandle>>,
}

impl ImageCache {
    /// Texture for the asset at `path`, loading it on first use.
    pub fn texture(&mut self, ctx: &Context, name: &str, path: &Path) -> Option<&TextureHandle> {
        if !self.textures.contains_key(name) {
            let loaded = match load_color_image(path) {
                Ok(img) => Some(ctx.load_texture(name.to_string(), img, TextureOptions::LINEAR)),
                Err(err) => {
                    log::warn!("failed to load image asset '{name}': {err:#}");
                    None
                }
            };
            self.textures.insert(name.to_string(), loaded);
        }
        self.textures.get(name).and_then(|t| t.as_ref())
    }
}

fn load_color_image(path: &Path) -> anyhow::Result<ColorImage> {
    let img = image::open(path)
        .with_context(|| format!("opening {}", path.display()))?
        .to_rgba8();
    let size = [img.width() as usize, img.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(
        size,
        img.as_flat_samples().as_slice(),
    ))
}
