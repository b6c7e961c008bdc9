//! Headless placeholder render primitive.
//!
//! [`PlaceholderRenderer`] writes a flat-colour PNG per camera instead of
//! rasterizing geometry. The colour is derived from the camera name, so
//! different cameras produce visibly different files. It honours the
//! resolution, overwrite and PNG image settings of the render context and is
//! what the command-line front end uses when no host renderer is attached.

use std::fs::File;
use std::hash::{Hash, Hasher};
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, ImageBuffer, Luma, Rgb, Rgba};
use rustc_hash::FxHasher;
use subrender_core::{Result, SubrenderError};
use subrender_scene::Scene;

use crate::context::{ColorDepth, ColorMode, ImageSettings, RenderContext};
use crate::primitive::RenderPrimitive;

#[derive(Debug, Default)]
pub struct PlaceholderRenderer {
    images_written: usize,
}

impl PlaceholderRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Files actually written (skipped non-overwrites are not counted).
    #[must_use]
    pub fn images_written(&self) -> usize {
        self.images_written
    }
}

impl RenderPrimitive for PlaceholderRenderer {
    fn render_still(
        &mut self,
        scene: &Scene,
        ctx: &RenderContext,
        destination: &Path,
    ) -> Result<()> {
        let settings = &ctx.settings;
        if !settings.use_overwrite && destination.exists() {
            log::debug!("Keeping existing {}", destination.display());
            return Ok(());
        }

        let camera_name = ctx
            .active_camera
            .and_then(|key| scene.get_object(key))
            .map_or("", |camera| camera.name.as_str());
        let (width, height) = settings.effective_resolution();
        let image = fill(width, height, swatch(camera_name), &settings.image);

        let writer = BufWriter::new(File::create(destination)?);
        let encoder = PngEncoder::new_with_quality(
            writer,
            compression_type(settings.image.compression),
            FilterType::Adaptive,
        );
        image.write_with_encoder(encoder).map_err(|err| SubrenderError::RenderFailed {
            path: destination.to_path_buf(),
            reason: err.to_string(),
        })?;

        self.images_written += 1;
        Ok(())
    }
}

/// A stable RGB colour for `name`.
fn swatch(name: &str) -> [u8; 3] {
    let mut hasher = FxHasher::default();
    name.hash(&mut hasher);
    let h = hasher.finish();
    [(h >> 16) as u8, (h >> 8) as u8, h as u8]
}

fn fill(width: u32, height: u32, [r, g, b]: [u8; 3], settings: &ImageSettings) -> DynamicImage {
    let wide = |c: u8| u16::from(c) * 257;
    let luma = (0.2126 * f32::from(r) + 0.7152 * f32::from(g) + 0.0722 * f32::from(b)) as u8;

    match (settings.color_mode, settings.color_depth) {
        (ColorMode::Bw, ColorDepth::Eight) => {
            DynamicImage::ImageLuma8(ImageBuffer::from_pixel(width, height, Luma([luma])))
        }
        (ColorMode::Bw, ColorDepth::Sixteen) => {
            DynamicImage::ImageLuma16(ImageBuffer::from_pixel(width, height, Luma([wide(luma)])))
        }
        (ColorMode::Rgb, ColorDepth::Eight) => {
            DynamicImage::ImageRgb8(ImageBuffer::from_pixel(width, height, Rgb([r, g, b])))
        }
        (ColorMode::Rgb, ColorDepth::Sixteen) => DynamicImage::ImageRgb16(
            ImageBuffer::from_pixel(width, height, Rgb([wide(r), wide(g), wide(b)])),
        ),
        (ColorMode::Rgba, ColorDepth::Eight) => {
            DynamicImage::ImageRgba8(ImageBuffer::from_pixel(width, height, Rgba([r, g, b, 255])))
        }
        (ColorMode::Rgba, ColorDepth::Sixteen) => DynamicImage::ImageRgba16(
            ImageBuffer::from_pixel(width, height, Rgba([wide(r), wide(g), wide(b), u16::MAX])),
        ),
    }
}

fn compression_type(compression: u8) -> CompressionType {
    match compression {
        0..=10 => CompressionType::Fast,
        11..=70 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}
