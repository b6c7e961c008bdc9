//! Render Context & Settings
//!
//! [`RenderContext`] gathers the render state a host keeps as scene-wide
//! globals: the output path, the active camera and the file naming options.
//! Operations take it by `&mut` and hand it back in the state they found it.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! let mut ctx = RenderContext {
//!     settings: RenderSettings {
//!         output_path: "//renders/".into(),
//!         resolution_percentage: 50,
//!         ..Default::default()
//!     },
//!     naming: FileNaming::new("shot_", "_final"),
//!     ..Default::default()
//! };
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use subrender_core::ObjectKey;

use crate::output::IMAGE_EXTENSION;

// ---------------------------------------------------------------------------
// Image settings
// ---------------------------------------------------------------------------

/// Channels written to the output image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorMode {
    #[serde(rename = "BW")]
    Bw,
    #[serde(rename = "RGB")]
    Rgb,
    #[default]
    #[serde(rename = "RGBA")]
    Rgba,
}

/// Bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorDepth {
    #[default]
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "16")]
    Sixteen,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    pub color_mode: ColorMode,
    pub color_depth: ColorDepth,
    /// PNG compression, 0 (none) to 100 (smallest).
    pub compression: u8,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Rgba,
            color_depth: ColorDepth::Eight,
            compression: 15,
        }
    }
}

// ---------------------------------------------------------------------------
// Render settings
// ---------------------------------------------------------------------------

/// Largest accepted resolution per axis, in pixels.
pub const MAX_RESOLUTION: u32 = 65_536;

/// Largest accepted resolution scale, in percent.
pub const MAX_RESOLUTION_PERCENTAGE: u32 = 32_767;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Host-style output path. Read as the output *directory* by the batch
    /// operations and temporarily overwritten with each image's full path.
    pub output_path: String,
    pub resolution_x: u32,
    pub resolution_y: u32,
    pub resolution_percentage: u32,
    /// When false, existing files are left untouched by the render primitive.
    pub use_overwrite: bool,
    pub image: ImageSettings,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            output_path: "//render/".to_string(),
            resolution_x: 1920,
            resolution_y: 1080,
            resolution_percentage: 100,
            use_overwrite: true,
            image: ImageSettings::default(),
        }
    }
}

impl RenderSettings {
    /// Resolution after applying the percentage scale.
    ///
    /// Inputs are clamped to `1..=MAX_RESOLUTION` and
    /// `1..=MAX_RESOLUTION_PERCENTAGE`, and so is each output axis.
    #[must_use]
    pub fn effective_resolution(&self) -> (u32, u32) {
        let percentage = u64::from(self.resolution_percentage.clamp(1, MAX_RESOLUTION_PERCENTAGE));
        let scale = |v: u32| {
            let v = u64::from(v.clamp(1, MAX_RESOLUTION));
            let scaled = (v * percentage / 100).clamp(1, u64::from(MAX_RESOLUTION));
            u32::try_from(scaled).unwrap_or(MAX_RESOLUTION)
        };
        (scale(self.resolution_x), scale(self.resolution_y))
    }

    /// Whether the resolution fields are within `1..=MAX_RESOLUTION` and
    /// `1..=MAX_RESOLUTION_PERCENTAGE`.
    #[must_use]
    pub fn resolution_in_range(&self) -> bool {
        (1..=MAX_RESOLUTION).contains(&self.resolution_x)
            && (1..=MAX_RESOLUTION).contains(&self.resolution_y)
            && (1..=MAX_RESOLUTION_PERCENTAGE).contains(&self.resolution_percentage)
    }
}

// ---------------------------------------------------------------------------
// File naming
// ---------------------------------------------------------------------------

/// Text placed around the camera name in output file names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNaming {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

impl FileNaming {
    #[must_use]
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            suffix: Some(suffix.into()),
        }
    }

    /// `{prefix}{camera}{suffix}.png`, plain concatenation. Unset parts are empty
    /// and the extension is always `.png`, whatever the image settings say.
    #[must_use]
    pub fn file_name(&self, camera: &str) -> String {
        format!(
            "{}{camera}{}.{IMAGE_EXTENSION}",
            self.prefix.as_deref().unwrap_or_default(),
            self.suffix.as_deref().unwrap_or_default(),
        )
    }
}

// ---------------------------------------------------------------------------
// RenderContext
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub settings: RenderSettings,
    /// The camera the render primitive renders from.
    pub active_camera: Option<ObjectKey>,
    pub naming: FileNaming,
    /// Base directory for `//`-relative output paths. The working directory
    /// is used when unset.
    pub project_dir: Option<PathBuf>,
}

impl RenderContext {
    #[must_use]
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }
}
