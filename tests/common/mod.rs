#![allow(dead_code)]

use std::path::{Path, PathBuf};

use subrender::{RenderContext, RenderPrimitive, Result, Scene, SubrenderError};

/// One call to [`RecordingRenderer::render_still`].
#[derive(Debug, Clone)]
pub struct RenderCall {
    pub camera: Option<String>,
    pub destination: PathBuf,
    pub output_path: String,
    /// Names of collections whose view node was not excluded during the call.
    pub visible_collections: Vec<String>,
}

/// Render primitive that records every call, optionally writes an empty file
/// and can be told to fail on the n-th call.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<RenderCall>,
    pub write_files: bool,
    pub fail_on_call: Option<usize>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writing_files() -> Self {
        Self {
            write_files: true,
            ..Self::default()
        }
    }

    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Self::default()
        }
    }

    pub fn cameras(&self) -> Vec<String> {
        self.calls
            .iter()
            .map(|c| c.camera.clone().unwrap_or_default())
            .collect()
    }
}

impl RenderPrimitive for RecordingRenderer {
    fn render_still(
        &mut self,
        scene: &Scene,
        ctx: &RenderContext,
        destination: &Path,
    ) -> Result<()> {
        let visible_collections = scene
            .collections()
            .filter(|(key, _)| scene.view_layer().is_excluded(*key) == Some(false))
            .map(|(_, c)| c.name.clone())
            .collect();

        self.calls.push(RenderCall {
            camera: ctx
                .active_camera
                .and_then(|k| scene.get_object(k))
                .map(|o| o.name.clone()),
            destination: destination.to_path_buf(),
            output_path: ctx.settings.output_path.clone(),
            visible_collections,
        });

        if self.fail_on_call == Some(self.calls.len()) {
            return Err(SubrenderError::RenderFailed {
                path: destination.to_path_buf(),
                reason: "simulated failure".to_string(),
            });
        }
        if self.write_files {
            std::fs::write(destination, b"")?;
        }
        Ok(())
    }
}

/// A fresh, not yet created directory under the system temp dir.
pub fn unique_temp_dir(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!("subrender-{label}-{}", uuid::Uuid::new_v4()))
}

/// Context whose output path is `dir`.
pub fn context_for(dir: &Path) -> RenderContext {
    let mut ctx = RenderContext::default();
    ctx.settings.output_path = dir.to_string_lossy().into_owned();
    ctx
}

pub fn remove_dir(dir: &Path) {
    let _ = std::fs::remove_dir_all(dir);
}
