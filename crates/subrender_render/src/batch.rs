//! Batch Renderer
//!
//! [`BatchRenderer`] drives a [`RenderPrimitive`] over the cameras of the
//! selected subcollections of a scene's main collection.
//!
//! # Batch lifecycle
//!
//! 1. Check that a main collection exists. Nothing is touched otherwise.
//! 2. Resolve the output directory from `ctx.settings.output_path` and create it.
//! 3. Check that at least one descendant of the main collection is flagged
//!    `render_selected`. The directory created in step 2 is left in place.
//! 4. For each selected collection, in traversal order:
//!    - look up its view node (missing → [`BatchWarning::ViewNodeMissing`])
//!    - force the node visible for the duration of the collection
//!    - render each camera linked into the collection, in link order
//!      (none → [`BatchWarning::NoCameraInNode`])
//! 5. Restore the output path, the active camera and every `exclude` flag.
//!
//! Restoration is done by scope guards, so it also happens when the primitive
//! fails and the error is propagated.
//!
//! Two cameras producing the same file name overwrite each other; the later
//! render wins.

use std::fmt;
use std::path::{Path, PathBuf};

use subrender_core::{CollectionKey, ObjectKey, Result, SubrenderError};
use subrender_scene::Scene;

use crate::context::RenderContext;
use crate::output::{ensure_output_dir, output_file_path, resolve_output_dir};
use crate::primitive::RenderPrimitive;
use crate::scope::{ContextScope, VisibilityScope};

/// A per-collection problem that does not stop the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchWarning {
    /// The collection has no view node in the scene's view layer.
    ViewNodeMissing {
        collection: CollectionKey,
        name: String,
    },
    /// The collection contains no camera objects.
    NoCameraInNode {
        collection: CollectionKey,
        name: String,
    },
}

impl BatchWarning {
    #[must_use]
    pub fn collection(&self) -> CollectionKey {
        match self {
            Self::ViewNodeMissing { collection, .. } | Self::NoCameraInNode { collection, .. } => {
                *collection
            }
        }
    }
}

impl fmt::Display for BatchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ViewNodeMissing { name, .. } => {
                write!(f, "View layer entry for {name} not found")
            }
            Self::NoCameraInNode { name, .. } => write!(f, "No camera in {name}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchStatus {
    #[default]
    Completed,
}

/// Outcome of [`BatchRenderer::render_selected`].
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Written file paths in render order. May contain duplicates when file
    /// names collide.
    pub rendered: Vec<PathBuf>,
    pub warnings: Vec<BatchWarning>,
    pub status: BatchStatus,
}

impl BatchReport {
    #[must_use]
    pub fn images_rendered(&self) -> usize {
        self.rendered.len()
    }
}

/// Renders collection cameras through a [`RenderPrimitive`].
///
/// The renderer holds no scene state of its own; callers must not run two
/// operations against the same scene and context at once.
pub struct BatchRenderer<P: RenderPrimitive> {
    primitive: P,
}

impl<P: RenderPrimitive> BatchRenderer<P> {
    pub fn new(primitive: P) -> Self {
        Self { primitive }
    }

    #[must_use]
    pub fn primitive(&self) -> &P {
        &self.primitive
    }

    pub fn primitive_mut(&mut self) -> &mut P {
        &mut self.primitive
    }

    #[must_use]
    pub fn into_primitive(self) -> P {
        self.primitive
    }

    /// Renders every camera of every selected subcollection of
    /// `scene.main_collection`.
    pub fn render_selected(
        &mut self,
        scene: &mut Scene,
        ctx: &mut RenderContext,
    ) -> Result<BatchReport> {
        let Some(main_collection) = scene.main_collection else {
            log::warn!("No main collection selected!");
            return Err(SubrenderError::NoMainCollection);
        };

        let output_folder = prepare_output_folder(ctx)?;

        let selected = scene.selected_subcollections(main_collection);
        if selected.is_empty() {
            log::warn!("No subcollections selected!");
            return Err(SubrenderError::NoSelection);
        }

        let mut report = BatchReport::default();
        let mut ctx = ContextScope::new(ctx);

        for collection in selected {
            let name = scene
                .collection_name(collection)
                .unwrap_or_default()
                .to_string();

            let visible = match scene.view_node_for(collection) {
                Some(view) => VisibilityScope::force_visible(scene, view),
                None => None,
            };
            let Some(visible) = visible else {
                let warning = BatchWarning::ViewNodeMissing { collection, name };
                log::warn!("{warning}");
                report.warnings.push(warning);
                continue;
            };

            let cameras = visible.cameras_in(collection);
            if cameras.is_empty() {
                let warning = BatchWarning::NoCameraInNode { collection, name };
                log::info!("{warning}");
                report.warnings.push(warning);
                continue;
            }

            for camera in cameras {
                let path = self.render_camera(&visible, &mut ctx, camera, &output_folder)?;
                report.rendered.push(path);
            }
        }

        log::info!(
            "All renders finished ({} images, {} warnings)",
            report.images_rendered(),
            report.warnings.len()
        );
        Ok(report)
    }

    /// Renders `ctx.active_camera` once, without touching any visibility.
    ///
    /// Returns the written file path.
    pub fn render_active_camera(
        &mut self,
        scene: &Scene,
        ctx: &mut RenderContext,
    ) -> Result<PathBuf> {
        let Some(camera) = ctx.active_camera else {
            log::warn!("No active camera set!");
            return Err(SubrenderError::NoActiveCamera);
        };
        if scene.get_object(camera).is_none() {
            return Err(SubrenderError::InvalidHandle(format!(
                "active camera {camera:?} is not in the scene"
            )));
        }

        let output_folder = prepare_output_folder(ctx)?;

        let mut ctx = ContextScope::new(ctx);
        self.render_camera(scene, &mut ctx, camera, &output_folder)
    }

    /// Points the context at `camera` and its output file, then renders.
    /// The caller's [`ContextScope`] restores both afterwards.
    fn render_camera(
        &mut self,
        scene: &Scene,
        ctx: &mut RenderContext,
        camera: ObjectKey,
        output_folder: &Path,
    ) -> Result<PathBuf> {
        let camera_name = scene
            .get_object(camera)
            .map(|object| object.name.as_str())
            .unwrap_or_default();
        let filepath = output_file_path(output_folder, &ctx.naming, camera_name);

        ctx.active_camera = Some(camera);
        ctx.settings.output_path = filepath.to_string_lossy().into_owned();

        self.primitive.render_still(scene, ctx, &filepath)?;

        log::info!("Rendered: {}", filepath.display());
        Ok(filepath)
    }
}

fn prepare_output_folder(ctx: &RenderContext) -> Result<PathBuf> {
    let folder = resolve_output_dir(&ctx.settings.output_path, ctx.project_dir.as_deref())?;
    ensure_output_dir(&folder)?;
    Ok(folder)
}
