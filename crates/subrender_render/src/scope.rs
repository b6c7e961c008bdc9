//! Scoped state changes.
//!
//! Both guards snapshot the state they are about to change and put it back in
//! `Drop`, so an early `?` return or a panic inside a batch cannot leave a
//! collection force-shown or the output path pointing at the last image.

use std::ops::{Deref, DerefMut};

use subrender_core::{ObjectKey, ViewNodeKey};
use subrender_scene::Scene;

use crate::context::RenderContext;

/// Keeps one view node visible (`exclude = false`) while alive.
///
/// Dereferences to the [`Scene`] so the scene can still be read, e.g. by the
/// render primitive, while the node is forced visible.
pub struct VisibilityScope<'a> {
    scene: &'a mut Scene,
    view: ViewNodeKey,
    original_exclude: bool,
}

impl<'a> VisibilityScope<'a> {
    /// Forces `view` visible. Returns `None` if the view node does not exist.
    pub fn force_visible(scene: &'a mut Scene, view: ViewNodeKey) -> Option<Self> {
        let node = scene.view_layer_mut().get_mut(view)?;
        let original_exclude = node.exclude;
        node.exclude = false;
        log::debug!("View node {view:?} forced visible (was exclude={original_exclude})");

        Some(Self {
            scene,
            view,
            original_exclude,
        })
    }

    /// The `exclude` value that will be restored.
    #[must_use]
    pub fn original_exclude(&self) -> bool {
        self.original_exclude
    }
}

impl Deref for VisibilityScope<'_> {
    type Target = Scene;

    fn deref(&self) -> &Self::Target {
        self.scene
    }
}

impl Drop for VisibilityScope<'_> {
    fn drop(&mut self) {
        if let Some(node) = self.scene.view_layer_mut().get_mut(self.view) {
            node.exclude = self.original_exclude;
        }
    }
}

/// Snapshot of the output path and active camera of a [`RenderContext`],
/// restored when the scope ends.
pub struct ContextScope<'a> {
    ctx: &'a mut RenderContext,
    output_path: String,
    active_camera: Option<ObjectKey>,
}

impl<'a> ContextScope<'a> {
    pub fn new(ctx: &'a mut RenderContext) -> Self {
        let output_path = ctx.settings.output_path.clone();
        let active_camera = ctx.active_camera;
        Self {
            ctx,
            output_path,
            active_camera,
        }
    }

    /// Output path as it was when the scope began.
    #[must_use]
    pub fn original_output_path(&self) -> &str {
        &self.output_path
    }
}

impl Deref for ContextScope<'_> {
    type Target = RenderContext;

    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl DerefMut for ContextScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx
    }
}

impl Drop for ContextScope<'_> {
    fn drop(&mut self) {
        self.ctx.settings.output_path = std::mem::take(&mut self.output_path);
        self.ctx.active_camera = self.active_camera;
        log::debug!("Render context restored (output path: {})", self.ctx.settings.output_path);
    }
}
