use std::path::Path;

use subrender_core::Result;
use subrender_scene::Scene;

use crate::context::RenderContext;

/// The host operation that renders the active camera to a still image.
///
/// Implementations render `ctx.active_camera` as seen through the scene's
/// current view layer and write exactly one image to `destination`, blocking
/// until done. Image format, resolution and compression come from
/// `ctx.settings`; the caller only picks the path.
///
/// Errors are not caught by the batch: the first failure ends the batch.
pub trait RenderPrimitive {
    fn render_still(&mut self, scene: &Scene, ctx: &RenderContext, destination: &Path)
    -> Result<()>;
}

impl<T: RenderPrimitive + ?Sized> RenderPrimitive for &mut T {
    fn render_still(
        &mut self,
        scene: &Scene,
        ctx: &RenderContext,
        destination: &Path,
    ) -> Result<()> {
        (**self).render_still(scene, ctx, destination)
    }
}

impl<T: RenderPrimitive + ?Sized> RenderPrimitive for Box<T> {
    fn render_still(
        &mut self,
        scene: &Scene,
        ctx: &RenderContext,
        destination: &Path,
    ) -> Result<()> {
        (**self).render_still(scene, ctx, destination)
    }
}
