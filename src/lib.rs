//! Subrender
//!
//! Renders the cameras found in selected subcollections of a scene, one still
//! image per camera, temporarily showing each collection while its cameras
//! render and restoring every piece of changed state afterwards.
//!
//! # Example
//!
//! ```rust,ignore
//! use subrender::{BatchRenderer, ObjectKind, PlaceholderRenderer, RenderContext, Scene};
//!
//! let mut scene = Scene::new();
//! let shots = scene.add_collection("Shots", scene.master_collection())?;
//! let kitchen = scene.add_collection("Kitchen", shots)?;
//! scene.add_object(kitchen, "CamKitchen", ObjectKind::Camera)?;
//! scene.set_render_selected(kitchen, true)?;
//! scene.main_collection = Some(shots);
//!
//! let mut ctx = RenderContext::default();
//! let report = BatchRenderer::new(PlaceholderRenderer::new())
//!     .render_selected(&mut scene, &mut ctx)?;
//! ```

pub use subrender_app as app;
pub use subrender_core as core;
pub use subrender_render as render;
pub use subrender_scene as scene;

pub use subrender_core::{CollectionKey, ObjectKey, Result, SubrenderError, ViewNodeKey};
pub use subrender_render::{
    BatchRenderer, BatchReport, BatchStatus, BatchWarning, FileNaming, PlaceholderRenderer,
    RenderContext, RenderPrimitive, RenderSettings,
};
pub use subrender_scene::{Collection, ObjectKind, Scene, SceneObject, ViewLayer, ViewNode};
