//! Batch rendering of collection cameras.
//!
//! - [`RenderContext`]: the mutable render state (output path, active camera,
//!   file naming) passed explicitly to every operation
//! - [`output`]: output directory resolution and file naming
//! - [`scope`]: guards that restore visibility and context state on drop
//! - [`RenderPrimitive`]: the host's "render one still to a file" operation
//! - [`BatchRenderer`]: renders every camera of the selected subcollections

pub mod batch;
pub mod context;
pub mod output;
pub mod placeholder;
pub mod primitive;
pub mod scope;

pub use batch::{BatchRenderer, BatchReport, BatchStatus, BatchWarning};
pub use context::{
    ColorDepth, ColorMode, FileNaming, ImageSettings, MAX_RESOLUTION, MAX_RESOLUTION_PERCENTAGE,
    RenderContext, RenderSettings,
};
pub use placeholder::PlaceholderRenderer;
pub use primitive::RenderPrimitive;
