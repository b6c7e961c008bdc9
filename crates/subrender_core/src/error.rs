//! Error Types
//!
//! [`SubrenderError`] covers every way a Subrender operation can stop:
//! - user-input preconditions (no main collection, nothing selected, no camera)
//! - filesystem failures while preparing the output directory
//! - failures reported by the render primitive
//! - misuse of the scene-building API and malformed manifests
//!
//! Soft, per-collection problems during a batch are *not* errors; they are
//! collected as warnings in the batch report and the batch carries on.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for Subrender.
#[derive(Error, Debug)]
pub enum SubrenderError {
    // ========================================================================
    // Preconditions
    // ========================================================================
    /// The scene has no main collection to search for subcollections.
    #[error("No main collection selected")]
    NoMainCollection,

    /// None of the main collection's descendants is flagged for rendering.
    #[error("No subcollections selected")]
    NoSelection,

    /// The render context has no active camera.
    #[error("No active camera set")]
    NoActiveCamera,

    // ========================================================================
    // Output & Rendering
    // ========================================================================
    /// The output directory could not be resolved or created.
    #[error("Cannot prepare output directory {}: {source}", path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The render primitive failed to produce an image.
    #[error("Render to {} failed: {reason}", path.display())]
    RenderFailed { path: PathBuf, reason: String },

    /// Image encoding error.
    #[error("Image encode error: {0}")]
    ImageEncode(String),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ========================================================================
    // Scene Construction & Configuration
    // ========================================================================
    /// A handle does not refer to a live collection, view node or object.
    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    /// Linking would make a collection its own ancestor.
    #[error("Collection hierarchy cycle: {0}")]
    HierarchyCycle(String),

    /// The scene manifest is malformed or refers to unknown names.
    #[error("Manifest error: {0}")]
    Manifest(String),
}

/// Alias for `Result<T, SubrenderError>`.
pub type Result<T> = std::result::Result<T, SubrenderError>;
