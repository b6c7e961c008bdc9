//! Foundational types shared by every Subrender crate.
//!
//! - [`handles`]: slotmap keys for collections, view nodes and scene objects
//! - [`error`]: [`SubrenderError`] and the crate-wide [`Result`] alias

pub mod error;
pub mod handles;

pub use error::{Result, SubrenderError};
pub use handles::{CollectionKey, ObjectKey, ViewNodeKey};
