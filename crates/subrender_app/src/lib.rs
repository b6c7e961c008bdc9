//! Front end for Subrender.
//!
//! - [`manifest`]: JSON scene descriptions turned into a [`Scene`](subrender_scene::Scene)
//!   and a [`RenderContext`](subrender_render::RenderContext)
//! - [`cli`]: argument parsing and the `subrender` command driver

pub mod cli;
pub mod manifest;

pub use cli::{CliArgs, Command, run};
pub use manifest::{CollectionManifest, ObjectManifest, SceneManifest};
