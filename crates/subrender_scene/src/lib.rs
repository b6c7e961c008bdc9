//! Scene data model
//!
//! - [`Collection`]: a group in the data hierarchy (child collections + objects)
//! - [`ViewLayer`] / [`ViewNode`]: the parallel per-view tree carrying `exclude`
//! - [`SceneObject`]: cameras and other objects linked into collections
//! - [`Scene`]: owns all three arenas and keeps the view layer in sync
//! - [`traversal`]: depth-first flattening of the collection tree

pub mod collection;
pub mod object;
pub mod scene;
pub mod traversal;
pub mod view_layer;

pub use collection::Collection;
pub use object::{ObjectKind, SceneObject};
pub use scene::Scene;
pub use traversal::flatten_descendants;
pub use view_layer::{ViewLayer, ViewNode};

pub use subrender_core::{CollectionKey, ObjectKey, ViewNodeKey};
