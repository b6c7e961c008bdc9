//! Arena handles.
//!
//! The collection tree, the view layer and the object pool each live in their
//! own [`slotmap::SlotMap`]. Cross references between them (a view node pointing
//! at the collection it mirrors, a collection listing its objects) are stored as
//! these keys rather than as pointers, so neither tree owns the other.

use slotmap::new_key_type;

new_key_type! {
    /// A collection in the scene's data hierarchy.
    pub struct CollectionKey;
    /// A per-view visibility node mirroring one collection.
    pub struct ViewNodeKey;
    /// An object (camera, mesh, light, ...) linked into collections.
    pub struct ObjectKey;
}
