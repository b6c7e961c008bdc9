use slotmap::SlotMap;
use subrender_core::{CollectionKey, ObjectKey, Result, SubrenderError, ViewNodeKey};

use crate::collection::Collection;
use crate::object::{ObjectKind, SceneObject};
use crate::traversal::flatten_descendants;
use crate::view_layer::ViewLayer;

pub const MASTER_COLLECTION_NAME: &str = "Scene Collection";
pub const DEFAULT_VIEW_LAYER_NAME: &str = "ViewLayer";

/// Scene container.
///
/// Owns three arenas: the collection tree, the object pool and the view layer
/// that mirrors every collection reachable from the master collection. The
/// scene is the only place that links or unlinks collections, so the view layer
/// never drifts out of shape with the data tree.
#[derive(Debug, Clone)]
pub struct Scene {
    collections: SlotMap<CollectionKey, Collection>,
    objects: SlotMap<ObjectKey, SceneObject>,
    view_layer: ViewLayer,
    master_collection: CollectionKey,

    /// The collection whose subcollections are offered for batch rendering.
    pub main_collection: Option<CollectionKey>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        let mut collections = SlotMap::with_key();
        let master_collection = collections.insert(Collection::new(MASTER_COLLECTION_NAME));
        Self {
            collections,
            objects: SlotMap::with_key(),
            view_layer: ViewLayer::new(DEFAULT_VIEW_LAYER_NAME, master_collection),
            master_collection,
            main_collection: None,
        }
    }

    /// The implicit top-level collection every linked collection hangs under.
    #[inline]
    #[must_use]
    pub fn master_collection(&self) -> CollectionKey {
        self.master_collection
    }

    #[inline]
    #[must_use]
    pub fn view_layer(&self) -> &ViewLayer {
        &self.view_layer
    }

    #[inline]
    pub fn view_layer_mut(&mut self) -> &mut ViewLayer {
        &mut self.view_layer
    }

    // ========================================================================
    // Collections
    // ========================================================================

    /// Creates a collection that is not linked anywhere (and so has no view node).
    pub fn create_collection(&mut self, name: impl Into<String>) -> CollectionKey {
        self.collections.insert(Collection::new(name))
    }

    /// Creates a collection and links it under `parent`.
    pub fn add_collection(
        &mut self,
        name: impl Into<String>,
        parent: CollectionKey,
    ) -> Result<CollectionKey> {
        self.collection_checked(parent)?;
        let key = self.create_collection(name);
        self.link_collection(key, parent)?;
        Ok(key)
    }

    /// Links `child` (with its subtree) under `parent`, detaching it from any
    /// previous parent first.
    ///
    /// If `parent` is visible in the view layer the subtree is mirrored there;
    /// otherwise the subtree simply has no view nodes.
    pub fn link_collection(&mut self, child: CollectionKey, parent: CollectionKey) -> Result<()> {
        self.collection_checked(child)?;
        self.collection_checked(parent)?;

        if child == self.master_collection {
            return Err(SubrenderError::HierarchyCycle(
                "the master collection cannot be linked under another collection".to_string(),
            ));
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(SubrenderError::HierarchyCycle(format!(
                "'{}' cannot be linked under its own descendant '{}'",
                self.collections[child].name, self.collections[parent].name
            )));
        }

        self.unlink_collection(child)?;

        self.collections[parent].children.push(child);
        self.collections[child].parent = Some(parent);

        if let Some(parent_view) = self.view_layer.find(parent) {
            self.view_layer.mirror(parent_view, child, &self.collections);
        }
        Ok(())
    }

    /// Detaches `child` from its parent. The collection (and its subtree) keeps
    /// existing but loses its view nodes.
    pub fn unlink_collection(&mut self, child: CollectionKey) -> Result<()> {
        let parent = self.collection_checked(child)?.parent;
        let Some(parent) = parent else {
            return Ok(());
        };

        if let Some(view) = self.view_layer.find(child) {
            self.view_layer.remove_subtree(view);
        }
        if let Some(p) = self.collections.get_mut(parent)
            && let Some(pos) = p.children.iter().position(|&x| x == child)
        {
            p.children.remove(pos);
        }
        self.collections[child].parent = None;
        Ok(())
    }

    #[must_use]
    pub fn get_collection(&self, key: CollectionKey) -> Option<&Collection> {
        self.collections.get(key)
    }

    pub fn get_collection_mut(&mut self, key: CollectionKey) -> Option<&mut Collection> {
        self.collections.get_mut(key)
    }

    #[must_use]
    pub fn collection_name(&self, key: CollectionKey) -> Option<&str> {
        self.collections.get(key).map(|c| c.name.as_str())
    }

    #[must_use]
    pub fn find_collection_by_name(&self, name: &str) -> Option<CollectionKey> {
        self.collections
            .iter()
            .find_map(|(key, c)| (c.name == name).then_some(key))
    }

    pub fn collections(&self) -> impl Iterator<Item = (CollectionKey, &Collection)> {
        self.collections.iter()
    }

    /// Whether `ancestor` appears on the parent chain of `key`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: CollectionKey, key: CollectionKey) -> bool {
        let mut current = self.collections.get(key).and_then(|c| c.parent);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.collections.get(p).and_then(|c| c.parent);
        }
        false
    }

    fn collection_checked(&self, key: CollectionKey) -> Result<&Collection> {
        self.collections
            .get(key)
            .ok_or_else(|| SubrenderError::InvalidHandle(format!("collection {key:?}")))
    }

    // ========================================================================
    // Render selection
    // ========================================================================

    /// All descendants of `root` in depth-first pre-order, `root` excluded.
    #[must_use]
    pub fn subcollections(&self, root: CollectionKey) -> Vec<CollectionKey> {
        flatten_descendants(&self.collections, root)
    }

    /// Descendants of `root` flagged for rendering, in traversal order.
    #[must_use]
    pub fn selected_subcollections(&self, root: CollectionKey) -> Vec<CollectionKey> {
        self.subcollections(root)
            .into_iter()
            .filter(|&key| self.collections[key].render_selected)
            .collect()
    }

    pub fn set_render_selected(&mut self, key: CollectionKey, selected: bool) -> Result<()> {
        self.collections
            .get_mut(key)
            .ok_or_else(|| SubrenderError::InvalidHandle(format!("collection {key:?}")))?
            .render_selected = selected;
        Ok(())
    }

    // ========================================================================
    // Objects
    // ========================================================================

    /// Adds a new object to the pool and links it into `collection`.
    pub fn add_object(
        &mut self,
        collection: CollectionKey,
        name: impl Into<String>,
        kind: ObjectKind,
    ) -> Result<ObjectKey> {
        self.collection_checked(collection)?;
        let key = self.objects.insert(SceneObject::new(name, kind));
        self.collections[collection].objects.push(key);
        Ok(key)
    }

    /// Links an existing object into one more collection. Linking twice into
    /// the same collection is a no-op.
    pub fn link_object(&mut self, collection: CollectionKey, object: ObjectKey) -> Result<()> {
        if !self.objects.contains_key(object) {
            return Err(SubrenderError::InvalidHandle(format!("object {object:?}")));
        }
        let target = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| SubrenderError::InvalidHandle(format!("collection {collection:?}")))?;
        if !target.objects.contains(&object) {
            target.objects.push(object);
        }
        Ok(())
    }

    #[must_use]
    pub fn get_object(&self, key: ObjectKey) -> Option<&SceneObject> {
        self.objects.get(key)
    }

    #[must_use]
    pub fn find_object_by_name(&self, name: &str) -> Option<ObjectKey> {
        self.objects
            .iter()
            .find_map(|(key, o)| (o.name == name).then_some(key))
    }

    /// Camera objects linked directly into `collection`, in link order.
    #[must_use]
    pub fn cameras_in(&self, collection: CollectionKey) -> Vec<ObjectKey> {
        self.collections
            .get(collection)
            .map(|c| {
                c.objects
                    .iter()
                    .copied()
                    .filter(|&o| self.objects.get(o).is_some_and(SceneObject::is_camera))
                    .collect()
            })
            .unwrap_or_default()
    }

    // ========================================================================
    // View layer queries
    // ========================================================================

    /// The view node mirroring `collection`, searched from the view layer root.
    #[must_use]
    pub fn view_node_for(&self, collection: CollectionKey) -> Option<ViewNodeKey> {
        self.view_layer.find(collection)
    }
}
