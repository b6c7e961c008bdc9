//! View layer: the per-view visibility tree.
//!
//! Every collection linked under the scene's master collection has exactly one
//! [`ViewNode`] here, arranged in the same shape as the collection tree. A view
//! node refers back to its collection by [`CollectionKey`], never by name.
//! Collections that are not reachable from the master collection have no view
//! node at all.

use slotmap::SlotMap;
use subrender_core::{CollectionKey, Result, SubrenderError, ViewNodeKey};

use crate::collection::Collection;

/// Visibility control for one collection within a view layer.
#[derive(Debug, Clone)]
pub struct ViewNode {
    pub(crate) collection: CollectionKey,
    pub(crate) parent: Option<ViewNodeKey>,
    pub(crate) children: Vec<ViewNodeKey>,

    /// When true the collection is left out of the view (and out of renders).
    pub exclude: bool,
}

impl ViewNode {
    fn new(collection: CollectionKey, parent: Option<ViewNodeKey>) -> Self {
        Self {
            collection,
            parent,
            children: Vec::new(),
            exclude: false,
        }
    }

    /// The collection this node mirrors.
    #[inline]
    #[must_use]
    pub fn collection(&self) -> CollectionKey {
        self.collection
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<ViewNodeKey> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[ViewNodeKey] {
        &self.children
    }
}

/// The view tree rooted at the node for the scene's master collection.
#[derive(Debug, Clone)]
pub struct ViewLayer {
    pub name: String,
    nodes: SlotMap<ViewNodeKey, ViewNode>,
    root: ViewNodeKey,
}

impl ViewLayer {
    pub(crate) fn new(name: impl Into<String>, master: CollectionKey) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(ViewNode::new(master, None));
        Self {
            name: name.into(),
            nodes,
            root,
        }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> ViewNodeKey {
        self.root
    }

    #[must_use]
    pub fn get(&self, key: ViewNodeKey) -> Option<&ViewNode> {
        self.nodes.get(key)
    }

    pub fn get_mut(&mut self, key: ViewNodeKey) -> Option<&mut ViewNode> {
        self.nodes.get_mut(key)
    }

    /// Number of view nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Finds the view node mirroring `target`, searching from the layer root.
    #[must_use]
    pub fn find(&self, target: CollectionKey) -> Option<ViewNodeKey> {
        self.find_from(self.root, target)
    }

    /// Depth-first pre-order search below (and including) `start`.
    ///
    /// Stops at the first node whose collection is `target`. Returns `None`
    /// when `target` is not reachable or `start` is stale. Nothing is cached:
    /// the tree is walked on every call.
    #[must_use]
    pub fn find_from(&self, start: ViewNodeKey, target: CollectionKey) -> Option<ViewNodeKey> {
        let mut stack = vec![start];
        while let Some(key) = stack.pop() {
            let Some(node) = self.nodes.get(key) else {
                continue;
            };
            if node.collection == target {
                return Some(key);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    /// The `exclude` flag of the view node mirroring `collection`, if any.
    #[must_use]
    pub fn is_excluded(&self, collection: CollectionKey) -> Option<bool> {
        self.find(collection)
            .and_then(|key| self.nodes.get(key))
            .map(|node| node.exclude)
    }

    pub fn set_exclude(&mut self, collection: CollectionKey, exclude: bool) -> Result<()> {
        let key = self.find(collection).ok_or_else(|| {
            SubrenderError::InvalidHandle(format!(
                "collection {collection:?} is not part of view layer '{}'",
                self.name
            ))
        })?;
        self.nodes[key].exclude = exclude;
        Ok(())
    }

    /// Builds view nodes for `collection` and its whole subtree under `parent`.
    pub(crate) fn mirror(
        &mut self,
        parent: ViewNodeKey,
        collection: CollectionKey,
        collections: &SlotMap<CollectionKey, Collection>,
    ) -> ViewNodeKey {
        let key = self.nodes.insert(ViewNode::new(collection, Some(parent)));
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(key);
        }

        if let Some(data) = collections.get(collection) {
            for &child in &data.children {
                self.mirror(key, child, collections);
            }
        }
        key
    }

    /// Removes `key` and all of its descendants, detaching it from its parent.
    pub(crate) fn remove_subtree(&mut self, key: ViewNodeKey) {
        if key == self.root {
            log::warn!("Refusing to remove the root of view layer '{}'", self.name);
            return;
        }

        let parent = self.nodes.get(key).and_then(|n| n.parent);
        if let Some(p) = parent.and_then(|p| self.nodes.get_mut(p))
            && let Some(pos) = p.children.iter().position(|&x| x == key)
        {
            p.children.remove(pos);
        }

        let mut stack = vec![key];
        while let Some(k) = stack.pop() {
            if let Some(node) = self.nodes.remove(k) {
                stack.extend(node.children);
            }
        }
    }
}
