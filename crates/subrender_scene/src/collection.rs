use subrender_core::{CollectionKey, ObjectKey};

/// A group in the scene's organizational hierarchy.
///
/// # Hierarchy
///
/// Collections form a tree through parent-child relationships:
/// - `parent`: handle of the owning collection (None for the scene's master
///   collection and for collections not linked anywhere yet)
/// - `children`: ordered child collection handles
///
/// Both sides are kept in sync by [`Scene::link_collection`](crate::Scene::link_collection).
#[derive(Debug, Clone)]
pub struct Collection {
    pub name: String,

    pub(crate) parent: Option<CollectionKey>,
    pub(crate) children: Vec<CollectionKey>,
    pub(crate) objects: Vec<ObjectKey>,

    /// Whether this collection is picked for batch rendering. Always starts false.
    pub render_selected: bool,
}

impl Collection {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            objects: Vec::new(),
            render_selected: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<CollectionKey> {
        self.parent
    }

    /// Child collections in link order.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[CollectionKey] {
        &self.children
    }

    /// Objects linked directly into this collection, in link order.
    #[inline]
    #[must_use]
    pub fn objects(&self) -> &[ObjectKey] {
        &self.objects
    }
}
