//! Collection tree traversal.

use slotmap::SlotMap;
use subrender_core::CollectionKey;

use crate::collection::Collection;

/// Collects every descendant of `root` in depth-first pre-order.
///
/// `root` itself is not part of the result. A root without children (or a
/// stale root handle) yields an empty list. The hierarchy is assumed to be
/// acyclic; [`Scene::link_collection`](crate::Scene::link_collection) refuses
/// links that would break that.
///
/// Uses an explicit stack so deep hierarchies cannot overflow the call stack.
#[must_use]
pub fn flatten_descendants(
    collections: &SlotMap<CollectionKey, Collection>,
    root: CollectionKey,
) -> Vec<CollectionKey> {
    let mut result = Vec::new();
    let Some(root) = collections.get(root) else {
        return result;
    };

    // Reverse push so the first child is visited first.
    let mut stack: Vec<CollectionKey> = root.children.iter().rev().copied().collect();
    while let Some(key) = stack.pop() {
        result.push(key);
        if let Some(collection) = collections.get(key) {
            stack.extend(collection.children.iter().rev().copied());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(
        arena: &mut SlotMap<CollectionKey, Collection>,
        parent: CollectionKey,
        name: &str,
    ) -> CollectionKey {
        let mut child = Collection::new(name);
        child.parent = Some(parent);
        let key = arena.insert(child);
        arena[parent].children.push(key);
        key
    }

    #[test]
    fn test_pre_order_excludes_root() {
        let mut arena = SlotMap::with_key();
        let root = arena.insert(Collection::new("root"));
        let a = link(&mut arena, root, "a");
        let a1 = link(&mut arena, a, "a1");
        let a2 = link(&mut arena, a, "a2");
        let a1x = link(&mut arena, a1, "a1x");
        let b = link(&mut arena, root, "b");

        let order = flatten_descendants(&arena, root);
        assert_eq!(order, vec![a, a1, a1x, a2, b]);
        assert!(!order.contains(&root));
    }

    #[test]
    fn test_leaf_and_stale_root_are_empty() {
        let mut arena = SlotMap::with_key();
        let root = arena.insert(Collection::new("root"));
        assert!(flatten_descendants(&arena, root).is_empty());

        arena.remove(root);
        assert!(flatten_descendants(&arena, root).is_empty());
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let mut arena = SlotMap::with_key();
        let root = arena.insert(Collection::new("root"));
        let mut tip = root;
        for i in 0..50_000 {
            tip = link(&mut arena, tip, &format!("c{i}"));
        }
        assert_eq!(flatten_descendants(&arena, root).len(), 50_000);
    }
}
