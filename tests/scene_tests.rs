//! Scene Integration Tests
//!
//! Tests for:
//! - Collection creation, linking and unlinking
//! - View layer mirroring and view node lookup
//! - Subcollection flattening and render selection
//! - Objects and camera filtering

use std::collections::HashSet;

use subrender::{CollectionKey, ObjectKind, Scene, SubrenderError};

/// Master
/// └── Main
///     ├── A
///     │   ├── A1
///     │   └── A2
///     └── B
///         └── B1
struct Fixture {
    scene: Scene,
    main: CollectionKey,
    a: CollectionKey,
    a1: CollectionKey,
    a2: CollectionKey,
    b: CollectionKey,
    b1: CollectionKey,
}

fn fixture() -> Fixture {
    let mut scene = Scene::new();
    let master = scene.master_collection();
    let main = scene.add_collection("Main", master).unwrap();
    let a = scene.add_collection("A", main).unwrap();
    let a1 = scene.add_collection("A1", a).unwrap();
    let a2 = scene.add_collection("A2", a).unwrap();
    let b = scene.add_collection("B", main).unwrap();
    let b1 = scene.add_collection("B1", b).unwrap();
    Fixture {
        scene,
        main,
        a,
        a1,
        a2,
        b,
        b1,
    }
}

// ============================================================================
// Collections & Hierarchy
// ============================================================================

#[test]
fn new_collections_are_not_selected() {
    let f = fixture();
    for (_, collection) in f.scene.collections() {
        assert!(!collection.render_selected);
    }
}

#[test]
fn add_collection_sets_parent_and_child() {
    let f = fixture();
    let a = f.scene.get_collection(f.a).unwrap();
    assert_eq!(a.parent(), Some(f.main));
    assert_eq!(a.children(), &[f.a1, f.a2]);
}

#[test]
fn add_collection_to_unknown_parent_fails() {
    let mut other = Scene::new();
    other.create_collection("Padding");
    let foreign = other.create_collection("Foreign");

    let mut scene = Scene::new();
    let result = scene.add_collection("X", foreign);
    assert!(matches!(result, Err(SubrenderError::InvalidHandle(_))));
    assert_eq!(scene.collections().count(), 1);
}

#[test]
fn link_collection_moves_between_parents() {
    let mut f = fixture();
    f.scene.link_collection(f.a1, f.b).unwrap();

    assert!(!f.scene.get_collection(f.a).unwrap().children().contains(&f.a1));
    assert_eq!(f.scene.get_collection(f.b).unwrap().children(), &[f.b1, f.a1]);
    assert_eq!(f.scene.get_collection(f.a1).unwrap().parent(), Some(f.b));

    // The view layer follows the move.
    let view = f.scene.view_node_for(f.a1).unwrap();
    let parent_view = f.scene.view_layer().get(view).unwrap().parent().unwrap();
    assert_eq!(
        f.scene.view_layer().get(parent_view).unwrap().collection(),
        f.b
    );
}

#[test]
fn link_collection_rejects_cycles() {
    let mut f = fixture();
    assert!(matches!(
        f.scene.link_collection(f.a, f.a1),
        Err(SubrenderError::HierarchyCycle(_))
    ));
    assert!(matches!(
        f.scene.link_collection(f.a, f.a),
        Err(SubrenderError::HierarchyCycle(_))
    ));
    let master = f.scene.master_collection();
    assert!(matches!(
        f.scene.link_collection(master, f.a),
        Err(SubrenderError::HierarchyCycle(_))
    ));
    // Hierarchy untouched.
    assert_eq!(f.scene.get_collection(f.a).unwrap().parent(), Some(f.main));
}

#[test]
fn unlink_collection_drops_view_subtree() {
    let mut f = fixture();
    let before = f.scene.view_layer().len();

    f.scene.unlink_collection(f.a).unwrap();

    assert_eq!(f.scene.get_collection(f.a).unwrap().parent(), None);
    assert!(f.scene.view_node_for(f.a).is_none());
    assert!(f.scene.view_node_for(f.a1).is_none());
    assert!(f.scene.view_node_for(f.a2).is_none());
    assert_eq!(f.scene.view_layer().len(), before - 3);
    // Data subtree survives.
    assert_eq!(f.scene.get_collection(f.a).unwrap().children(), &[f.a1, f.a2]);
}

#[test]
fn find_collection_by_name() {
    let f = fixture();
    assert_eq!(f.scene.find_collection_by_name("B1"), Some(f.b1));
    assert_eq!(f.scene.find_collection_by_name("Nope"), None);
}

// ============================================================================
// Traversal
// ============================================================================

#[test]
fn subcollections_are_depth_first_pre_order() {
    let f = fixture();
    assert_eq!(
        f.scene.subcollections(f.main),
        vec![f.a, f.a1, f.a2, f.b, f.b1]
    );
}

#[test]
fn subcollections_visit_each_descendant_once_and_never_root() {
    let f = fixture();
    for (root, _) in f.scene.collections() {
        let order = f.scene.subcollections(root);
        let unique: HashSet<_> = order.iter().copied().collect();
        assert_eq!(unique.len(), order.len(), "no duplicates");
        assert!(!order.contains(&root));

        // Every collection whose ancestor chain contains `root` is listed.
        for (other, _) in f.scene.collections() {
            assert_eq!(
                f.scene.is_ancestor(root, other),
                unique.contains(&other),
                "descendant membership mismatch"
            );
        }
    }
}

#[test]
fn leaf_has_no_subcollections() {
    let f = fixture();
    assert!(f.scene.subcollections(f.a1).is_empty());
}

#[test]
fn selected_subcollections_keep_traversal_order() {
    let mut f = fixture();
    f.scene.set_render_selected(f.b1, true).unwrap();
    f.scene.set_render_selected(f.a, true).unwrap();

    assert_eq!(f.scene.selected_subcollections(f.main), vec![f.a, f.b1]);
}

// ============================================================================
// View Layer
// ============================================================================

#[test]
fn view_layer_mirrors_linked_collections() {
    let f = fixture();
    // master + six linked collections
    assert_eq!(f.scene.view_layer().len(), 7);

    for key in [f.main, f.a, f.a1, f.a2, f.b, f.b1] {
        let view = f.scene.view_node_for(key).expect("linked collection has a view node");
        assert_eq!(f.scene.view_layer().get(view).unwrap().collection(), key);
    }
}

#[test]
fn view_node_lookup_is_by_identity_not_name() {
    let mut scene = Scene::new();
    let master = scene.master_collection();
    let linked = scene.add_collection("Twin", master).unwrap();
    let orphan = scene.create_collection("Twin");

    let view = scene.view_node_for(linked).unwrap();
    assert_eq!(scene.view_layer().get(view).unwrap().collection(), linked);
    assert!(scene.view_node_for(orphan).is_none());
}

#[test]
fn orphan_subtree_has_no_view_nodes() {
    let mut scene = Scene::new();
    let orphan = scene.create_collection("Orphan");
    let child = scene.add_collection("Child", orphan).unwrap();

    assert!(scene.view_node_for(orphan).is_none());
    assert!(scene.view_node_for(child).is_none());

    // Linking the orphan mirrors the whole subtree.
    scene.link_collection(orphan, scene.master_collection()).unwrap();
    assert!(scene.view_node_for(orphan).is_some());
    assert!(scene.view_node_for(child).is_some());
}

#[test]
fn find_from_subtree_and_stale_start() {
    let mut f = fixture();
    let a_view = f.scene.view_node_for(f.a).unwrap();
    let layer = f.scene.view_layer();

    assert!(layer.find_from(a_view, f.a2).is_some());
    assert!(layer.find_from(a_view, f.b1).is_none());

    f.scene.unlink_collection(f.a).unwrap();
    assert!(f.scene.view_layer().find_from(a_view, f.a1).is_none());
}

#[test]
fn set_exclude_round_trips() {
    let mut f = fixture();
    assert_eq!(f.scene.view_layer().is_excluded(f.b), Some(false));
    f.scene.view_layer_mut().set_exclude(f.b, true).unwrap();
    assert_eq!(f.scene.view_layer().is_excluded(f.b), Some(true));

    let orphan = f.scene.create_collection("Orphan");
    assert_eq!(f.scene.view_layer().is_excluded(orphan), None);
    assert!(f.scene.view_layer_mut().set_exclude(orphan, true).is_err());
}

// ============================================================================
// Objects
// ============================================================================

#[test]
fn cameras_in_filters_kind_and_keeps_order() {
    let mut f = fixture();
    let c2 = f.scene.add_object(f.a, "Cam2", ObjectKind::Camera).unwrap();
    f.scene.add_object(f.a, "Cube", ObjectKind::Mesh).unwrap();
    let c1 = f.scene.add_object(f.a, "Cam1", ObjectKind::Camera).unwrap();
    f.scene.add_object(f.a, "Sun", ObjectKind::Light).unwrap();

    assert_eq!(f.scene.cameras_in(f.a), vec![c2, c1]);
    assert!(f.scene.cameras_in(f.b).is_empty());
}

#[test]
fn cameras_in_does_not_include_child_collections() {
    let mut f = fixture();
    f.scene.add_object(f.a1, "Deep", ObjectKind::Camera).unwrap();
    assert!(f.scene.cameras_in(f.a).is_empty());
}

#[test]
fn link_object_shares_one_object() {
    let mut f = fixture();
    let cam = f.scene.add_object(f.a, "Shared", ObjectKind::Camera).unwrap();
    f.scene.link_object(f.b, cam).unwrap();
    f.scene.link_object(f.b, cam).unwrap();

    assert_eq!(f.scene.cameras_in(f.b), vec![cam]);
    assert_eq!(f.scene.find_object_by_name("Shared"), Some(cam));
}
