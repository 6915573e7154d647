//! Tests for unique ids, classes, status tags and the shared id index.

use std::thread;

use trellis_widget::{DISABLED, TaskKind, WidgetError, WidgetId, WidgetKind, WidgetTree};

fn attached(tree: &mut WidgetTree) -> WidgetId {
    let root = tree.root();
    let id = tree.create(WidgetKind::element("div"));
    tree.append(root, id).unwrap();
    id
}

// ========== ids ==========

#[test]
fn test_set_and_lookup_id() {
    let mut tree = WidgetTree::new(100.0, 100.0);
    let id = attached(&mut tree);
    tree.set_id(id, Some("main")).unwrap();

    assert_eq!(tree.get_by_id("main"), Some(id));
    assert_eq!(tree.widget(id).unwrap().name(), Some("main"));
    assert_eq!(tree.get_by_id("other"), None);
}

#[test]
fn test_rename_releases_old_id() {
    let mut tree = WidgetTree::new(100.0, 100.0);
    let id = attached(&mut tree);
    tree.set_id(id, Some("old")).unwrap();
    tree.set_id(id, Some("new")).unwrap();

    assert_eq!(tree.get_by_id("old"), None);
    assert_eq!(tree.get_by_id("new"), Some(id));

    tree.set_id(id, None).unwrap();
    assert!(tree.registry().is_empty());
    assert_eq!(tree.widget(id).unwrap().name(), None);
}

#[test]
fn test_duplicate_id_rejected() {
    let mut tree = WidgetTree::new(100.0, 100.0);
    let a = attached(&mut tree);
    let b = attached(&mut tree);
    tree.set_id(a, Some("main")).unwrap();

    let err = tree.set_id(b, Some("main")).unwrap_err();

    assert_eq!(err, WidgetError::DuplicateIdentity("main".to_string()));
    assert_eq!(err.to_string(), "identifier `main` is already registered");
    assert_eq!(tree.get_by_id("main"), Some(a));
    assert_eq!(tree.widget(b).unwrap().name(), None);
}

#[test]
fn test_same_widget_may_reclaim_its_id() {
    let mut tree = WidgetTree::new(100.0, 100.0);
    let id = attached(&mut tree);
    tree.set_id(id, Some("main")).unwrap();
    tree.set_id(id, Some("main")).unwrap();
    assert_eq!(tree.get_by_id("main"), Some(id));
    assert_eq!(tree.registry().len(), 1);
}

#[test]
fn test_destroyed_widget_releases_id() {
    let mut tree = WidgetTree::new(100.0, 100.0);
    let id = attached(&mut tree);
    tree.set_id(id, Some("main")).unwrap();

    tree.destroy(id).unwrap();
    // Deleted widgets are not found even before teardown.
    assert_eq!(tree.get_by_id("main"), None);

    let _ = tree.clear_trash();
    assert_eq!(tree.registry().lookup("main"), None);
}

#[test]
fn test_registry_lookup_from_another_thread() {
    let mut tree = WidgetTree::new(100.0, 100.0);
    let id = attached(&mut tree);
    tree.set_id(id, Some("main")).unwrap();
    let registry = tree.registry().clone();

    let found = thread::spawn(move || registry.lookup("main"))
        .join()
        .unwrap();

    assert_eq!(found, Some(id));
}

// ========== classes and status ==========

#[test]
fn test_classes_are_a_set() {
    let mut tree = WidgetTree::new(100.0, 100.0);
    let id = attached(&mut tree);
    assert!(tree.add_class(id, "b").unwrap());
    assert!(tree.add_class(id, "a").unwrap());
    assert!(!tree.add_class(id, "a").unwrap());

    let classes: Vec<&str> = tree.widget(id).unwrap().classes().collect();
    assert_eq!(classes, vec!["a", "b"]);

    assert!(tree.remove_class(id, "a").unwrap());
    assert!(!tree.remove_class(id, "a").unwrap());
    assert!(!tree.widget(id).unwrap().has_class("a"));
}

#[test]
fn test_class_change_refreshes_subtree_style() {
    let mut tree = WidgetTree::new(100.0, 100.0);
    let id = attached(&mut tree);
    let inner = tree.create(WidgetKind::element("span"));
    tree.append(id, inner).unwrap();
    tree.flush();

    let _ = tree.add_class(id, "active").unwrap();

    assert!(tree.pending_tasks(id).contains(TaskKind::RefreshStyle));
    assert!(tree.pending_tasks(inner).contains(TaskKind::RefreshStyle));
}

#[test]
fn test_status_and_disabled() {
    let mut tree = WidgetTree::new(100.0, 100.0);
    let id = attached(&mut tree);

    assert!(tree.add_status(id, "hover").unwrap());
    assert!(!tree.add_status(id, "hover").unwrap());
    tree.set_disabled(id, true).unwrap();

    let widget = tree.widget(id).unwrap();
    assert!(widget.is_disabled());
    assert!(widget.has_status(DISABLED));
    assert!(widget.has_status("hover"));

    tree.set_disabled(id, false).unwrap();
    assert!(tree.remove_status(id, "hover").unwrap());
    assert!(!tree.widget(id).unwrap().is_disabled());
}

#[test]
fn test_operations_on_stale_handles_fail() {
    let mut tree = WidgetTree::new(100.0, 100.0);
    let id = tree.create(WidgetKind::element("div"));
    tree.destroy(id).unwrap();

    assert_eq!(tree.set_id(id, Some("x")), Err(WidgetError::InvalidWidget(id)));
    assert_eq!(tree.add_class(id, "x"), Err(WidgetError::InvalidWidget(id)));
    assert_eq!(tree.set_disabled(id, true), Err(WidgetError::InvalidWidget(id)));
    assert_eq!(tree.set_title(id, "x"), Err(WidgetError::InvalidWidget(id)));
}

#[test]
fn test_title_requests_repaint() {
    let mut tree = WidgetTree::new(100.0, 100.0);
    let id = attached(&mut tree);
    tree.flush();

    tree.set_title(id, "Save").unwrap();

    assert_eq!(tree.widget(id).unwrap().title(), Some("Save"));
    assert!(tree.pending_tasks(id).contains(TaskKind::Title));
}
