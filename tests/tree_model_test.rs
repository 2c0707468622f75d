//! Tests for TreeModel: lazy collections, ordering, removal and notifications

use std::cell::RefCell;
use std::rc::Rc;

use rstest::{fixture, rstest};

use projtree::domain::{Children, DomainError, ItemsChanged, Node, NodeId, TreeModel};
use projtree::util::testing;

#[fixture]
fn model() -> TreeModel<String> {
    testing::init_test_setup();
    TreeModel::new()
}

fn row(label: &str) -> Node<String> {
    Node::new(label.to_string())
}

fn labels(model: &TreeModel<String>, nodes: &[NodeId]) -> Vec<String> {
    nodes
        .iter()
        .map(|&n| model.payload(n).cloned().unwrap_or_default())
        .collect()
}

#[rstest]
fn given_root_appends_when_listing_root_then_call_order_and_no_child_collections(
    mut model: TreeModel<String>,
) {
    // Arrange / Act
    let ids: Vec<NodeId> = (0..4)
        .map(|i| model.append_to_root(row(&format!("Row {}", i))))
        .collect();

    // Assert
    let root = model.resolve_children_of(None).unwrap();
    assert_eq!(model.items(root).unwrap(), ids.as_slice());
    for id in &ids {
        assert_eq!(model.node(*id).unwrap().children(), Children::Absent);
        assert_eq!(model.parent_collection(*id).unwrap(), root);
    }
    assert_eq!(model.collection_count(), 1);
}

#[rstest]
fn given_parent_when_appending_twice_then_children_keep_call_order(mut model: TreeModel<String>) {
    // Arrange
    let parent = model.append_to_root(row("parent"));

    // Act
    model.append_child(parent, row("first")).unwrap();
    model.append_child(parent, row("second")).unwrap();

    // Assert
    let children = model.children_of(parent).unwrap();
    assert_eq!(
        labels(&model, model.items(children).unwrap()),
        vec!["first", "second"]
    );
}

#[rstest]
fn given_node_when_resolving_twice_then_same_collection_and_shared_contents(
    mut model: TreeModel<String>,
) {
    // Arrange
    let node = model.append_to_root(row("a"));

    // Act
    let first = model.resolve_children_of(Some(node)).unwrap();
    let second = model.resolve_children_of(Some(node)).unwrap();
    model.append(first, row("via first")).unwrap();

    // Assert
    assert_eq!(first, second);
    assert_eq!(labels(&model, model.items(second).unwrap()), vec!["via first"]);
    assert_eq!(model.node(node).unwrap().children(), Children::Present(first));
}

#[rstest]
fn given_root_a_b_when_removing_a_then_b_unreachable(mut model: TreeModel<String>) {
    // Arrange: root -> A -> B
    let a = model.append_to_root(row("A"));
    let b = model.append_child(a, row("B")).unwrap();
    let below_a = model.children_of(a).unwrap();

    // Act
    let destroyed = model.remove(a).unwrap();

    // Assert
    assert_eq!(destroyed, 2);
    let root = model.resolve_children_of(None).unwrap();
    assert!(model.items(root).unwrap().is_empty());
    assert!(!model.contains(a));
    assert!(!model.contains(b));
    assert!(model.collection(below_a).is_none());
    assert!(model.is_empty());
}

#[rstest]
fn given_removed_node_when_using_stale_handle_then_invalid_operation(mut model: TreeModel<String>) {
    // Arrange
    let a = model.append_to_root(row("A"));
    model.remove(a).unwrap();

    // Act
    let appended = model.append_child(a, row("orphan"));
    let resolved = model.resolve_children_of(Some(a));
    let removed = model.remove(a);

    // Assert
    assert!(matches!(appended, Err(DomainError::InvalidOperation(_))));
    assert!(matches!(resolved, Err(DomainError::InvalidOperation(_))));
    assert!(matches!(removed, Err(DomainError::InvalidOperation(_))));
    assert_eq!(model.node_count(), 0);
}

#[rstest]
fn given_slot_reused_when_old_handle_used_then_not_confused_with_new_node(
    mut model: TreeModel<String>,
) {
    // Arrange: free a slot, then fill it again
    let old = model.append_to_root(row("old"));
    model.remove(old).unwrap();
    let new = model.append_to_root(row("new"));

    // Assert
    assert_ne!(old, new);
    assert!(model.payload(old).is_none());
    assert_eq!(model.payload(new).map(String::as_str), Some("new"));
}

#[rstest]
fn given_middle_sibling_removed_when_listing_then_others_keep_order(mut model: TreeModel<String>) {
    // Arrange
    let parent = model.append_to_root(row("p"));
    model.append_child(parent, row("x")).unwrap();
    let y = model.append_child(parent, row("y")).unwrap();
    model.append_child(parent, row("z")).unwrap();

    // Act
    model.remove(y).unwrap();

    // Assert
    assert_eq!(labels(&model, model.peek_children(parent)), vec!["x", "z"]);
}

#[rstest]
fn given_subscriber_when_appending_and_removing_then_items_changed_at_tail_and_position(
    mut model: TreeModel<String>,
) {
    // Arrange
    let root = model.root_collection();
    let events: Rc<RefCell<Vec<ItemsChanged>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    model
        .subscribe(root, move |change| sink.borrow_mut().push(*change))
        .unwrap();

    // Act
    model.append_to_root(row("a"));
    let b = model.append_to_root(row("b"));
    model.remove(b).unwrap();

    // Assert
    let events = events.borrow();
    assert_eq!(events.len(), 3);
    assert_eq!((events[0].position, events[0].added, events[0].removed), (0, 1, 0));
    assert_eq!((events[1].position, events[1].added, events[1].removed), (1, 1, 0));
    assert_eq!((events[2].position, events[2].added, events[2].removed), (1, 0, 1));
    assert!(events.iter().all(|e| e.collection == root));
}

#[rstest]
fn given_subscriber_on_child_collection_when_root_changes_then_not_notified(
    mut model: TreeModel<String>,
) {
    // Arrange
    let a = model.append_to_root(row("a"));
    let below_a = model.children_of(a).unwrap();
    let count = Rc::new(RefCell::new(0usize));
    let sink = Rc::clone(&count);
    model
        .subscribe(below_a, move |_| *sink.borrow_mut() += 1)
        .unwrap();

    // Act
    model.append_to_root(row("b"));
    model.append_child(a, row("a.1")).unwrap();

    // Assert
    assert_eq!(*count.borrow(), 1);
}
