//! Tests for the ProjectTree service: add / remove / unselect driven by selection

use rstest::{fixture, rstest};

use projtree::application::{ApplicationError, ProjectTree};
use projtree::domain::{Children, NodeId, RowNumbering, SelectionState};
use projtree::util::testing;

#[fixture]
fn tree() -> ProjectTree<RowNumbering> {
    testing::init_test_setup();
    ProjectTree::new(RowNumbering::default())
}

fn label(tree: &ProjectTree<RowNumbering>, node: NodeId) -> String {
    tree.payload(node).map(|p| p.text.clone()).unwrap_or_default()
}

fn root_labels(tree: &mut ProjectTree<RowNumbering>) -> Vec<String> {
    let root = tree.resolve_children_of(None).unwrap();
    let items = tree.model().items(root).unwrap().to_vec();
    items.iter().map(|&n| label(tree, n)).collect()
}

fn child_labels(tree: &mut ProjectTree<RowNumbering>, node: NodeId) -> Vec<String> {
    let children = tree.resolve_children_of(Some(node)).unwrap();
    let items = tree.model().items(children).unwrap().to_vec();
    items.iter().map(|&n| label(tree, n)).collect()
}

#[rstest]
fn given_documented_scenario_when_played_then_matches_expected_collections(
    mut tree: ProjectTree<RowNumbering>,
) {
    // start empty -> AddRow(None)
    let row0 = tree.add_row().unwrap();
    assert_eq!(root_labels(&mut tree), vec!["Row 0"]);

    // select Row0 -> AddRow(Row0)
    tree.select(row0).unwrap();
    let row1 = tree.add_row().unwrap();
    assert_eq!(child_labels(&mut tree, row0), vec!["Row 1"]);
    assert_eq!(root_labels(&mut tree), vec!["Row 0"]);

    // select Row1 -> RemoveRow(Row1)
    tree.select(row1).unwrap();
    tree.remove_row().unwrap();
    assert!(child_labels(&mut tree, row0).is_empty());
    assert_eq!(root_labels(&mut tree), vec!["Row 0"]);
}

#[rstest]
fn given_no_selection_when_adding_then_rows_go_to_root_without_children(
    mut tree: ProjectTree<RowNumbering>,
) {
    // Act
    let ids: Vec<NodeId> = (0..3).map(|_| tree.add_row().unwrap()).collect();

    // Assert
    assert_eq!(root_labels(&mut tree), vec!["Row 0", "Row 1", "Row 2"]);
    for id in ids {
        assert_eq!(tree.model().node(id).unwrap().children(), Children::Absent);
    }
}

#[rstest]
fn given_selection_when_adding_twice_then_children_in_call_order(mut tree: ProjectTree<RowNumbering>) {
    // Arrange
    let parent = tree.add_row().unwrap();
    tree.select(parent).unwrap();

    // Act
    tree.add_row().unwrap();
    tree.add_row().unwrap();

    // Assert
    assert_eq!(child_labels(&mut tree, parent), vec!["Row 1", "Row 2"]);
    assert_eq!(tree.selected(), Some(parent));
}

#[rstest]
fn given_selection_when_unselected_then_next_add_targets_root(mut tree: ProjectTree<RowNumbering>) {
    // Arrange
    let parent = tree.add_row().unwrap();
    tree.select(parent).unwrap();
    tree.add_row().unwrap();

    // Act
    tree.unselect();
    tree.add_row().unwrap();

    // Assert
    assert_eq!(tree.selection().state(), SelectionState::NoSelection);
    assert_eq!(root_labels(&mut tree), vec!["Row 0", "Row 2"]);
    assert_eq!(child_labels(&mut tree, parent), vec!["Row 1"]);
}

#[rstest]
fn given_no_selection_when_removing_then_invalid_operation_and_tree_unchanged(
    mut tree: ProjectTree<RowNumbering>,
) {
    // Arrange
    let parent = tree.add_row().unwrap();
    tree.select(parent).unwrap();
    tree.add_row().unwrap();
    tree.unselect();
    let nodes_before = tree.model().node_count();
    let collections_before = tree.model().collection_count();

    // Act
    let result = tree.remove_row();

    // Assert
    let err = result.unwrap_err();
    assert!(err.is_invalid_operation(), "unexpected error: {}", err);
    assert_eq!(tree.model().node_count(), nodes_before);
    assert_eq!(tree.model().collection_count(), collections_before);
    assert_eq!(root_labels(&mut tree), vec!["Row 0"]);
    assert_eq!(child_labels(&mut tree, parent), vec!["Row 1"]);
}

#[rstest]
fn given_selected_parent_when_removing_then_subtree_destroyed_and_selection_cleared(
    mut tree: ProjectTree<RowNumbering>,
) {
    // Arrange: Row 0 -> Row 1 -> Row 2, plus sibling Row 3
    let a = tree.add_row().unwrap();
    tree.select(a).unwrap();
    let b = tree.add_row().unwrap();
    tree.select(b).unwrap();
    let c = tree.add_row().unwrap();
    tree.unselect();
    tree.add_row().unwrap();

    // Act
    tree.select(a).unwrap();
    let destroyed = tree.remove_row().unwrap();

    // Assert
    assert_eq!(destroyed, 3);
    assert_eq!(tree.selected(), None);
    assert!(!tree.model().contains(b));
    assert!(!tree.model().contains(c));
    assert_eq!(root_labels(&mut tree), vec!["Row 3"]);
}

#[rstest]
fn given_removed_node_when_selecting_then_rejected(mut tree: ProjectTree<RowNumbering>) {
    // Arrange
    let a = tree.add_row().unwrap();
    tree.select(a).unwrap();
    tree.remove_row().unwrap();

    // Act
    let result = tree.select(a);

    // Assert
    assert!(matches!(result, Err(ApplicationError::Domain(_))));
    assert_eq!(tree.selected(), None);
}

#[rstest]
fn given_custom_numbering_when_adding_then_labels_follow_injected_counter() {
    // Arrange
    let mut tree = ProjectTree::new(RowNumbering::new("Item", 5));

    // Act
    let first = tree.add_row().unwrap();
    let second = tree.add_row().unwrap();

    // Assert
    assert_eq!(label(&tree, first), "Item 5");
    assert_eq!(label(&tree, second), "Item 6");
}
