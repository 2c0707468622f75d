//! Single-selection state consumed by the add/remove operations.

use super::model::TreeModel;
use super::node::{CollectionId, NodeId};

/// Selection state machine: `NoSelection` or `Selected(node)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    NoSelection,
    Selected(NodeId),
}

impl SelectionState {
    pub fn node(&self) -> Option<NodeId> {
        match self {
            SelectionState::NoSelection => None,
            SelectionState::Selected(node) => Some(*node),
        }
    }
}

/// Boundary to whatever component tracks the user's current pick.
///
/// A UI toolkit can implement this over its own selection model; the
/// terminal front end uses [`SingleSelection`].
pub trait SelectionProvider {
    fn currently_selected(&self) -> Option<NodeId>;

    /// Moves to `Selected(node)` from any state.
    fn select(&mut self, node: NodeId);

    /// Moves to `NoSelection` from any state.
    fn clear_selection(&mut self);

    /// Position of the selected node inside `collection`, if it lives there.
    fn selected_index_within<P>(&self, model: &TreeModel<P>, collection: CollectionId) -> Option<usize>
    where
        Self: Sized,
    {
        self.currently_selected()
            .and_then(|node| model.position_of(collection, node))
    }
}

#[derive(Debug, Clone, Default)]
pub struct SingleSelection {
    state: SelectionState,
}

impl SingleSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }
}

impl SelectionProvider for SingleSelection {
    fn currently_selected(&self) -> Option<NodeId> {
        self.state.node()
    }

    fn select(&mut self, node: NodeId) {
        self.state = SelectionState::Selected(node);
    }

    fn clear_selection(&mut self) {
        self.state = SelectionState::NoSelection;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Node;

    #[test]
    fn given_selection_when_cleared_then_no_selection() {
        let mut model = TreeModel::new();
        let a = model.append_to_root(Node::new("a"));
        let mut selection = SingleSelection::new();

        selection.select(a);
        assert_eq!(selection.state(), SelectionState::Selected(a));

        selection.clear_selection();
        assert_eq!(selection.state(), SelectionState::NoSelection);
        assert_eq!(selection.currently_selected(), None);
    }

    #[test]
    fn given_selected_child_when_index_requested_then_found_only_in_parent() {
        let mut model = TreeModel::new();
        let a = model.append_to_root(Node::new("a"));
        let b = model.append_child(a, Node::new("b")).unwrap();
        let c = model.append_child(a, Node::new("c")).unwrap();
        let root = model.root_collection();
        let below_a = model.children_of(a).unwrap();
        let mut selection = SingleSelection::new();

        selection.select(c);

        assert_eq!(selection.selected_index_within(&model, below_a), Some(1));
        assert_eq!(selection.selected_index_within(&model, root), None);
        selection.select(b);
        assert_eq!(selection.selected_index_within(&model, below_a), Some(0));
    }
}
