//! Project tree service
//!
//! The three row actions of the project tree: add relative to the current
//! selection, remove the selected row, clear the selection.

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    CollectionId, DomainError, Node, NodeId, PayloadSource, SelectionProvider, SingleSelection,
    TreeModel,
};

/// Tree model plus the selection driving its mutations.
///
/// `G` produces payloads for new rows; `S` is the selection provider, a
/// [`SingleSelection`] unless a UI layer brings its own.
#[derive(Debug)]
pub struct ProjectTree<G: PayloadSource, S = SingleSelection> {
    model: TreeModel<G::Payload>,
    selection: S,
    payloads: G,
}

impl<G: PayloadSource> ProjectTree<G, SingleSelection> {
    pub fn new(payloads: G) -> Self {
        Self::with_selection(payloads, SingleSelection::new())
    }
}

impl<G: PayloadSource, S: SelectionProvider> ProjectTree<G, S> {
    pub fn with_selection(payloads: G, selection: S) -> Self {
        Self {
            model: TreeModel::new(),
            selection,
            payloads,
        }
    }

    pub fn model(&self) -> &TreeModel<G::Payload> {
        &self.model
    }

    /// Mutable model access for materializers and change subscribers.
    pub fn model_mut(&mut self) -> &mut TreeModel<G::Payload> {
        &mut self.model
    }

    pub fn selection(&self) -> &S {
        &self.selection
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selection.currently_selected()
    }

    pub fn payload(&self, node: NodeId) -> Option<&G::Payload> {
        self.model.payload(node)
    }

    pub fn resolve_children_of(&mut self, node: Option<NodeId>) -> ApplicationResult<CollectionId> {
        Ok(self.model.resolve_children_of(node)?)
    }

    /// Picks `node` as the current selection.
    ///
    /// Stale handles are rejected so that add/remove never act on a node
    /// that has already been destroyed.
    #[instrument(level = "debug", skip(self))]
    pub fn select(&mut self, node: NodeId) -> ApplicationResult<()> {
        if !self.model.contains(node) {
            return Err(DomainError::InvalidOperation(format!("cannot select {}: no longer exists", node)).into());
        }
        self.selection.select(node);
        Ok(())
    }

    /// Adds a new row with a fresh payload.
    ///
    /// With nothing selected the row goes to the end of the root collection,
    /// otherwise to the end of the selected node's children.
    #[instrument(level = "debug", skip(self))]
    pub fn add_row(&mut self) -> ApplicationResult<NodeId> {
        let node = Node::new(self.payloads.next_payload());
        let id = match self.selection.currently_selected() {
            None => self.model.append_to_root(node),
            Some(selected) => self.model.append_child(selected, node)?,
        };
        debug!("add_row: {} under {:?}", id, self.selection.currently_selected());
        Ok(id)
    }

    /// Removes the selected row and its whole subtree.
    ///
    /// Nothing selected is an [`DomainError::InvalidOperation`]; the tree is
    /// left untouched in that case. On success the selection is cleared and
    /// the number of destroyed nodes returned.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_row(&mut self) -> ApplicationResult<usize> {
        let selected = self.selection.currently_selected().ok_or_else(|| {
            ApplicationError::from(DomainError::InvalidOperation(
                "remove requested with no row selected".to_string(),
            ))
        })?;
        let parent = self.model.parent_collection(selected)?;
        let position = self
            .selection
            .selected_index_within(&self.model, parent)
            .ok_or_else(|| {
                DomainError::InvalidOperation(format!("{} not found in {}", selected, parent))
            })?;

        let destroyed = self.model.remove_at(parent, position)?;
        self.selection.clear_selection();
        debug!("remove_row: {} at {} in {}, {} destroyed", selected, position, parent, destroyed);
        Ok(destroyed)
    }

    /// Clears the selection; the next `add_row` targets the root collection.
    pub fn unselect(&mut self) {
        self.selection.clear_selection();
    }
}
