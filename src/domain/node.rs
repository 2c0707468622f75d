//! Tree nodes and the weak handles used to address them.

use std::fmt;

use generational_arena::Index;

/// Weak handle to a node stored in a [`TreeModel`](super::TreeModel).
///
/// Holding a `NodeId` never keeps the node alive. Once the node is removed the
/// handle goes stale and every lookup through it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) Index);

/// Weak handle to an ordered child collection.
///
/// Two handles compare equal iff they name the same collection instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectionId(pub(crate) Index);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "node#{}.{}", slot, generation)
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "collection#{}.{}", slot, generation)
    }
}

/// Materialization state of a node's child collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Children {
    /// No collection has been created yet (leaf that was never expanded or appended to)
    #[default]
    Absent,
    /// Collection exists; reused for the node's whole lifetime
    Present(CollectionId),
}

impl Children {
    pub fn collection(&self) -> Option<CollectionId> {
        match self {
            Children::Absent => None,
            Children::Present(id) => Some(*id),
        }
    }
}

/// A unit of tree data.
///
/// Constructed detached with [`Node::new`]; becomes part of a tree when moved
/// into the model via `append_child` or `append_to_root`.
#[derive(Debug)]
pub struct Node<P> {
    payload: P,
    /// Collection containing this node, None while detached
    parent: Option<CollectionId>,
    children: Children,
}

impl<P> Node<P> {
    pub fn new(payload: P) -> Self {
        Self {
            payload,
            parent: None,
            children: Children::Absent,
        }
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn parent_collection(&self) -> Option<CollectionId> {
        self.parent
    }

    pub fn children(&self) -> Children {
        self.children
    }

    pub fn is_attached(&self) -> bool {
        self.parent.is_some()
    }

    pub(crate) fn set_parent(&mut self, parent: CollectionId) {
        self.parent = Some(parent);
    }

    pub(crate) fn set_children(&mut self, collection: CollectionId) {
        self.children = Children::Present(collection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_new_node_when_inspected_then_detached_without_children() {
        let node = Node::new("Row 0");

        assert_eq!(*node.payload(), "Row 0");
        assert!(!node.is_attached());
        assert_eq!(node.children(), Children::Absent);
        assert_eq!(node.children().collection(), None);
    }
}
