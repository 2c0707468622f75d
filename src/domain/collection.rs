//! Ordered child collections and their change notifications.

use std::fmt;

use super::node::{CollectionId, NodeId};

/// Insertion-ordered sequence of nodes, owned by the model.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// Node owning this collection, None for the root collection
    owner: Option<NodeId>,
    items: Vec<NodeId>,
}

impl Collection {
    pub(crate) fn new(owner: Option<NodeId>) -> Self {
        Self {
            owner,
            items: Vec::new(),
        }
    }

    pub fn owner(&self) -> Option<NodeId> {
        self.owner
    }

    pub fn items(&self) -> &[NodeId] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn position(&self, node: NodeId) -> Option<usize> {
        self.items.iter().position(|&n| n == node)
    }

    /// Appends at the tail and returns the new element's position.
    pub(crate) fn push(&mut self, node: NodeId) -> usize {
        self.items.push(node);
        self.items.len() - 1
    }

    pub(crate) fn remove(&mut self, position: usize) -> NodeId {
        self.items.remove(position)
    }
}

/// Change notification delivered to collection subscribers.
///
/// Same shape as a list model's `items-changed` signal: at `position`,
/// `removed` items were dropped and then `added` items were inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemsChanged {
    pub collection: CollectionId,
    pub position: usize,
    pub removed: usize,
    pub added: usize,
}

impl ItemsChanged {
    pub(crate) fn inserted(collection: CollectionId, position: usize) -> Self {
        Self {
            collection,
            position,
            removed: 0,
            added: 1,
        }
    }

    pub(crate) fn removed(collection: CollectionId, position: usize) -> Self {
        Self {
            collection,
            position,
            removed: 1,
            added: 0,
        }
    }
}

impl fmt::Display for ItemsChanged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: at {} -{} +{}",
            self.collection, self.position, self.removed, self.added
        )
    }
}

/// Handle returned by `TreeModel::subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

pub(crate) type Callback = Box<dyn FnMut(&ItemsChanged)>;

pub(crate) struct Subscriber {
    pub(crate) id: SubscriptionId,
    pub(crate) collection: CollectionId,
    pub(crate) callback: Callback,
}

impl fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("id", &self.id)
            .field("collection", &self.collection)
            .finish_non_exhaustive()
    }
}
