//! Arena-backed tree model with lazily materialized child collections.

use generational_arena::Arena;
use tracing::{debug, instrument, trace};

use super::collection::{Collection, ItemsChanged, Subscriber, SubscriptionId};
use super::error::{DomainError, DomainResult};
use super::node::{Children, CollectionId, Node, NodeId};

/// Owning structure for every node and collection of a project tree.
///
/// Nodes and collections live in generational arenas. Nodes refer to the
/// collection containing them by handle only, so there is no ownership cycle:
/// a collection owns its nodes, a node owns its child collection, and
/// removing a node from its collection destroys the whole subtree.
///
/// The root collection and each node's child collection are created on first
/// request and then reused, so handles returned by [`resolve_children_of`]
/// stay valid for observers until the owner is destroyed.
///
/// [`resolve_children_of`]: TreeModel::resolve_children_of
#[derive(Debug)]
pub struct TreeModel<P> {
    nodes: Arena<Node<P>>,
    collections: Arena<Collection>,
    root: Option<CollectionId>,
    subscribers: Vec<Subscriber>,
    next_subscription: u64,
}

impl<P> Default for TreeModel<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> TreeModel<P> {
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            collections: Arena::new(),
            root: None,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Returns the children container for `node`, or the root collection for `None`.
    ///
    /// This is the single entry point for a lazy materializer expanding a row.
    /// Repeated calls with the same argument return the same collection.
    #[instrument(level = "trace", skip(self))]
    pub fn resolve_children_of(&mut self, node: Option<NodeId>) -> DomainResult<CollectionId> {
        match node {
            None => Ok(self.root_collection()),
            Some(id) => self.children_of(id),
        }
    }

    /// Root collection, created on first call.
    pub fn root_collection(&mut self) -> CollectionId {
        if let Some(root) = self.root {
            return root;
        }
        let root = CollectionId(self.collections.insert(Collection::new(None)));
        debug!("created root collection {}", root);
        self.root = Some(root);
        root
    }

    /// Root collection if it has been materialized.
    pub fn root(&self) -> Option<CollectionId> {
        self.root
    }

    /// Child collection of `node`, created empty on first access.
    #[instrument(level = "trace", skip(self))]
    pub fn children_of(&mut self, node: NodeId) -> DomainResult<CollectionId> {
        let children = self.require_node(node)?.children();
        if let Children::Present(collection) = children {
            return Ok(collection);
        }

        let collection = CollectionId(self.collections.insert(Collection::new(Some(node))));
        if let Some(entry) = self.nodes.get_mut(node.0) {
            entry.set_children(collection);
        }
        trace!("materialized {} for {}", collection, node);
        Ok(collection)
    }

    /// Collection `node` currently lives in.
    pub fn parent_collection(&self, node: NodeId) -> DomainResult<CollectionId> {
        self.require_node(node)?
            .parent_collection()
            .ok_or_else(|| DomainError::invalid(format!("{} is not attached", node)))
    }

    /// Appends `child` at the end of the root collection.
    pub fn append_to_root(&mut self, child: Node<P>) -> NodeId {
        let root = self.root_collection();
        self.attach(root, child)
    }

    /// Appends `child` at the end of `parent`'s child collection.
    ///
    /// Materializes the child collection if `parent` had none.
    #[instrument(level = "debug", skip(self, child))]
    pub fn append_child(&mut self, parent: NodeId, child: Node<P>) -> DomainResult<NodeId> {
        let collection = self.children_of(parent)?;
        Ok(self.attach(collection, child))
    }

    /// Appends `child` at the end of an arbitrary live collection.
    pub fn append(&mut self, collection: CollectionId, child: Node<P>) -> DomainResult<NodeId> {
        self.require_collection(collection)?;
        Ok(self.attach(collection, child))
    }

    fn attach(&mut self, collection: CollectionId, mut child: Node<P>) -> NodeId {
        child.set_parent(collection);
        let id = NodeId(self.nodes.insert(child));
        let position = match self.collections.get_mut(collection.0) {
            Some(target) => target.push(id),
            None => 0,
        };
        debug!("appended {} to {} at {}", id, collection, position);
        self.notify(ItemsChanged::inserted(collection, position));
        id
    }

    /// Removes `node` from its parent collection and destroys its subtree.
    ///
    /// Returns the number of nodes destroyed (the node plus all descendants).
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, node: NodeId) -> DomainResult<usize> {
        let parent = self.parent_collection(node)?;
        let position = self
            .position_of(parent, node)
            .ok_or_else(|| DomainError::invalid(format!("{} not found in {}", node, parent)))?;
        self.remove_at(parent, position)
    }

    /// Erases the element at `position` of `collection` and destroys its subtree.
    pub fn remove_at(&mut self, collection: CollectionId, position: usize) -> DomainResult<usize> {
        let target = self
            .collections
            .get_mut(collection.0)
            .ok_or_else(|| DomainError::invalid(format!("{} no longer exists", collection)))?;
        if position >= target.len() {
            return Err(DomainError::invalid(format!(
                "position {} out of range for {} (len {})",
                position,
                collection,
                target.len()
            )));
        }
        let removed = target.remove(position);
        let destroyed = self.destroy_subtree(removed);
        debug!(
            "removed {} from {} at {}, destroyed {} node(s)",
            removed, collection, position, destroyed
        );
        self.notify(ItemsChanged::removed(collection, position));
        Ok(destroyed)
    }

    /// Drops a detached node and everything below it, stack based.
    fn destroy_subtree(&mut self, top: NodeId) -> usize {
        let mut stack = vec![top];
        let mut destroyed = 0;

        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.remove(id.0) else {
                continue;
            };
            destroyed += 1;
            if let Children::Present(collection) = node.children() {
                if let Some(children) = self.collections.remove(collection.0) {
                    stack.extend_from_slice(children.items());
                }
                self.drop_subscribers(collection);
            }
        }
        destroyed
    }

    /// Registers `callback` for changes of `collection`.
    pub fn subscribe<F>(&mut self, collection: CollectionId, callback: F) -> DomainResult<SubscriptionId>
    where
        F: FnMut(&ItemsChanged) + 'static,
    {
        self.require_collection(collection)?;
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push(Subscriber {
            id,
            collection,
            callback: Box::new(callback),
        });
        trace!("subscription {:?} on {}", id, collection);
        Ok(id)
    }

    /// Returns false if the subscription was unknown or already dropped.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        before != self.subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn drop_subscribers(&mut self, collection: CollectionId) {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.collection != collection);
        let dropped = before - self.subscribers.len();
        if dropped > 0 {
            debug!("dropped {} subscription(s) of destroyed {}", dropped, collection);
        }
    }

    fn notify(&mut self, change: ItemsChanged) {
        trace!("items changed: {}", change);
        for subscriber in self
            .subscribers
            .iter_mut()
            .filter(|s| s.collection == change.collection)
        {
            (subscriber.callback)(&change);
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<P>> {
        self.nodes.get(id.0)
    }

    pub fn payload(&self, id: NodeId) -> Option<&P> {
        self.node(id).map(Node::payload)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(id.0)
    }

    pub fn collection(&self, id: CollectionId) -> Option<&Collection> {
        self.collections.get(id.0)
    }

    /// Elements of `collection` in insertion order.
    pub fn items(&self, collection: CollectionId) -> DomainResult<&[NodeId]> {
        self.require_collection(collection).map(Collection::items)
    }

    pub fn position_of(&self, collection: CollectionId, node: NodeId) -> Option<usize> {
        self.collection(collection)?.position(node)
    }

    /// Children of `node` without materializing anything; empty if absent.
    pub fn peek_children(&self, node: NodeId) -> &[NodeId] {
        self.node(node)
            .and_then(|n| n.children().collection())
            .and_then(|c| self.collection(c))
            .map(Collection::items)
            .unwrap_or(&[])
    }

    /// Top-level nodes without materializing the root collection.
    pub fn top_level(&self) -> &[NodeId] {
        self.root
            .and_then(|c| self.collection(c))
            .map(Collection::items)
            .unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order traversal, left to right, with depth (top level = 0).
    pub fn iter(&self) -> TreeIter<'_, P> {
        TreeIter::new(self)
    }

    /// Number of levels in the tree, 0 if empty.
    pub fn depth(&self) -> usize {
        self.iter().map(|(_, depth, _)| depth + 1).max().unwrap_or(0)
    }

    fn require_node(&self, id: NodeId) -> DomainResult<&Node<P>> {
        self.node(id)
            .ok_or_else(|| DomainError::invalid(format!("{} no longer exists", id)))
    }

    fn require_collection(&self, id: CollectionId) -> DomainResult<&Collection> {
        self.collection(id)
            .ok_or_else(|| DomainError::invalid(format!("{} no longer exists", id)))
    }
}

pub struct TreeIter<'a, P> {
    model: &'a TreeModel<P>,
    stack: Vec<(NodeId, usize)>,
}

impl<'a, P> TreeIter<'a, P> {
    fn new(model: &'a TreeModel<P>) -> Self {
        let stack = model.top_level().iter().rev().map(|&id| (id, 0)).collect();
        Self { model, stack }
    }
}

impl<'a, P> Iterator for TreeIter<'a, P> {
    type Item = (NodeId, usize, &'a Node<P>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((id, depth)) = self.stack.pop() {
            if let Some(node) = self.model.node(id) {
                // Push children in reverse order for left-to-right traversal
                for &child in self.model.peek_children(id).iter().rev() {
                    self.stack.push((child, depth + 1));
                }
                return Some((id, depth, node));
            }
        }
        None
    }
}
