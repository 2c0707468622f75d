//! Flattened, expandable list view over a [`TreeModel`].
//!
//! This is the lazy materializer: only rows that are expanded get their child
//! collection resolved, so leaves that are never opened never allocate one.

use std::collections::HashSet;

use tracing::trace;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{DomainResult, NodeId, TreeModel};

/// A visible row of the flattened tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeListRow {
    pub node: NodeId,
    /// Nesting level, top-level rows are 0
    pub depth: usize,
    /// Index among the visible rows
    pub position: usize,
    pub expanded: bool,
    pub expandable: bool,
}

/// Item handed to the row renderer.
///
/// A non-passthrough view wraps each node in a [`TreeListRow`]; a passthrough
/// view hands out the nodes themselves. Either way [`ListItem::node`] yields
/// the data node, so callers never need to guess the item kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListItem {
    Row(TreeListRow),
    Node(NodeId),
}

impl ListItem {
    pub fn node(&self) -> NodeId {
        match self {
            ListItem::Row(row) => row.node,
            ListItem::Node(node) => *node,
        }
    }

    pub fn row(&self) -> Option<&TreeListRow> {
        match self {
            ListItem::Row(row) => Some(row),
            ListItem::Node(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TreeListView {
    expanded: HashSet<NodeId>,
    passthrough: bool,
}

impl TreeListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn passthrough() -> Self {
        Self {
            expanded: HashSet::new(),
            passthrough: true,
        }
    }

    pub fn expand(&mut self, node: NodeId) {
        self.expanded.insert(node);
    }

    pub fn collapse(&mut self, node: NodeId) {
        self.expanded.remove(&node);
    }

    pub fn is_expanded(&self, node: NodeId) -> bool {
        self.expanded.contains(&node)
    }

    /// Visible rows in display order.
    ///
    /// Resolves (and thereby materializes) the child collection of every
    /// expanded row. Expansion marks of destroyed nodes are forgotten.
    pub fn rows<P>(&mut self, model: &mut TreeModel<P>) -> DomainResult<Vec<TreeListRow>> {
        self.expanded.retain(|&node| model.contains(node));

        let root = model.resolve_children_of(None)?;
        let mut stack: Vec<(NodeId, usize)> =
            model.items(root)?.iter().rev().map(|&n| (n, 0)).collect();
        let mut rows = Vec::new();

        while let Some((node, depth)) = stack.pop() {
            let expanded = self.expanded.contains(&node);
            let expandable = if expanded {
                let children = model.resolve_children_of(Some(node))?;
                let items = model.items(children)?;
                stack.extend(items.iter().rev().map(|&c| (c, depth + 1)));
                !items.is_empty()
            } else {
                !model.peek_children(node).is_empty()
            };
            rows.push(TreeListRow {
                node,
                depth,
                position: rows.len(),
                expanded,
                expandable,
            });
        }
        trace!("flattened {} visible row(s)", rows.len());
        Ok(rows)
    }

    /// Visible items as the row renderer receives them.
    pub fn items<P>(&mut self, model: &mut TreeModel<P>) -> DomainResult<Vec<ListItem>> {
        let passthrough = self.passthrough;
        Ok(self
            .rows(model)?
            .into_iter()
            .map(|row| {
                if passthrough {
                    ListItem::Node(row.node)
                } else {
                    ListItem::Row(row)
                }
            })
            .collect())
    }

    /// Item at visible `position`.
    pub fn item_at<P>(&mut self, model: &mut TreeModel<P>, position: usize) -> ApplicationResult<ListItem> {
        let items = self.items(model)?;
        let visible = items.len();
        items
            .into_iter()
            .nth(position)
            .ok_or(ApplicationError::UnknownRow { position, visible })
    }
}
