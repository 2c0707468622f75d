use std::fmt::Display;

use termtree::Tree;
use tracing::instrument;

use crate::application::ProjectTree;
use crate::domain::{NodeId, PayloadSource, SelectionProvider, TreeModel};

/// Marker appended to the selected row when rendering.
pub const SELECTED_MARKER: &str = " *";

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

/// Renders `model` under a synthetic `title` root, marking `selected`.
///
/// Reads only what is materialized; rendering never creates collections.
pub fn render_model<P: Display>(model: &TreeModel<P>, title: &str, selected: Option<NodeId>) -> Tree<String> {
    fn build_tree<P: Display>(
        model: &TreeModel<P>,
        nodes: &[NodeId],
        selected: Option<NodeId>,
        parent_tree: &mut Tree<String>,
    ) {
        for &node in nodes {
            if let Some(payload) = model.payload(node) {
                let mut label = payload.to_string();
                if selected == Some(node) {
                    label.push_str(SELECTED_MARKER);
                }
                let mut child_tree = Tree::new(label);
                build_tree(model, model.peek_children(node), selected, &mut child_tree);
                parent_tree.push(child_tree);
            }
        }
    }

    let mut tree = Tree::new(title.to_string());
    build_tree(model, model.top_level(), selected, &mut tree);
    tree
}

impl<G, S> TreeNodeConvert for ProjectTree<G, S>
where
    G: PayloadSource,
    G::Payload: Display,
    S: SelectionProvider,
{
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        render_model(self.model(), "project", self.selected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Node, RowNumbering};

    #[test]
    fn given_empty_model_when_rendering_then_only_title() {
        let model: TreeModel<String> = TreeModel::new();

        let rendered = render_model(&model, "project", None).to_string();

        assert_eq!(rendered.trim_end(), "project");
    }

    #[test]
    fn given_nested_rows_when_rendering_then_selected_row_is_marked() {
        let mut tree = ProjectTree::new(RowNumbering::default());
        let row0 = tree.add_row().unwrap();
        tree.select(row0).unwrap();
        tree.add_row().unwrap();

        let rendered = tree.to_tree_string().to_string();

        assert!(rendered.starts_with("project\n"));
        assert!(rendered.contains("Row 0 *"));
        assert!(rendered.contains("Row 1"));
        assert!(!rendered.contains("Row 1 *"));
    }

    #[test]
    fn given_model_when_rendering_then_nothing_is_materialized() {
        let mut model = TreeModel::new();
        let a = model.append_to_root(Node::new("a"));

        render_model(&model, "t", None);

        assert_eq!(model.node(a).unwrap().children().collection(), None);
    }
}
