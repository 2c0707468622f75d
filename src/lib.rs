//! projtree: project resource tree.
//!
//! A hierarchical data model of rows whose child collections are created on
//! first access, plus the selection-driven row actions of a project tree
//! widget (add relative to the selection, remove the selection, unselect).
//!
//! Layers, inner to outer:
//! - [`domain`]: [`TreeModel`](domain::TreeModel), nodes, selection, payloads
//! - [`application`]: [`ProjectTree`](application::ProjectTree) service and
//!   the flattened [`TreeListView`](application::TreeListView)
//! - [`cli`]: terminal front end running action scripts

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;

pub mod util {
    pub mod testing;
}
