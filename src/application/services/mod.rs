//! Application services

pub mod project_tree;

pub use project_tree::ProjectTree;
