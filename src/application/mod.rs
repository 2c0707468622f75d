//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic for a front end: the row actions and
//! the flattened list view the rows are picked from.

pub mod error;
pub mod services;
pub mod view;

pub use error::{ApplicationError, ApplicationResult};
pub use services::ProjectTree;
pub use view::{ListItem, TreeListRow, TreeListView};
