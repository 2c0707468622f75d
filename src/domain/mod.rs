//! Domain layer: tree model, selection state and payloads
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod collection;
pub mod error;
pub mod model;
pub mod node;
pub mod payload;
pub mod selection;

pub use collection::{Collection, ItemsChanged, SubscriptionId};
pub use error::{DomainError, DomainResult};
pub use model::{TreeIter, TreeModel};
pub use node::{Children, CollectionId, Node, NodeId};
pub use payload::{PayloadSource, RowLabel, RowNumbering};
pub use selection::{SelectionProvider, SelectionState, SingleSelection};
