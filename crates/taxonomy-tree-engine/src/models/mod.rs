pub mod label;
pub mod node;
pub mod view;

pub use label::NodeLabel;
pub use node::{DEFAULT_X_COORD, TaxonomyNode, Walk};
pub use view::{ExpansionState, TreeItem, visible_items};
