//! Generic N-ary tree collection with unique sibling values.

mod arena;
mod collection;
mod node;
mod render;

pub use arena::{NodeId, Tree};
pub use collection::Children;
pub use node::{ChildIter, Descendants, NodeRef};
pub use render::{escape_control_characters, RenderOptions};
