//! A module that contains everything that has to do with building graphs
//! in memory and emitting their DOT textual form.

pub mod attr;
pub mod graph;

pub use attr::Attr;
pub use attr::AttrValue;
pub use attr::Attrs;
pub use graph::Edge;
pub use graph::Graph;
pub use graph::Node;
pub use graph::NodeId;
