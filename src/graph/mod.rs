pub mod registry;

pub use registry::{Edge, EdgeRegistry, NodeId};
