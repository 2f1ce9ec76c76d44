//! Token SSSP - Distributed Single-Source Shortest Paths via Token Passing
//!
//! Each graph node runs as an independent TCP-addressable process that knows
//! only its own outgoing edges. There is no coordinator: a single mutable
//! token carrying the cost table and visited set travels from process to
//! process, and every holder performs one round of Dijkstra relaxation before
//! choosing the next holder greedily. The run terminates at whichever node
//! finds no eligible next hop; that node's cost table is the final answer.
//!
//! The crate assumes cooperative, crash-free peers for the duration of a
//! single run and provides no delivery guarantees beyond TCP's.

pub mod algorithm;
pub mod graph;
pub mod node;
pub mod protocol;

pub use algorithm::step::NextHop;
pub use algorithm::token::{CostTable, Token, VisitedSet};
/// Re-export main types for convenient use
pub use graph::registry::{Edge, EdgeRegistry, NodeId};
pub use node::agent::NodeAgent;
pub use protocol::frame::{Command, Frame};

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Malformed frame: {0}")]
    Frame(#[from] serde_json::Error),

    #[error("Frame payload field {0} is missing")]
    MissingPayload(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
