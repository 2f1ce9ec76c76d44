use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a participating node process: its listen address (`host:port`).
///
/// The address string is used verbatim as the key type everywhere - in the
/// edge registry, the cost table, the visited set, and on the wire. Equality
/// is exact string match; no resolution or normalization is performed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(addr: impl Into<String>) -> Self {
        NodeId(addr.into())
    }

    /// The address string, suitable for `TcpStream::connect`.
    pub fn addr(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(addr: &str) -> Self {
        NodeId(addr.to_string())
    }
}

/// A directed edge owned by the node it originates from.
///
/// The remote endpoint never stores the edge; it is only pinged once, at
/// registration time, to confirm reachability. Costs are non-negative by
/// construction of the type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub remote: NodeId,
    pub cost: u64,
}

impl Edge {
    pub fn new(remote: NodeId, cost: u64) -> Self {
        Edge { remote, cost }
    }
}

/// A node's local record of its own outgoing directed edges.
///
/// Append-only: edges are immutable once registered, and there is no removal
/// or cost-update operation. Duplicates are kept as parallel edges - the
/// relaxation step will simply prefer whichever yields the smaller cost.
#[derive(Debug, Clone, Default)]
pub struct EdgeRegistry {
    edges: Vec<Edge>,
}

impl EdgeRegistry {
    pub fn new() -> Self {
        EdgeRegistry { edges: Vec::new() }
    }

    /// Appends an edge. The caller is responsible for having confirmed
    /// reachability of `edge.remote` first (the registration handshake).
    pub fn append(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
