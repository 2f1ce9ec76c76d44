use serde::{Deserialize, Serialize};

use crate::graph::registry::NodeId;
use crate::{Error, Result};

/// The two operations a peer can trigger remotely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Edge-registration handshake: the sender is creating a directed edge
    /// toward the receiver and pings it to confirm reachability.
    RegisterEdge,
    /// The token has arrived; it is the receiver's turn to be processed.
    ProcessToken,
}

/// The wire envelope, one per TCP connection.
///
/// Serialized as `{"cmd": ..., "sender": "<host:port>", "data": [...]}`.
/// The meaning of the `data` strings depends on `cmd`: a `RegisterEdge`
/// frame carries the edge cost in decimal at slot 0; a `ProcessToken` frame
/// carries the JSON cost table, JSON visited set, a reserved slot, and the
/// decimal hop order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub cmd: Command,
    pub sender: NodeId,
    pub data: Vec<String>,
}

impl Frame {
    pub fn new(cmd: Command, sender: NodeId, data: Vec<String>) -> Self {
        Frame { cmd, sender, data }
    }

    /// A `RegisterEdge` handshake frame for an edge of the given cost.
    pub fn register_edge(sender: NodeId, cost: u64) -> Self {
        Frame::new(Command::RegisterEdge, sender, vec![cost.to_string()])
    }

    /// Payload field accessor that surfaces truncated frames as errors.
    pub fn field(&self, index: usize) -> Result<&str> {
        self.data
            .get(index)
            .map(String::as_str)
            .ok_or(Error::MissingPayload(index))
    }
}
