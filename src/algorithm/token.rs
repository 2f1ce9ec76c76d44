use std::collections::HashMap;

use crate::graph::registry::NodeId;
use crate::protocol::frame::{Command, Frame};
use crate::Result;

/// Best known distance from the source to each discovered node.
/// Nodes absent from the table are at infinity.
pub type CostTable = HashMap<NodeId, u64>;

/// Discovery state per node: absent = undiscovered, `false` = discovered but
/// not finalized, `true` = finalized (cost frozen).
pub type VisitedSet = HashMap<NodeId, bool>;

/// The unit of mutable global knowledge in flight between nodes.
///
/// Exactly one token exists per run. `order` is a hop counter that only ever
/// increments; it is informational and no protocol decision depends on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub costs: CostTable,
    pub visited: VisitedSet,
    pub order: u64,
}

impl Token {
    /// The token as seeded by the source node before its first hop.
    pub fn seeded(source: &NodeId) -> Self {
        let mut costs = CostTable::new();
        costs.insert(source.clone(), 0);
        Token {
            costs,
            visited: VisitedSet::new(),
            order: 1,
        }
    }

    /// Encodes the token into a `ProcessToken` wire frame.
    ///
    /// Payload layout: `[costs-json, visited-json, reserved, order]`. Slot 2
    /// is reserved (predecessor data in a future revision) and carried empty.
    pub fn into_frame(self, sender: NodeId) -> Result<Frame> {
        let data = vec![
            serde_json::to_string(&self.costs)?,
            serde_json::to_string(&self.visited)?,
            String::new(),
            self.order.to_string(),
        ];
        Ok(Frame::new(Command::ProcessToken, sender, data))
    }

    /// Decodes a token from a `ProcessToken` wire frame.
    pub fn from_frame(frame: &Frame) -> Result<Self> {
        let costs: CostTable = serde_json::from_str(frame.field(0)?)?;
        let visited: VisitedSet = serde_json::from_str(frame.field(1)?)?;
        // The hop order is informational only; a malformed value decodes
        // as zero rather than rejecting the whole token.
        let order = frame.field(3)?.parse::<u64>().unwrap_or(0);
        Ok(Token {
            costs,
            visited,
            order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(addr: &str) -> NodeId {
        NodeId::from(addr)
    }

    #[test]
    fn seeded_token_has_zero_cost_source_only() {
        let source = id("localhost:8005");
        let token = Token::seeded(&source);

        assert_eq!(token.costs.len(), 1);
        assert_eq!(token.costs[&source], 0);
        assert!(token.visited.is_empty());
        assert_eq!(token.order, 1);
    }

    #[test]
    fn frame_round_trip_preserves_tables() {
        let mut token = Token::seeded(&id("a:1"));
        token.costs.insert(id("b:2"), 7);
        token.visited.insert(id("a:1"), true);
        token.visited.insert(id("b:2"), false);
        token.order = 3;

        let frame = token.clone().into_frame(id("a:1")).unwrap();
        assert_eq!(frame.cmd, Command::ProcessToken);
        assert_eq!(frame.data.len(), 4);
        assert_eq!(frame.data[2], "");
        assert_eq!(frame.data[3], "3");

        let back = Token::from_frame(&frame).unwrap();
        assert_eq!(back, token);
    }

    #[test]
    fn truncated_frame_is_rejected() {
        let frame = Frame::new(Command::ProcessToken, id("a:1"), vec!["{}".to_string()]);
        assert!(Token::from_frame(&frame).is_err());
    }

    #[test]
    fn garbage_payload_is_rejected() {
        let frame = Frame::new(
            Command::ProcessToken,
            id("a:1"),
            vec![
                "not json".to_string(),
                "{}".to_string(),
                String::new(),
                "1".to_string(),
            ],
        );
        assert!(Token::from_frame(&frame).is_err());
    }
}
