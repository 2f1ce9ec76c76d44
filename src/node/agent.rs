use std::sync::Arc;

use log::{info, warn};
use tokio::sync::{watch, Mutex};

use crate::algorithm::step::{relax_and_select, NextHop};
use crate::algorithm::token::{CostTable, Token, VisitedSet};
use crate::graph::registry::{Edge, EdgeRegistry, NodeId};
use crate::protocol::frame::Frame;
use crate::protocol::transport;

/// The mutable per-node containers, guarded as one unit.
#[derive(Debug, Default)]
struct NodeState {
    registry: EdgeRegistry,
    costs: CostTable,
    visited: VisitedSet,
}

/// The per-process state machine: this node's identity, its outgoing edges,
/// and the cost/visited tables that are only meaningfully populated while a
/// run is in flight (or, on the terminal node, after it).
///
/// All mutable state lives behind a single `Mutex`, so every handler
/// (inbound connection tasks and the command loop alike) serializes through
/// one scoped acquisition that is released on every exit path. A token
/// processing step holds the lock across the forward send, making each hop
/// atomic with respect to other inbound frames.
pub struct NodeAgent {
    id: NodeId,
    state: Mutex<NodeState>,
    result_tx: watch::Sender<Option<CostTable>>,
}

impl NodeAgent {
    pub fn new(id: NodeId) -> Arc<Self> {
        let (result_tx, _) = watch::channel(None);
        Arc::new(NodeAgent {
            id,
            state: Mutex::new(NodeState::default()),
            result_tx,
        })
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Observation point for the final cost table.
    ///
    /// Yields `Some` only on the node that terminated the run - no other
    /// component aggregates the result. Nodes the token merely passed
    /// through never publish here.
    pub fn final_costs(&self) -> watch::Receiver<Option<CostTable>> {
        self.result_tx.subscribe()
    }

    /// Creates a directed edge from this node to `remote`.
    ///
    /// Pings the remote with a handshake frame to confirm reachability and
    /// appends the edge only when the handshake connection succeeds. Returns
    /// `false` with no mutation otherwise; resubmission is up to the caller.
    /// Duplicate registration is not detected: the same endpoint pair may be
    /// registered repeatedly, yielding parallel edges.
    pub async fn register_edge(&self, remote: NodeId, cost: u64) -> bool {
        info!(
            "{}: sending create edge to {} with cost {}",
            self.id, remote, cost
        );
        let frame = Frame::register_edge(self.id.clone(), cost);
        if !transport::send(&remote, &frame).await {
            return false;
        }

        let mut state = self.state.lock().await;
        state.registry.append(Edge::new(remote.clone(), cost));
        info!("{}: created edge to {} with cost {}", self.id, remote, cost);
        true
    }

    /// Acknowledges a handshake from a peer that registered an edge toward
    /// this node. The edge is directed and owned by the sender, so this is
    /// purely observational - no local state changes.
    pub fn receive_edge_handshake(&self, sender: &NodeId) {
        info!("{}: created edge from {}", self.id, sender);
    }

    /// Starts a run with this node as the source.
    ///
    /// Seeds `costs = {self: 0}`, clears the visited set, and processes the
    /// implicit first token locally. Only valid as the one run-initiating
    /// call in the whole system; a second call, or a concurrent start on
    /// another node, is undefined behavior by design.
    pub async fn start_run(&self) {
        info!("{}: starting run as source", self.id);
        {
            let mut state = self.state.lock().await;
            let token = Token::seeded(&self.id);
            state.costs = token.costs;
            state.visited = token.visited;
        }
        self.process_token(1).await;
    }

    /// Handles an inbound token: installs its tables over whatever local
    /// state was left behind, then takes this node's processing turn.
    pub async fn receive_token(&self, token: Token) {
        info!(
            "{}: token received, this is the {}'th node processed",
            self.id, token.order
        );
        let order = token.order;
        {
            let mut state = self.state.lock().await;
            state.costs = token.costs;
            state.visited = token.visited;
        }
        self.process_token(order).await;
    }

    /// One hop of the distributed algorithm: relax, pick the next holder,
    /// and either forward the token or terminate the run here.
    async fn process_token(&self, order: u64) {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        info!("{}: processing token at hop {}", self.id, order);

        let next = relax_and_select(
            &self.id,
            state.registry.edges(),
            &mut state.costs,
            &mut state.visited,
        );

        match next {
            NextHop::Forward(next) => {
                let token = Token {
                    costs: state.costs.clone(),
                    visited: state.visited.clone(),
                    order: order + 1,
                };
                match token.into_frame(self.id.clone()) {
                    Ok(frame) => {
                        info!("{}: forwarding token to {}", self.id, next);
                        // Fire and forget: a dead downstream peer stalls the
                        // run with no failure surfaced anywhere.
                        transport::send(&next, &frame).await;
                    }
                    Err(err) => warn!("{}: could not encode token: {}", self.id, err),
                }
            }
            NextHop::Finished => {
                info!("{}: no next node, run complete", self.id);
                for (node, cost) in &state.costs {
                    info!("{}: cost of {} to get here", node, cost);
                }
                let _ = self.result_tx.send(Some(state.costs.clone()));
            }
        }
    }

    /// Snapshot of the registered outgoing edges.
    pub async fn edges(&self) -> Vec<Edge> {
        self.state.lock().await.registry.edges().to_vec()
    }

    /// Snapshot of the cost table as last seen by this node.
    pub async fn costs(&self) -> CostTable {
        self.state.lock().await.costs.clone()
    }
}
