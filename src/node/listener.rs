use std::net::SocketAddr;
use std::sync::Arc;

use log::{debug, error, info};
use tokio::net::{TcpListener, TcpStream};

use crate::algorithm::token::Token;
use crate::node::agent::NodeAgent;
use crate::protocol::frame::Command;
use crate::protocol::transport;
use crate::Result;

/// The inbound side of a node process: accepts connections on the node's
/// listen address and spawns one handling task per connection. There is no
/// bound on simultaneously in-flight handlers and no backpressure; the
/// agent's lock is what serializes their effects.
pub struct NodeListener {
    listener: TcpListener,
}

impl NodeListener {
    pub async fn bind(addr: &str) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!("listening on {}", addr);
        Ok(NodeListener { listener })
    }

    /// The address actually bound, which becomes the node's identity when
    /// binding to an OS-assigned port.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept loop. Runs until the task is dropped.
    pub async fn run(self, agent: Arc<NodeAgent>) {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    debug!("{}: inbound connection from {}", agent.id(), addr);
                    let agent = Arc::clone(&agent);
                    tokio::spawn(async move {
                        dispatch(agent, stream).await;
                    });
                }
                Err(err) => {
                    error!("{}: cannot accept connection: {}", agent.id(), err);
                }
            }
        }
    }
}

/// Decodes the connection's single frame and routes it by command.
///
/// Undecodable input and malformed payloads fall through as no-ops: nothing
/// is reported to the sender and no local state changes.
async fn dispatch(agent: Arc<NodeAgent>, mut stream: TcpStream) {
    let frame = match transport::receive(&mut stream).await {
        Ok(frame) => frame,
        Err(err) => {
            debug!("{}: dropping undecodable frame: {}", agent.id(), err);
            return;
        }
    };

    debug!(
        "{}: processing connection with cmd {:?} from {}",
        agent.id(),
        frame.cmd,
        frame.sender
    );

    match frame.cmd {
        Command::RegisterEdge => agent.receive_edge_handshake(&frame.sender),
        Command::ProcessToken => match Token::from_frame(&frame) {
            Ok(token) => agent.receive_token(token).await,
            Err(err) => {
                debug!(
                    "{}: dropping malformed token from {}: {}",
                    agent.id(),
                    frame.sender,
                    err
                );
            }
        },
    }
}
