//! One-shot point-to-point frame delivery.
//!
//! Every frame travels on its own TCP connection: the sender connects,
//! writes one JSON-encoded frame, and closes. There is no framing delimiter
//! beyond the connection boundary itself, and no retry, timeout, or
//! acknowledgment protocol.

use log::warn;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::graph::registry::NodeId;
use crate::protocol::frame::Frame;
use crate::Result;

/// Delivers one frame to `remote`.
///
/// Returns `true` iff the connection was established and the write
/// attempted. It says nothing about whether the remote decoded or acted on
/// the frame; nothing ever propagates back across the network boundary.
pub async fn send(remote: &NodeId, frame: &Frame) -> bool {
    match try_send(remote, frame).await {
        Ok(()) => true,
        Err(err) => {
            warn!("failed to connect to {}: {}", remote, err);
            false
        }
    }
}

async fn try_send(remote: &NodeId, frame: &Frame) -> Result<()> {
    let mut stream = TcpStream::connect(remote.addr()).await?;
    let encoded = serde_json::to_vec(frame)?;
    stream.write_all(&encoded).await?;
    stream.shutdown().await?;
    Ok(())
}

/// Reads the single frame carried by an inbound connection.
///
/// The peer closes its end after writing, so the frame boundary is simply
/// end-of-stream. Errors here (including undecodable bytes) are the caller's
/// cue to drop the connection as a no-op.
pub async fn receive(stream: &mut TcpStream) -> Result<Frame> {
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await?;
    Ok(serde_json::from_slice(&buf)?)
}
