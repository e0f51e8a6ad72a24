//! Choosing the transport behind the panel.

use echo_transport::{normalize_url, LoopbackTransport, Transport, WebSocketTransport};
use tokio::runtime::Handle;
use tracing::info;

use crate::error::Result;

/// A transport picked at runtime.
pub type BoxedTransport = Box<dyn Transport>;

/// Build the transport for `url`.
///
/// With `loopback` set nothing touches the network: an in-process peer
/// echoes every message back.
pub fn open_transport(url: &str, loopback: bool, runtime: &Handle) -> Result<BoxedTransport> {
    if loopback {
        // Same address rules as the network transport
        normalize_url(url)?;
        info!(url = %url, "using loopback transport");
        return Ok(Box::new(LoopbackTransport::new(url)));
    }

    Ok(Box::new(WebSocketTransport::new(url, runtime.clone())?))
}
