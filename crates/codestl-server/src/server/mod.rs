//! HTTP server lifecycle: explicit bind, run, stop.
//!
//! No global application object; the context holding config and the
//! pipeline is constructed once and passed into the request loop.

mod response;
mod route;

use anyhow::{anyhow, Context, Result};
use codestl_core::config::ServerConfig;
use codestl_core::pipeline::Pipeline;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tiny_http::Server;

/// Everything a request needs: configuration plus the pipeline
/// implementation. Owned for the server's whole lifetime.
pub struct ServerContext {
    pub config: ServerConfig,
    pub pipeline: Box<dyn Pipeline>,
}

impl ServerContext {
    pub fn new(config: ServerConfig, pipeline: Box<dyn Pipeline>) -> Self {
        Self { config, pipeline }
    }
}

/// Unblocks the request loop from another thread (Ctrl-C handler, tests).
#[derive(Clone)]
pub struct ShutdownHandle(Arc<Server>);

impl ShutdownHandle {
    pub fn stop(&self) {
        self.0.unblock();
    }
}

/// Bound listener, not yet serving. `run` enters the blocking loop.
pub struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
}

impl BoundServer {
    /// Binds the listener. Port 0 picks a free port; `addr()` reports it.
    pub fn bind(interface: IpAddr, port: u16) -> Result<Self> {
        let requested = SocketAddr::new(interface, port);
        let server =
            Server::http(requested).map_err(|e| anyhow!("failed to bind {requested}: {e}"))?;
        let addr = server
            .server_addr()
            .to_ip()
            .context("server has no IP listen address")?;
        Ok(Self {
            server: Arc::new(server),
            addr,
        })
    }

    /// Actual bound address (resolves port 0).
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle(Arc::clone(&self.server))
    }

    /// Blocking request loop; returns after `ShutdownHandle::stop`.
    ///
    /// Requests are handled one at a time on this thread. All the real
    /// waiting happens inside the pipeline's fetch/convert calls.
    pub fn run(self, ctx: ServerContext) -> Result<()> {
        for request in self.server.incoming_requests() {
            if let Err(e) = route::handle_request(request, &ctx) {
                tracing::warn!("failed to send response: {e:#}");
            }
        }
        tracing::info!("server on {} stopped", self.addr);
        Ok(())
    }
}
