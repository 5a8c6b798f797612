use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::config::{Config, LimitsConfig};
use crate::http::session::Session;
use crate::router::Router;

/// Binds the configured address and serves until the future is dropped.
///
/// A bind failure (address in use, permission denied, invalid address) is a
/// fatal startup error for the caller to propagate.
pub async fn run(cfg: &Config, router: Arc<Router>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.server.listen_addr))?;
    info!("Listening on {}", cfg.server.listen_addr);

    serve(listener, router, cfg.limits.clone()).await
}

/// Accept loop over an already-bound listener.
///
/// One session task per connection, spawned into a `JoinSet` so a panicking
/// session is reaped and logged instead of leaking, and so dropping this
/// future aborts every in-flight session. The semaphore bounds concurrent
/// connections; at the limit, new connections wait in the kernel backlog
/// rather than being reset.
pub async fn serve(
    listener: TcpListener,
    router: Arc<Router>,
    limits: LimitsConfig,
) -> anyhow::Result<()> {
    let permits = Arc::new(Semaphore::new(limits.max_connections));
    let mut sessions: JoinSet<()> = JoinSet::new();

    loop {
        while let Some(joined) = sessions.try_join_next() {
            if let Err(e) = joined {
                if e.is_panic() {
                    error!("session task panicked: {}", e);
                }
            }
        }

        let permit = Arc::clone(&permits).acquire_owned().await?;
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let router = Arc::clone(&router);
        let limits = limits.clone();
        sessions.spawn(async move {
            let _permit = permit;
            let mut session = Session::new(socket, router, &limits);
            if let Err(e) = session.run().await {
                warn!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
