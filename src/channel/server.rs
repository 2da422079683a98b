//! Serving tasks sitting behind a [ChannelPort].

use super::ChannelPort;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::oneshot;

/// Something that answers requests arriving on a channel.
///
/// A server goes through three phases. [Server::initialize] runs first and
/// [spawn_server] does not return until it finishes. After that every request
/// sent through the returned [ChannelPort] is passed to
/// [Server::handle_message], strictly one at a time. Once all ports are
/// dropped, [Server::tear_down] runs so the server can put back whatever it
/// changed while it was attached. Synchronous cleanup belongs in [Drop].
#[async_trait]
pub trait Server<P, R>: Send + 'static {
    /// Name used in log messages.
    fn get_name(&self) -> String;

    /// Handles one request. The result is forwarded to the requester as is.
    async fn handle_message(&mut self, payload: P) -> Result<R>;

    /// Runs before the first request. An error here makes [spawn_server] fail.
    async fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    /// Runs after the last port is dropped. Errors are only logged.
    async fn tear_down(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Moves the server into its own Tokio task and returns a port to it.
///
/// Waits for [Server::initialize] to complete and returns its error, if any,
/// instead of a port.
pub async fn spawn_server<P, R>(
    mut server: impl Server<P, R>,
) -> Result<ChannelPort<P, R, anyhow::Error>>
where
    P: Send + 'static,
    R: Send + 'static,
{
    let name = server.get_name();
    log::debug!("{} spawning", name);
    let (port, mut rx) = ChannelPort::make();
    let (initialization_sender, initialization_receiver) = oneshot::channel::<Result<()>>();
    tokio::spawn(async move {
        let name = server.get_name();
        let init_result = server.initialize().await;
        let had_init_error = init_result.is_err();
        if initialization_sender.send(init_result).is_err() {
            log::error!("{} was abandoned during initialization", name);
            return;
        }
        if had_init_error {
            return;
        }
        log::info!("{} initialized successfully", name);
        while let Some(req) = rx.recv().await {
            let res = server.handle_message(req.payload).await;
            if let Err(e) = &res {
                log::error!("{} message handler returned error: {}", name, e);
            }
            if req.response_sender.send(res).is_err() {
                log::error!(
                    "{} failed to respond to request (requester went away?)",
                    name
                );
            }
        }
        log::debug!("{} stopping", name);
        if let Err(e) = server.tear_down().await {
            log::error!("{} failed to tear down: {}", name, e);
        }
        log::debug!("{} stopped", name);
    });

    match initialization_receiver.await {
        Ok(Ok(_)) => Ok(port),
        Ok(Err(e)) => {
            log::error!("Error initializing {}: {}", name, e);
            Err(e)
        }
        Err(e) => Err(anyhow!(e)),
    }
}
