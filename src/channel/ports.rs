//! Request and port primitives for the bridge channel, built on Tokio channels.

use std::{fmt::Debug, result::Result};
use thiserror::Error;
use tokio::sync::{mpsc, mpsc::error::SendError, oneshot, watch};

/// Receives the result of a [Request] once the serving task has handled it.
type ResponseReceiver<R, E> = oneshot::Receiver<Result<R, E>>;

/// Number of requests which may wait in a channel before senders block.
const CHANNEL_CAPACITY: usize = 8;

/// A single call travelling through a channel.
///
/// Carries the call payload and the [oneshot::Sender] on which the serving
/// task reports back the outcome.
pub struct Request<P, R, E> {
    /// The call itself
    pub payload: P,
    /// Where the outcome goes
    pub response_sender: oneshot::Sender<Result<R, E>>,
}

impl<P, R, E> Request<P, R, E> {
    /// Wraps the payload into a [Request], returning the receiving end of its
    /// response channel alongside it.
    pub fn new(payload: P) -> (Request<P, R, E>, ResponseReceiver<R, E>) {
        let (response_sender, response_receiver) = oneshot::channel();
        let request = Request {
            payload,
            response_sender,
        };
        (request, response_receiver)
    }

}

/// Transport failures of a channel call, as opposed to in-band bridge errors.
#[derive(Debug, Error, Clone)]
pub enum ChannelError<E: Debug> {
    /// Nobody serves the channel anymore
    #[error("channel is closed, the serving task is gone")]
    Send,

    /// The request was taken but never answered
    #[error("serving task dropped the request without responding")]
    Recv,

    /// The serving task returned an error
    #[error("serving task failed: {0:?}")]
    Server(E),
}

/// The sending side of a channel.
///
/// Ports are cheap to clone and every clone talks to the same serving task.
/// The task keeps running until all of them are dropped, at which point it
/// tears down.
#[derive(Debug)]
pub struct ChannelPort<P, R, E: Debug> {
    message_sender: mpsc::Sender<Request<P, R, E>>,
    shutdown_receiver: watch::Receiver<()>,
}

// Deriving Clone would require E: Clone, which anyhow::Error is not.
impl<P, R, E: Debug> Clone for ChannelPort<P, R, E> {
    fn clone(&self) -> Self {
        Self {
            message_sender: self.message_sender.clone(),
            shutdown_receiver: self.shutdown_receiver.clone(),
        }
    }
}

impl<P, R, E: Debug> ChannelPort<P, R, E> {
    /// A port sending into `message_sender`
    pub fn new(
        message_sender: mpsc::Sender<Request<P, R, E>>,
        shutdown_receiver: watch::Receiver<()>,
    ) -> ChannelPort<P, R, E> {
        ChannelPort {
            message_sender,
            shutdown_receiver,
        }
    }

    /// Creates a connected port and receiver pair.
    ///
    /// The [ChannelReceiver] goes into the serving task, the port goes to the
    /// callers.
    pub fn make() -> (ChannelPort<P, R, E>, ChannelReceiver<P, R, E>) {
        let (req_tx, req_rx) = mpsc::channel::<Request<P, R, E>>(CHANNEL_CAPACITY);
        let (shutdown_tx, shutdown_rx) = watch::channel(());
        (
            ChannelPort::new(req_tx, shutdown_rx),
            ChannelReceiver::new(req_rx, shutdown_tx),
        )
    }

    /// Enqueues an already constructed [Request]. Prefer [Self::request].
    pub async fn raw_request(
        &self,
        r: Request<P, R, E>,
    ) -> Result<(), SendError<Request<P, R, E>>> {
        self.message_sender.send(r).await
    }

    /// Sends the payload and waits for the serving task's response.
    pub async fn request(&self, payload: P) -> Result<R, ChannelError<E>> {
        let (req, rx) = Request::new(payload);
        if self.raw_request(req).await.is_err() {
            return Err(ChannelError::Send);
        }
        match rx.await {
            Err(_) => Err(ChannelError::Recv),
            Ok(Ok(response)) => Ok(response),
            Ok(Err(server_error)) => Err(ChannelError::Server(server_error)),
        }
    }

    /// Drops this port and waits until the serving task has torn down.
    ///
    /// Only returns once every other clone of the port is gone too.
    pub async fn await_shutdown(self) {
        drop(self.message_sender);
        let mut shutdown_receiver = self.shutdown_receiver;
        // Nothing is ever sent on the shutdown channel, it only closes when
        // the serving task drops its ChannelReceiver
        while shutdown_receiver.changed().await.is_ok() {}
    }
}

/// The receiving side of a channel, owned by the serving task.
///
/// Dropping it signals shutdown to [ChannelPort::await_shutdown], so it must
/// be the last thing the serving task lets go of.
#[derive(Debug)]
pub struct ChannelReceiver<P, R, E: Debug> {
    /// Incoming requests
    pub request_receiver: mpsc::Receiver<Request<P, R, E>>,
    _shutdown_notifier: watch::Sender<()>,
}

impl<P, R, E: Debug> ChannelReceiver<P, R, E> {
    /// A receiver which signals shutdown through `shutdown_notifier` when dropped
    pub fn new(
        request_receiver: mpsc::Receiver<Request<P, R, E>>,
        shutdown_notifier: watch::Sender<()>,
    ) -> Self {
        ChannelReceiver {
            request_receiver,
            _shutdown_notifier: shutdown_notifier,
        }
    }

    /// Waits for the next request. `None` once every port has been dropped.
    pub async fn recv(&mut self) -> Option<Request<P, R, E>> {
        self.request_receiver.recv().await
    }
}
