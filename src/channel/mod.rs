//! The named request/response channel the UI layer uses to reach the bridge.
//!
//! A channel is a [ChannelPort] feeding a single Tokio task which owns the
//! receiving end, so requests are always handled one at a time and in order.

mod ports;
mod server;

#[doc(inline)]
pub use ports::*;

#[doc(inline)]
pub use server::*;

#[cfg(test)]
mod test_ports;

#[cfg(test)]
mod test_server;
