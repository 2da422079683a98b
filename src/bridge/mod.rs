//! The brightness bridge: six display operations served on a named channel

/// The bridge operations
pub mod brightness;
/// Messages crossing the bridge
pub mod codec;
/// Routing calls to operations
pub mod dispatch;
pub mod session;

pub use brightness::*;
pub use codec::*;
pub use dispatch::*;
pub use session::*;
