/// Attributes of the window the bridge is attached to
pub mod headless;
pub mod interface;
/// Test double with a failure switch
pub mod mock;

pub use interface::*;
