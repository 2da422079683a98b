/// Navigation to the system screen granting the write-settings permission
pub mod command;
pub mod interface;
/// Test double with a failure switch
pub mod mock;

pub use interface::*;
