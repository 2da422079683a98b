/// Access to the system-wide display settings
pub mod file;
pub mod interface;
/// Test double with a failure switch
pub mod mock;

pub use interface::*;

#[cfg(test)]
mod test;
