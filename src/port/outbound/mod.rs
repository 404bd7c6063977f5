//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: the remote blob
//! store and the hosting framework's page cache.

pub mod blob;
pub mod invalidation;
