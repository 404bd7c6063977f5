//! Adapters implementing the ports: outbound (blob store, invalidation)
//! and inbound (CLI).

pub mod inbound;
pub mod outbound;
