//! Infrastructure configuration modules.

pub mod blob;
pub mod logging;
pub mod revalidate;
pub mod settings;
