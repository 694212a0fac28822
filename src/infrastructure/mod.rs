//! Infrastructure layer providing external service integrations.
//!
//! This module contains the file-backed catalog and address loaders,
//! configuration, logging setup, and the location resolver.

pub mod catalog;
pub mod config;
pub mod location;
pub mod logging;

pub use catalog::*;
pub use config::*;
pub use location::*;
