//! Application layer managing screen state and navigation.
//!
//! This module coordinates between the domain layer and presentation layer:
//! each screen keeps its local UI state here and borrows the shared session
//! to read or mutate it.

pub mod state;
pub mod timer;
pub mod shop;
pub mod route_builder;
pub mod delivery;
pub mod payment;
pub mod confirm;
mod cursor;

pub use state::*;
pub use timer::*;
pub use shop::*;
pub use route_builder::*;
pub use delivery::*;
pub use payment::*;
pub use confirm::*;
