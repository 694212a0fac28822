//! Aletwende - terminal food delivery ordering
//!
//! Pick a store, fill a cart, split the food between the current location
//! and up to a configurable number of extra stops, choose a delivery mode
//! and confirm the order.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
