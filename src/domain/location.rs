use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationStatus {
    /// No position yet
    Loading,
    /// Address of the current position
    Resolved(String),
}

/// Source of the user's current position as a human readable address.
///
/// Polled from the event loop; implementations must not block.
pub trait LocationResolver {
    fn poll(&mut self, now: Instant) -> LocationStatus;
}
