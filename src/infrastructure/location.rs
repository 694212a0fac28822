use crate::domain::{LocationResolver, LocationStatus};
use std::time::{Duration, Instant};

/// Resolves to a configured address once a startup delay has passed,
/// standing in for a device position lookup.
#[derive(Debug, Clone)]
pub struct ConfiguredLocation {
    address: String,
    ready_at: Instant,
}

impl ConfiguredLocation {
    pub fn new(address: impl Into<String>, started: Instant, delay: Duration) -> Self {
        Self {
            address: address.into(),
            ready_at: started + delay,
        }
    }
}

impl LocationResolver for ConfiguredLocation {
    fn poll(&mut self, now: Instant) -> LocationStatus {
        if now < self.ready_at {
            LocationStatus::Loading
        } else {
            LocationStatus::Resolved(self.address.clone())
        }
    }
}
