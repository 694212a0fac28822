//! Order confirmation screen.
//!
//! The screen moves one way only: idle, then processing while the simulated
//! backend delay runs, then it hands off to the driver-waiting screen.

use super::timer::DelayedTask;
use crate::domain::{ConfirmDeliveryPayload, DomainResult, DriverWaitPayload, NavigationState, Route};
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmPhase {
    /// Waiting for the user to confirm
    Idle,
    /// Order submitted; the task's deadline marks the hand-off
    Processing(DelayedTask),
}

#[derive(Debug, Clone)]
pub struct ConfirmScreen {
    /// Validated order details shown on the screen
    pub payload: ConfirmDeliveryPayload,
    pub phase: ConfirmPhase,
    delay: Duration,
}

impl ConfirmScreen {
    /// Validates the incoming navigation state. An `Err` means the caller
    /// must redirect back to delivery selection without rendering anything.
    pub fn enter(state: NavigationState, delay: Duration) -> DomainResult<Self> {
        let payload = state.into_confirm_payload()?;
        Ok(Self {
            payload,
            phase: ConfirmPhase::Idle,
            delay,
        })
    }

    pub fn is_processing(&self) -> bool {
        matches!(self.phase, ConfirmPhase::Processing(_))
    }

    pub fn can_confirm(&self) -> bool {
        !self.is_processing()
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_processing() { "Processing..." } else { "Confirm order" }
    }

    /// Starts the processing delay. Ignored while one is already running.
    pub fn confirm(&mut self, now: Instant) {
        if self.is_processing() {
            debug!("confirm ignored while processing");
            return;
        }
        info!(
            mode = self.payload.delivery_mode.id.as_str(),
            total = self.payload.total_price,
            "order submitted"
        );
        self.phase = ConfirmPhase::Processing(DelayedTask::start(now, self.delay));
    }

    /// Returns the onward route once the delay has elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<Route> {
        match self.phase {
            ConfirmPhase::Processing(task) if task.is_due(now) => {
                Some(Route::WaitingForDriver(DriverWaitPayload::from(self.payload.clone())))
            }
            _ => None,
        }
    }

    /// Back is hidden while the order is processing.
    pub fn back(&self) -> Option<Route> {
        if self.is_processing() {
            return None;
        }
        Some(Route::DeliverySelection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CartItem, DeliveryModeId, DeliveryPricing, DomainError};

    fn state() -> NavigationState {
        let cart = vec![CartItem {
            id: "chicken".to_string(),
            name: "Chicken & chips".to_string(),
            price: 100,
            image: "chicken.jpg".to_string(),
        }];
        let mode = DeliveryPricing::for_cart(&cart).unwrap().mode(DeliveryModeId::Motorbike);
        NavigationState::from(ConfirmDeliveryPayload::new(mode, cart, vec!["chicken".to_string()], Vec::new()).unwrap())
    }

    #[test]
    fn test_enter_without_mode_fails() {
        let result = ConfirmScreen::enter(NavigationState::default(), Duration::from_millis(1500));
        assert!(matches!(result, Err(DomainError::MissingNavigationField(_))));
    }

    #[test]
    fn test_idle_to_processing_to_waiting() {
        let now = Instant::now();
        let mut screen = ConfirmScreen::enter(state(), Duration::from_millis(1500)).unwrap();
        assert_eq!(screen.button_label(), "Confirm order");
        assert!(screen.tick(now + Duration::from_secs(10)).is_none());

        screen.confirm(now);
        assert!(screen.is_processing());
        assert!(!screen.can_confirm());
        assert_eq!(screen.button_label(), "Processing...");
        assert!(screen.tick(now + Duration::from_millis(1000)).is_none());

        match screen.tick(now + Duration::from_millis(1500)) {
            Some(Route::WaitingForDriver(payload)) => {
                assert_eq!(payload.total_price, 115);
                assert_eq!(payload.delivery_mode.id, DeliveryModeId::Motorbike);
                assert_eq!(payload.cart_items.len(), 1);
            }
            other => panic!("expected waiting route, got {other:?}"),
        }
    }

    #[test]
    fn test_second_confirm_does_not_restart_delay() {
        let now = Instant::now();
        let mut screen = ConfirmScreen::enter(state(), Duration::from_millis(1500)).unwrap();
        screen.confirm(now);
        screen.confirm(now + Duration::from_millis(1000));
        assert!(screen.tick(now + Duration::from_millis(1500)).is_some());
    }

    #[test]
    fn test_back_disabled_while_processing() {
        let mut screen = ConfirmScreen::enter(state(), Duration::from_millis(1500)).unwrap();
        assert_eq!(screen.back(), Some(Route::DeliverySelection));
        screen.confirm(Instant::now());
        assert_eq!(screen.back(), None);
    }
}
