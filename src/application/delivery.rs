//! Delivery mode selection screen.

use super::cursor::step;
use super::payment::PaymentMethodPanel;
use crate::domain::{
    ConfirmDeliveryPayload, DeliveryCategory, DeliveryMode, DeliveryModeId, DeliveryPricing, DomainError,
    DomainResult, FoodOrderSession, NavigationState, Route,
};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct DeliverySelector {
    /// Category whose modes are listed
    pub active_tab: DeliveryCategory,
    /// Chosen mode; the recommended one on entry
    pub selected_mode: Option<DeliveryModeId>,
    /// Row highlighted within the active tab.
    pub cursor: usize,
    pub payment_panel: PaymentMethodPanel,
}

impl DeliverySelector {
    /// Opens the screen with the recommended mode preselected.
    pub fn new(session: &FoodOrderSession) -> Self {
        let recommended = DeliveryPricing::new(session.subtotal()).recommended();
        Self {
            active_tab: DeliveryCategory::Recommended,
            selected_mode: Some(recommended.id),
            cursor: 0,
            payment_panel: PaymentMethodPanel::default(),
        }
    }

    pub fn pricing(session: &FoodOrderSession) -> DeliveryPricing {
        DeliveryPricing::new(session.subtotal())
    }

    /// Modes shown under the active tab, priced for the current cart.
    pub fn visible_modes(&self, session: &FoodOrderSession) -> Vec<DeliveryMode> {
        Self::pricing(session).modes_in(self.active_tab)
    }

    pub fn set_tab(&mut self, tab: DeliveryCategory) {
        self.active_tab = tab;
        self.cursor = 0;
    }

    pub fn next_tab(&mut self) {
        self.set_tab(self.active_tab.next());
    }

    pub fn previous_tab(&mut self) {
        self.set_tab(self.active_tab.previous());
    }

    pub fn move_cursor(&mut self, delta: isize, session: &FoodOrderSession) {
        self.cursor = step(self.cursor, delta, self.visible_modes(session).len());
    }

    /// Replaces the selection; last write wins.
    pub fn select_mode(&mut self, id: DeliveryModeId, session: &FoodOrderSession) -> DomainResult<()> {
        if !Self::pricing(session).modes().iter().any(|mode| mode.id == id) {
            return Err(DomainError::ModeNotAvailable(id.as_str().to_string()));
        }
        self.selected_mode = Some(id);
        Ok(())
    }

    pub fn select_at_cursor(&mut self, session: &FoodOrderSession) {
        let modes = self.visible_modes(session);
        if let Some(mode) = modes.get(self.cursor) {
            self.selected_mode = Some(mode.id);
        }
    }

    pub fn selected(&self, session: &FoodOrderSession) -> Option<DeliveryMode> {
        self.selected_mode.map(|id| Self::pricing(session).mode(id))
    }

    pub fn can_confirm(&self) -> bool {
        self.selected_mode.is_some()
    }

    pub fn confirm_label(&self, session: &FoodOrderSession) -> String {
        match self.selected(session) {
            Some(mode) => format!("Select {}", mode.name),
            None => "Select delivery mode".to_string(),
        }
    }

    /// Builds the confirmation route. The mode is re-priced from the session
    /// here, so the total handed on always equals subtotal plus fee.
    pub fn confirm(&self, session: &FoodOrderSession) -> Option<Route> {
        let mode = self.selected(session)?;
        let payload = match ConfirmDeliveryPayload::new(
            mode,
            session.cart_items().to_vec(),
            session.current_location_food_ids().to_vec(),
            session.stops().to_vec(),
        ) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(%err, "could not build confirmation payload");
                return None;
            }
        };
        info!(
            mode = payload.delivery_mode.id.as_str(),
            subtotal = payload.total_food_price,
            total = payload.total_price,
            "delivery mode chosen"
        );
        Some(Route::ConfirmDelivery(NavigationState::from(payload)))
    }

    /// Every header control leads back to the route builder.
    pub fn back_to_route(&self) -> Route {
        Route::FoodiesRoute {
            highlight_current_location: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FoodItem;

    fn session(prices: &[u64]) -> FoodOrderSession {
        let mut session = FoodOrderSession::default();
        for (i, price) in prices.iter().enumerate() {
            session.add_to_cart(&FoodItem {
                id: format!("food-{i}"),
                name: format!("Food {i}"),
                price: *price,
                image: String::new(),
            });
        }
        session
    }

    #[test]
    fn test_recommended_mode_is_default() {
        let session = session(&[100]);
        let selector = DeliverySelector::new(&session);
        assert_eq!(selector.active_tab, DeliveryCategory::Recommended);
        assert_eq!(selector.selected_mode, Some(DeliveryModeId::Motorbike));
        assert!(selector.can_confirm());
        assert_eq!(selector.confirm_label(&session), "Select Motorbike");
    }

    #[test]
    fn test_tabs_filter_modes() {
        let session = session(&[300]);
        let mut selector = DeliverySelector::new(&session);
        selector.next_tab();
        let modes = selector.visible_modes(&session);
        assert_eq!(modes.len(), 1);
        assert_eq!(modes[0].id, DeliveryModeId::Car);
        assert_eq!(modes[0].price, 45);

        selector.select_at_cursor(&session);
        assert_eq!(selector.selected_mode, Some(DeliveryModeId::Car));
    }

    #[test]
    fn test_select_is_last_write_wins() {
        let session = session(&[100]);
        let mut selector = DeliverySelector::new(&session);
        selector.select_mode(DeliveryModeId::Car, &session).unwrap();
        selector.select_mode(DeliveryModeId::Bicycle, &session).unwrap();
        assert_eq!(selector.selected_mode, Some(DeliveryModeId::Bicycle));
    }

    #[test]
    fn test_confirm_disabled_without_selection() {
        let session = session(&[100]);
        let mut selector = DeliverySelector::new(&session);
        selector.selected_mode = None;
        assert!(!selector.can_confirm());
        assert_eq!(selector.confirm_label(&session), "Select delivery mode");
        assert!(selector.confirm(&session).is_none());
    }

    #[test]
    fn test_confirm_motorbike_on_hundred() {
        let session = session(&[60, 40]);
        let selector = DeliverySelector::new(&session);
        let Some(Route::ConfirmDelivery(state)) = selector.confirm(&session) else {
            panic!("expected confirmation route");
        };
        assert_eq!(state.total_food_price, Some(100));
        assert_eq!(state.total_price, Some(115));
        assert_eq!(state.delivery_mode.as_ref().map(|m| m.price), Some(15));
        assert_eq!(state.cart_items.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_back_highlights_current_location() {
        let session = session(&[100]);
        let selector = DeliverySelector::new(&session);
        assert_eq!(
            selector.back_to_route(),
            Route::FoodiesRoute { highlight_current_location: true }
        );
    }
}
