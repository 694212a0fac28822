//! Typed navigation between screens.
//!
//! Screens hand each other data through payload structs instead of loose
//! state bags. Payloads that arrive from outside the typed API (for example
//! JSON) go through [`NavigationState::into_confirm_payload`], and the
//! receiving screen redirects when validation fails.

use super::errors::{DomainError, DomainResult};
use super::models::{CartItem, DeliveryMode, Price, Stop};
use super::services::{food_subtotal, DeliveryPricing};
use serde::{Deserialize, Serialize};

/// A request to show a screen, with whatever that screen needs on entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// Service picker, the start of every order.
    SendServices,
    /// Store listing with search.
    Shop,
    /// Menu of the store with this id.
    StoreMenu(String),
    /// Route builder. The flag draws attention to the current location row.
    FoodiesRoute { highlight_current_location: bool },
    /// Delivery mode selection, priced from the session.
    DeliverySelection,
    /// Order confirmation; the state is validated before the screen opens.
    ConfirmDelivery(NavigationState),
    /// Placed order waiting for a driver.
    WaitingForDriver(DriverWaitPayload),
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::SendServices => "send-services",
            Route::Shop => "shop",
            Route::StoreMenu(_) => "store-menu",
            Route::FoodiesRoute { .. } => "foodies-route",
            Route::DeliverySelection => "delivery-selection",
            Route::ConfirmDelivery(_) => "confirm-delivery",
            Route::WaitingForDriver(_) => "waiting-for-delivery-driver",
        }
    }
}

/// Everything the confirmation screen needs, already checked for
/// consistency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmDeliveryPayload {
    pub delivery_mode: DeliveryMode,
    pub total_food_price: Price,
    pub total_price: Price,
    pub cart_items: Vec<CartItem>,
    pub current_location_food_ids: Vec<String>,
    pub stops: Vec<Stop>,
}

impl ConfirmDeliveryPayload {
    /// Builds the payload from the chosen mode and the session contents,
    /// computing both totals here so nothing downstream recomputes them.
    pub fn new(
        delivery_mode: DeliveryMode,
        cart_items: Vec<CartItem>,
        current_location_food_ids: Vec<String>,
        stops: Vec<Stop>,
    ) -> DomainResult<Self> {
        let pricing = DeliveryPricing::for_cart(&cart_items)?;
        pricing.verify(&delivery_mode)?;
        Ok(Self {
            total_food_price: pricing.subtotal(),
            total_price: pricing.total_with(&delivery_mode)?,
            delivery_mode,
            cart_items,
            current_location_food_ids,
            stops,
        })
    }

    pub fn delivery_fee(&self) -> Price {
        self.delivery_mode.price
    }
}

/// Loosely typed navigation state as it may arrive at the confirmation
/// screen. Every field is optional until validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigationState {
    pub delivery_mode: Option<DeliveryMode>,
    pub total_food_price: Option<Price>,
    pub total_price: Option<Price>,
    pub cart_items: Option<Vec<CartItem>>,
    pub current_location_food_ids: Option<Vec<String>>,
    pub stops: Option<Vec<Stop>>,
}

impl From<ConfirmDeliveryPayload> for NavigationState {
    fn from(payload: ConfirmDeliveryPayload) -> Self {
        Self {
            delivery_mode: Some(payload.delivery_mode),
            total_food_price: Some(payload.total_food_price),
            total_price: Some(payload.total_price),
            cart_items: Some(payload.cart_items),
            current_location_food_ids: Some(payload.current_location_food_ids),
            stops: Some(payload.stops),
        }
    }
}

impl NavigationState {
    /// Validates the state at the entry of the confirmation screen.
    ///
    /// The delivery mode is required. Cart items and stops default to empty.
    /// Totals, when present, must agree with the cart and the mode's fee.
    pub fn into_confirm_payload(self) -> DomainResult<ConfirmDeliveryPayload> {
        let delivery_mode = self
            .delivery_mode
            .ok_or(DomainError::MissingNavigationField("deliveryMode"))?;
        let cart_items = self.cart_items.unwrap_or_default();
        let subtotal = food_subtotal(&cart_items)?;

        if let Some(total_food_price) = self.total_food_price {
            if total_food_price != subtotal {
                return Err(DomainError::TotalMismatch {
                    expected: subtotal,
                    actual: total_food_price,
                });
            }
        }
        if let Some(total_price) = self.total_price {
            let expected = subtotal
                .checked_add(delivery_mode.price)
                .ok_or(DomainError::PriceOverflow)?;
            if total_price != expected {
                return Err(DomainError::TotalMismatch { expected, actual: total_price });
            }
        }

        ConfirmDeliveryPayload::new(
            delivery_mode,
            cart_items,
            self.current_location_food_ids.unwrap_or_default(),
            self.stops.unwrap_or_default(),
        )
    }
}

/// Handed to the driver-waiting screen once the order is placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverWaitPayload {
    pub delivery_mode: DeliveryMode,
    pub total_price: Price,
    pub cart_items: Vec<CartItem>,
    pub stops: Vec<Stop>,
}

impl From<ConfirmDeliveryPayload> for DriverWaitPayload {
    fn from(payload: ConfirmDeliveryPayload) -> Self {
        Self {
            delivery_mode: payload.delivery_mode,
            total_price: payload.total_price,
            cart_items: payload.cart_items,
            stops: payload.stops,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DeliveryModeId;

    fn cart(prices: &[Price]) -> Vec<CartItem> {
        prices
            .iter()
            .enumerate()
            .map(|(i, price)| CartItem {
                id: format!("food-{i}"),
                name: format!("Food {i}"),
                price: *price,
                image: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_payload_totals() {
        let mode = DeliveryPricing::new(100).mode(DeliveryModeId::Motorbike);
        let payload = ConfirmDeliveryPayload::new(mode, cart(&[70, 30]), Vec::new(), Vec::new()).unwrap();
        assert_eq!(payload.total_food_price, 100);
        assert_eq!(payload.delivery_fee(), 15);
        assert_eq!(payload.total_price, 115);
    }

    #[test]
    fn test_payload_rejects_mode_priced_for_another_cart() {
        let mode = DeliveryPricing::new(1000).mode(DeliveryModeId::Car);
        let result = ConfirmDeliveryPayload::new(mode, cart(&[100]), Vec::new(), Vec::new());
        assert!(matches!(result, Err(DomainError::TotalMismatch { .. })));
    }

    #[test]
    fn test_missing_mode_is_rejected() {
        let state = NavigationState {
            cart_items: Some(cart(&[100])),
            total_food_price: Some(100),
            ..NavigationState::default()
        };
        assert_eq!(
            state.into_confirm_payload(),
            Err(DomainError::MissingNavigationField("deliveryMode"))
        );
    }

    #[test]
    fn test_state_round_trips_through_typed_payload() {
        let mode = DeliveryPricing::new(300).mode(DeliveryModeId::Bicycle);
        let payload = ConfirmDeliveryPayload::new(mode, cart(&[300]), vec!["food-0".to_string()], Vec::new()).unwrap();
        let state = NavigationState::from(payload.clone());
        assert_eq!(state.into_confirm_payload(), Ok(payload));
    }

    #[test]
    fn test_tampered_total_is_rejected() {
        let mode = DeliveryPricing::new(100).mode(DeliveryModeId::Motorbike);
        let mut state = NavigationState::from(
            ConfirmDeliveryPayload::new(mode, cart(&[100]), Vec::new(), Vec::new()).unwrap(),
        );
        state.total_price = Some(100);
        assert_eq!(
            state.into_confirm_payload(),
            Err(DomainError::TotalMismatch { expected: 115, actual: 100 })
        );
    }

    #[test]
    fn test_state_from_json() {
        let json = r#"{
            "deliveryMode": {
                "id": "motorbike", "name": "Motorbike", "description": "Balanced speed",
                "time": "20-30 min", "price": 15, "icon": "🏍️", "category": "recommended"
            },
            "totalFoodPrice": 100,
            "totalPrice": 115,
            "cartItems": [{"id": "nshima", "name": "Nshima", "price": 100, "image": "nshima.jpg"}],
            "stops": [{"id": "stop-1", "address": "Cairo Road", "foodIds": []}]
        }"#;
        let state: NavigationState = serde_json::from_str(json).unwrap();
        let payload = state.into_confirm_payload().unwrap();
        assert_eq!(payload.total_price, 115);
        assert_eq!(payload.stops.len(), 1);
        assert!(payload.current_location_food_ids.is_empty());
    }

    #[test]
    fn test_empty_json_state_has_no_mode() {
        let state: NavigationState = serde_json::from_str("{}").unwrap();
        assert!(state.into_confirm_payload().is_err());
    }

    #[test]
    fn test_huge_mode_price_from_json_is_rejected() {
        let json = format!(
            r#"{{
                "deliveryMode": {{
                    "id": "car", "name": "Car", "description": "Fast delivery",
                    "time": "15-25 min", "price": {}, "icon": "🚗", "category": "faster"
                }},
                "totalPrice": 0,
                "cartItems": [{{"id": "nshima", "name": "Nshima", "price": 100, "image": ""}}]
            }}"#,
            u64::MAX
        );
        let state: NavigationState = serde_json::from_str(&json).unwrap();
        assert_eq!(state.into_confirm_payload(), Err(DomainError::PriceOverflow));
    }

    #[test]
    fn test_cart_that_overflows_is_rejected() {
        let state = NavigationState {
            delivery_mode: Some(DeliveryPricing::new(100).mode(DeliveryModeId::Motorbike)),
            cart_items: Some(cart(&[u64::MAX, 5])),
            ..NavigationState::default()
        };
        assert_eq!(state.into_confirm_payload(), Err(DomainError::PriceOverflow));

        let mode = DeliveryPricing::new(u64::MAX).mode(DeliveryModeId::Bicycle);
        let result = ConfirmDeliveryPayload::new(mode, cart(&[u64::MAX]), Vec::new(), Vec::new());
        assert_eq!(result, Err(DomainError::PriceOverflow));
    }
}
