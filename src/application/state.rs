//! Application state for the delivery flow.
//!
//! `App` owns the session and the active screen. Screens borrow the session
//! for each operation and answer with an optional [`Route`]; `App::navigate`
//! turns that into the next screen, validating payloads on the way in.

use super::confirm::ConfirmScreen;
use super::delivery::DeliverySelector;
use super::route_builder::RouteBuilder;
use super::shop::{SendServicePicker, ShopScreen, StoreMenuScreen};
use crate::domain::{AddressDirectory, DriverWaitPayload, FoodOrderSession, LocationResolver, Route, Store};
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub const DEFAULT_CONFIRM_DELAY: Duration = Duration::from_millis(1500);

/// Tunables for the flow, resolved from configuration at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowSettings {
    /// Upper bound on extra stops per order
    pub max_stops: usize,
    /// Simulated backend delay after the order is confirmed
    pub confirm_delay: Duration,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            max_stops: crate::domain::DEFAULT_MAX_STOPS,
            confirm_delay: DEFAULT_CONFIRM_DELAY,
        }
    }
}

/// The screen currently on display, with its local state.
#[derive(Debug)]
pub enum Screen {
    /// Choosing what to send
    SendServices(SendServicePicker),
    /// Browsing and searching stores
    Shop(ShopScreen),
    /// Adding one store's foods to the cart
    StoreMenu(StoreMenuScreen),
    /// Splitting the cart between the current location and stops
    FoodiesRoute(RouteBuilder),
    /// Picking a delivery mode and payment method
    DeliverySelection(DeliverySelector),
    /// Reviewing totals and placing the order
    ConfirmDelivery(ConfirmScreen),
    /// Order placed, nothing left to edit
    WaitingForDriver(DriverWaitPayload),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::SendServices(_) => "send-services",
            Screen::Shop(_) => "shop",
            Screen::StoreMenu(_) => "store-menu",
            Screen::FoodiesRoute(_) => "foodies-route",
            Screen::DeliverySelection(_) => "delivery-selection",
            Screen::ConfirmDelivery(_) => "confirm-delivery",
            Screen::WaitingForDriver(_) => "waiting-for-delivery-driver",
        }
    }
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use aletwende::application::{App, FlowSettings, Screen};
/// use aletwende::domain::{AddressDirectory, LocationResolver, LocationStatus, Route};
/// use std::time::Instant;
///
/// struct Nowhere;
/// impl LocationResolver for Nowhere {
///     fn poll(&mut self, _now: Instant) -> LocationStatus {
///         LocationStatus::Loading
///     }
/// }
///
/// let mut app = App::new(Vec::new(), AddressDirectory::default(), FlowSettings::default(), Box::new(Nowhere));
/// assert!(matches!(app.screen, Screen::SendServices(_)));
///
/// // The route builder has nothing to show without a cart.
/// app.navigate(Route::FoodiesRoute { highlight_current_location: false });
/// assert!(matches!(app.screen, Screen::Shop(_)));
/// ```
pub struct App {
    /// Cart and stops shared by every screen of the order
    pub session: FoodOrderSession,
    /// Stores available in the shop
    pub catalog: Vec<Store>,
    /// Known addresses offered as stop suggestions
    pub addresses: AddressDirectory,
    /// Screen currently on display
    pub screen: Screen,
    pub settings: FlowSettings,
    location: Box<dyn LocationResolver>,
    /// Set by the quit keys; the event loop exits on the next pass
    pub should_quit: bool,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("session", &self.session)
            .field("screen", &self.screen)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl App {
    pub fn new(
        catalog: Vec<Store>,
        addresses: AddressDirectory,
        settings: FlowSettings,
        location: Box<dyn LocationResolver>,
    ) -> Self {
        Self {
            session: FoodOrderSession::new(settings.max_stops),
            catalog,
            addresses,
            screen: Screen::SendServices(SendServicePicker::default()),
            settings,
            location,
            should_quit: false,
        }
    }

    /// Replaces the active screen. The previous screen, and anything it was
    /// waiting on, is dropped.
    pub fn navigate(&mut self, route: Route) {
        info!(from = self.screen.name(), to = route.name(), "navigate");
        self.screen = match route {
            Route::SendServices => Screen::SendServices(SendServicePicker::default()),
            Route::Shop => Screen::Shop(ShopScreen::default()),
            Route::StoreMenu(store_id) => {
                if !self.catalog.iter().any(|store| store.id == store_id) {
                    warn!(store = %store_id, "unknown store, back to shop");
                    return self.navigate(Route::Shop);
                }
                Screen::StoreMenu(StoreMenuScreen::new(store_id))
            }
            Route::FoodiesRoute { highlight_current_location } => {
                if self.session.cart_items().is_empty() {
                    return self.navigate(Route::Shop);
                }
                Screen::FoodiesRoute(RouteBuilder::new(highlight_current_location))
            }
            Route::DeliverySelection => Screen::DeliverySelection(DeliverySelector::new(&self.session)),
            Route::ConfirmDelivery(state) => match ConfirmScreen::enter(state, self.settings.confirm_delay) {
                Ok(screen) => Screen::ConfirmDelivery(screen),
                Err(err) => {
                    warn!(%err, "invalid confirmation state, redirecting");
                    return self.navigate(Route::DeliverySelection);
                }
            },
            Route::WaitingForDriver(payload) => Screen::WaitingForDriver(payload),
        };
    }

    /// Follows a route if a screen operation produced one.
    pub fn follow(&mut self, route: Option<Route>) {
        if let Some(route) = route {
            self.navigate(route);
        }
    }

    /// Advances time-driven state: the confirmation delay and location
    /// hydration.
    pub fn tick(&mut self, now: Instant) {
        let route = match &mut self.screen {
            Screen::ConfirmDelivery(screen) => screen.tick(now),
            Screen::FoodiesRoute(builder) => {
                builder.hydrate_location(self.location.poll(now));
                None
            }
            _ => None,
        };
        self.follow(route);
    }

    /// Starts over after an order has been handed to a driver.
    pub fn start_new_order(&mut self) {
        self.session.reset();
        self.navigate(Route::SendServices);
    }

    /// Whether keystrokes are currently going into a text field.
    pub fn is_typing(&self) -> bool {
        match &self.screen {
            Screen::Shop(shop) => shop.searching,
            Screen::FoodiesRoute(builder) => builder.active_stop_input.is_some() && builder.food_picker.is_none(),
            _ => false,
        }
    }
}
