//! Service picker, store listing and store menu screens.

use super::cursor::step;
use crate::domain::{FoodOrderSession, Route, ServiceOption, Store, FOODIES_SERVICE_ID, SERVICES};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct SendServicePicker {
    pub cursor: usize,
    /// Id of the highlighted non-food service
    pub selected_service: Option<&'static str>,
}

impl SendServicePicker {
    pub fn services(&self) -> &'static [ServiceOption] {
        &SERVICES
    }

    pub fn move_cursor(&mut self, delta: isize) {
        self.cursor = step(self.cursor, delta, SERVICES.len());
    }

    /// Foodies leads into the shop; every other service only highlights.
    pub fn select_service(&mut self, service_id: &str) -> Option<Route> {
        if service_id == FOODIES_SERVICE_ID {
            return Some(Route::Shop);
        }
        match SERVICES.iter().find(|service| service.id == service_id) {
            Some(service) => self.selected_service = Some(service.id),
            None => warn!(service = service_id, "unknown service"),
        }
        None
    }

    pub fn activate(&mut self) -> Option<Route> {
        let id = SERVICES[self.cursor].id;
        self.select_service(id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShopScreen {
    pub search_query: String,
    /// Keystrokes go to the search box while set
    pub searching: bool,
    /// Row within the filtered store list
    pub cursor: usize,
}

impl ShopScreen {
    /// Stores whose name contains the search query, ignoring case.
    pub fn visible_stores<'a>(&self, catalog: &'a [Store]) -> Vec<&'a Store> {
        let needle = self.search_query.trim().to_lowercase();
        catalog
            .iter()
            .filter(|store| needle.is_empty() || store.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn start_search(&mut self) {
        self.searching = true;
    }

    pub fn finish_search(&mut self) {
        self.searching = false;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_query.push(c);
        self.cursor = 0;
    }

    pub fn pop_search_char(&mut self) {
        self.search_query.pop();
        self.cursor = 0;
    }

    pub fn move_cursor(&mut self, delta: isize, catalog: &[Store]) {
        self.cursor = step(self.cursor, delta, self.visible_stores(catalog).len());
    }

    pub fn open_store(&self, catalog: &[Store]) -> Option<Route> {
        self.visible_stores(catalog)
            .get(self.cursor)
            .map(|store| Route::StoreMenu(store.id.clone()))
    }

    pub fn back(&self) -> Route {
        Route::SendServices
    }
}

#[derive(Debug, Clone)]
pub struct StoreMenuScreen {
    pub store_id: String,
    pub cursor: usize,
}

impl StoreMenuScreen {
    pub fn new(store_id: String) -> Self {
        Self { store_id, cursor: 0 }
    }

    pub fn store<'a>(&self, catalog: &'a [Store]) -> Option<&'a Store> {
        catalog.iter().find(|store| store.id == self.store_id)
    }

    pub fn move_cursor(&mut self, delta: isize, catalog: &[Store]) {
        let len = self.store(catalog).map_or(0, |store| store.foods.len());
        self.cursor = step(self.cursor, delta, len);
    }

    /// Adds the highlighted food to the cart, or takes it out if present.
    pub fn toggle_food(&self, catalog: &[Store], session: &mut FoodOrderSession) {
        let Some(food) = self.store(catalog).and_then(|store| store.foods.get(self.cursor)) else {
            return;
        };
        if session.is_in_cart(&food.id) {
            if let Err(err) = session.remove_from_cart(&food.id) {
                warn!(%err, "remove from cart failed");
            }
        } else {
            session.add_to_cart(food);
        }
    }

    pub fn can_checkout(&self, session: &FoodOrderSession) -> bool {
        !session.cart_items().is_empty()
    }

    pub fn checkout(&self, session: &FoodOrderSession) -> Option<Route> {
        if !self.can_checkout(session) {
            debug!("checkout disabled: empty cart");
            return None;
        }
        Some(Route::FoodiesRoute {
            highlight_current_location: false,
        })
    }

    pub fn back(&self) -> Route {
        Route::Shop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FoodItem;

    fn catalog() -> Vec<Store> {
        let food = |id: &str, price| FoodItem {
            id: id.to_string(),
            name: id.to_string(),
            price,
            image: String::new(),
        };
        vec![
            Store {
                id: "hungry-lion".to_string(),
                name: "Hungry Lion".to_string(),
                image: String::new(),
                foods: vec![food("chicken", 85), food("chips", 30)],
            },
            Store {
                id: "debonairs".to_string(),
                name: "Debonairs Pizza".to_string(),
                image: String::new(),
                foods: vec![food("pizza", 120)],
            },
        ]
    }

    #[test]
    fn test_foodies_routes_to_shop() {
        let mut picker = SendServicePicker::default();
        assert_eq!(picker.select_service("foodies"), Some(Route::Shop));
        assert!(picker.selected_service.is_none());
    }

    #[test]
    fn test_other_services_only_highlight() {
        let mut picker = SendServicePicker::default();
        assert_eq!(picker.select_service("truck"), None);
        assert_eq!(picker.selected_service, Some("truck"));
        assert_eq!(picker.activate(), None);
        assert_eq!(picker.selected_service, Some("package"));
    }

    #[test]
    fn test_search_filters_stores() {
        let catalog = catalog();
        let mut shop = ShopScreen::default();
        for c in "PIZ".chars() {
            shop.push_search_char(c);
        }
        let visible = shop.visible_stores(&catalog);
        assert_eq!(visible.len(), 1);
        assert_eq!(shop.open_store(&catalog), Some(Route::StoreMenu("debonairs".to_string())));
    }

    #[test]
    fn test_open_store_with_no_match() {
        let catalog = catalog();
        let mut shop = ShopScreen::default();
        for c in "sushi".chars() {
            shop.push_search_char(c);
        }
        assert!(shop.visible_stores(&catalog).is_empty());
        assert_eq!(shop.open_store(&catalog), None);
    }

    #[test]
    fn test_store_menu_toggles_cart() {
        let catalog = catalog();
        let mut session = FoodOrderSession::default();
        let mut menu = StoreMenuScreen::new("hungry-lion".to_string());
        assert_eq!(menu.checkout(&session), None);

        menu.toggle_food(&catalog, &mut session);
        menu.move_cursor(1, &catalog);
        menu.toggle_food(&catalog, &mut session);
        assert_eq!(session.subtotal(), 115);

        menu.toggle_food(&catalog, &mut session);
        assert_eq!(session.subtotal(), 85);
        assert_eq!(
            menu.checkout(&session),
            Some(Route::FoodiesRoute { highlight_current_location: false })
        );
    }
}
