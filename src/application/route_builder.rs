//! The "Foodies Route" screen: current-location food plus extra stops.

use super::cursor::step;
use crate::domain::{
    AddressDirectory, AddressSuggestion, Destination, FoodOrderSession, LocationStatus, Route, StopUpdate,
};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Number of directory entries listed while no stop is being edited.
pub const RECENT_PLACES: usize = 7;

/// Which destination the food picker overlay is editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerTarget {
    CurrentLocation,
    /// Stop id
    Stop(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodPicker {
    pub target: PickerTarget,
    /// Highlighted cart item
    pub cursor: usize,
}

#[derive(Debug, Clone)]
pub struct RouteBuilder {
    /// Set when returning from delivery selection so the current location
    /// row stands out.
    pub highlight_current_location: bool,
    /// Address shown for the current location. Filled once from the
    /// location resolver, and only while still empty.
    pub delivery_location: String,
    /// True until the location resolver first yields.
    pub location_loading: bool,
    location_hydrated: bool,
    /// Stop whose address input currently has focus.
    pub active_stop_input: Option<String>,
    /// Typed, uncommitted address text per stop id.
    pub stop_address_queries: HashMap<String, String>,
    /// Highlighted row in the suggestion list.
    pub suggestion_cursor: usize,
    /// Row 0 is the current location, rows 1.. are the stops in order.
    pub cursor: usize,
    /// Open food picker overlay, if any.
    pub food_picker: Option<FoodPicker>,
}

impl RouteBuilder {
    pub fn new(highlight_current_location: bool) -> Self {
        Self {
            highlight_current_location,
            delivery_location: String::new(),
            location_loading: true,
            location_hydrated: false,
            active_stop_input: None,
            stop_address_queries: HashMap::new(),
            suggestion_cursor: 0,
            cursor: 0,
            food_picker: None,
        }
    }

    /// Applies the first resolved position. Later results are ignored, and a
    /// non-empty field is never overwritten.
    pub fn hydrate_location(&mut self, status: LocationStatus) {
        if self.location_hydrated {
            return;
        }
        if let LocationStatus::Resolved(address) = status {
            if self.delivery_location.is_empty() {
                debug!(%address, "delivery location hydrated");
                self.delivery_location = address;
            }
            self.location_loading = false;
            self.location_hydrated = true;
        }
    }

    pub fn location_placeholder(&self) -> &'static str {
        if self.location_loading {
            "Getting your location..."
        } else {
            "Search delivery location"
        }
    }

    pub fn can_add_stop(&self, session: &FoodOrderSession) -> bool {
        session.can_add_stop()
    }

    /// Adds an empty stop and focuses its address input. Does nothing once
    /// the stop limit is reached.
    pub fn add_stop(&mut self, session: &mut FoodOrderSession) {
        match session.add_stop() {
            Ok(id) => {
                self.cursor = session.stops().len();
                self.focus_stop_input(id);
            }
            Err(err) => debug!(%err, "add stop ignored"),
        }
    }

    pub fn remove_stop(&mut self, session: &mut FoodOrderSession, stop_id: &str) {
        if let Err(err) = session.remove_stop(stop_id) {
            warn!(%err, "remove stop failed");
        }
        self.stop_address_queries.remove(stop_id);
        self.active_stop_input = None;
        if matches!(&self.food_picker, Some(FoodPicker { target: PickerTarget::Stop(id), .. }) if id == stop_id) {
            self.food_picker = None;
        }
        self.cursor = self.cursor.min(session.stops().len());
    }

    /// Stop id under the row cursor, if the cursor is on a stop row.
    pub fn stop_at_cursor(&self, session: &FoodOrderSession) -> Option<String> {
        self.cursor
            .checked_sub(1)
            .and_then(|index| session.stops().get(index))
            .map(|stop| stop.id.clone())
    }

    pub fn move_cursor(&mut self, delta: isize, session: &FoodOrderSession) {
        self.cursor = step(self.cursor, delta, session.stops().len() + 1);
    }

    pub fn focus_stop_input(&mut self, stop_id: String) {
        self.active_stop_input = Some(stop_id);
        self.suggestion_cursor = 0;
    }

    pub fn blur_stop_input(&mut self) {
        self.active_stop_input = None;
    }

    /// Typing into a stop's address drops any committed address and filters
    /// the suggestion list by what has been typed so far.
    pub fn edit_stop_address(&mut self, session: &mut FoodOrderSession, stop_id: &str, query: String) {
        let committed = session.stop(stop_id).is_some_and(|stop| !stop.address.is_empty());
        if committed {
            let cleared = StopUpdate {
                address: Some(String::new()),
                description: Some(String::new()),
            };
            if let Err(err) = session.update_stop(stop_id, cleared) {
                warn!(%err, "could not clear stop address");
                return;
            }
        }
        self.stop_address_queries.insert(stop_id.to_string(), query);
        self.focus_stop_input(stop_id.to_string());
    }

    pub fn push_query_char(&mut self, session: &mut FoodOrderSession, c: char) {
        let Some(stop_id) = self.active_stop_input.clone() else {
            return;
        };
        let mut query = self.query_for(&stop_id).to_string();
        query.push(c);
        self.edit_stop_address(session, &stop_id, query);
    }

    pub fn pop_query_char(&mut self, session: &mut FoodOrderSession) {
        let Some(stop_id) = self.active_stop_input.clone() else {
            return;
        };
        let mut query = self.query_for(&stop_id).to_string();
        query.pop();
        self.edit_stop_address(session, &stop_id, query);
    }

    pub fn query_for(&self, stop_id: &str) -> &str {
        self.stop_address_queries.get(stop_id).map(String::as_str).unwrap_or("")
    }

    /// Text shown in a stop's input: the committed address, else the query.
    pub fn stop_input_text<'a>(&'a self, session: &'a FoodOrderSession, stop_id: &str) -> &'a str {
        match session.stop(stop_id) {
            Some(stop) if !stop.address.is_empty() => &stop.address,
            _ => self.query_for(stop_id),
        }
    }

    /// Suggestions for the focused stop, or the recent places list.
    pub fn suggestions<'a>(&self, directory: &'a AddressDirectory) -> Vec<&'a AddressSuggestion> {
        match &self.active_stop_input {
            Some(stop_id) => directory.suggestions(self.query_for(stop_id)),
            None => directory.recent(RECENT_PLACES).iter().collect(),
        }
    }

    pub fn move_suggestion_cursor(&mut self, delta: isize, directory: &AddressDirectory) {
        self.suggestion_cursor = step(self.suggestion_cursor, delta, self.suggestions(directory).len());
    }

    /// Commits an address to a stop and closes the suggestion list.
    pub fn select_address(
        &mut self,
        session: &mut FoodOrderSession,
        stop_id: &str,
        address: String,
        description: String,
    ) {
        let update = StopUpdate {
            address: Some(address),
            description: Some(description),
        };
        if let Err(err) = session.update_stop(stop_id, update) {
            warn!(%err, "could not commit stop address");
            return;
        }
        self.active_stop_input = None;
        self.stop_address_queries.insert(stop_id.to_string(), String::new());
    }

    pub fn select_suggestion_at_cursor(&mut self, session: &mut FoodOrderSession, directory: &AddressDirectory) {
        let Some(stop_id) = self.active_stop_input.clone() else {
            return;
        };
        let Some(suggestion) = self.suggestions(directory).get(self.suggestion_cursor).copied() else {
            return;
        };
        self.select_address(session, &stop_id, suggestion.address.clone(), suggestion.description.clone());
    }

    pub fn can_go_to_delivery(&self, session: &FoodOrderSession) -> bool {
        !session.current_location_foods().is_empty()
    }

    /// Prunes empty stops and moves on to delivery selection. Disabled while
    /// no food is going to the current location.
    pub fn go_to_delivery(&mut self, session: &mut FoodOrderSession) -> Option<Route> {
        if !self.can_go_to_delivery(session) {
            debug!("go to delivery disabled: no food for current location");
            return None;
        }
        let removed = session.remove_stops_without_food_or_address();
        info!(stops = session.stops().len(), removed, "route finalized");
        Some(Route::DeliverySelection)
    }

    /// The current-location picker needs something in the cart; a stop's
    /// picker needs at least two items so one can stay behind.
    pub fn can_open_food_picker(&self, session: &FoodOrderSession, target: &PickerTarget) -> bool {
        match target {
            PickerTarget::CurrentLocation => !session.cart_items().is_empty(),
            PickerTarget::Stop(stop_id) => session.cart_items().len() >= 2 && session.stop(stop_id).is_some(),
        }
    }

    pub fn open_food_picker(&mut self, session: &FoodOrderSession, target: PickerTarget) {
        if !self.can_open_food_picker(session, &target) {
            debug!(?target, "food picker disabled");
            return;
        }
        self.food_picker = Some(FoodPicker { target, cursor: 0 });
    }

    pub fn close_food_picker(&mut self) {
        self.food_picker = None;
    }

    pub fn move_picker_cursor(&mut self, delta: isize, session: &FoodOrderSession) {
        if let Some(picker) = &mut self.food_picker {
            picker.cursor = step(picker.cursor, delta, session.cart_items().len());
        }
    }

    /// Toggles the highlighted cart item in or out of the picker's target.
    pub fn toggle_picker_item(&mut self, session: &mut FoodOrderSession) {
        let Some(picker) = &self.food_picker else {
            return;
        };
        let Some(food_id) = session.cart_items().get(picker.cursor).map(|item| item.id.clone()) else {
            return;
        };
        let result = match &picker.target {
            PickerTarget::CurrentLocation => session.toggle_food(&food_id, Destination::CurrentLocation),
            PickerTarget::Stop(stop_id) => session.toggle_food(&food_id, Destination::Stop(stop_id)),
        };
        if let Err(err) = result {
            warn!(%err, "food toggle failed");
        }
    }

    pub fn back(&self) -> Route {
        Route::Shop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FoodItem;

    fn session(count: usize) -> FoodOrderSession {
        let mut session = FoodOrderSession::new(2);
        for i in 0..count {
            session.add_to_cart(&FoodItem {
                id: format!("food-{i}"),
                name: format!("Food {i}"),
                price: 40,
                image: String::new(),
            });
        }
        session
    }

    fn directory() -> AddressDirectory {
        let entry = |id: &str, name: &str, address: &str| AddressSuggestion {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("{name} area"),
            distance: None,
            address: address.to_string(),
        };
        AddressDirectory::new(vec![
            entry("1", "Cairo Road", "Cairo Road, Lusaka"),
            entry("2", "Manda Hill", "Great East Road, Lusaka"),
            entry("3", "Woodlands", "Woodlands, Lusaka"),
        ])
    }

    #[test]
    fn test_hydration_fills_empty_field_once() {
        let mut builder = RouteBuilder::new(false);
        assert_eq!(builder.location_placeholder(), "Getting your location...");

        builder.hydrate_location(LocationStatus::Loading);
        assert!(builder.location_loading);

        builder.hydrate_location(LocationStatus::Resolved("Rhodes Park, Lusaka".to_string()));
        assert_eq!(builder.delivery_location, "Rhodes Park, Lusaka");
        assert!(!builder.location_loading);

        builder.hydrate_location(LocationStatus::Resolved("Somewhere else".to_string()));
        assert_eq!(builder.delivery_location, "Rhodes Park, Lusaka");
    }

    #[test]
    fn test_hydration_never_overwrites_user_value() {
        let mut builder = RouteBuilder::new(false);
        builder.delivery_location = "Typed by user".to_string();
        builder.hydrate_location(LocationStatus::Resolved("GPS address".to_string()));
        assert_eq!(builder.delivery_location, "Typed by user");
        assert!(!builder.location_loading);
    }

    #[test]
    fn test_add_stop_focuses_input_and_respects_limit() {
        let mut session = session(2);
        let mut builder = RouteBuilder::new(false);
        builder.add_stop(&mut session);
        let first = session.stops()[0].id.clone();
        assert_eq!(builder.active_stop_input.as_deref(), Some(first.as_str()));

        builder.add_stop(&mut session);
        assert!(!builder.can_add_stop(&session));
        builder.add_stop(&mut session);
        assert_eq!(session.stops().len(), 2);
    }

    #[test]
    fn test_edit_then_select_address() {
        let mut session = session(2);
        let directory = directory();
        let mut builder = RouteBuilder::new(false);
        builder.add_stop(&mut session);
        let stop = session.stops()[0].id.clone();

        for c in "mand".chars() {
            builder.push_query_char(&mut session, c);
        }
        let suggestions = builder.suggestions(&directory);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].id, "2");

        builder.select_suggestion_at_cursor(&mut session, &directory);
        let committed = session.stop(&stop).unwrap();
        assert_eq!(committed.address, "Great East Road, Lusaka");
        assert_eq!(committed.description, "Manda Hill area");
        assert!(builder.active_stop_input.is_none());
        assert_eq!(builder.query_for(&stop), "");
    }

    #[test]
    fn test_editing_clears_committed_address() {
        let mut session = session(2);
        let mut builder = RouteBuilder::new(false);
        builder.add_stop(&mut session);
        let stop = session.stops()[0].id.clone();
        builder.select_address(&mut session, &stop, "Cairo Road, Lusaka".to_string(), "CBD".to_string());
        assert_eq!(builder.stop_input_text(&session, &stop), "Cairo Road, Lusaka");

        builder.edit_stop_address(&mut session, &stop, "wood".to_string());
        assert_eq!(session.stop(&stop).unwrap().address, "");
        assert_eq!(builder.stop_input_text(&session, &stop), "wood");
        assert_eq!(builder.active_stop_input.as_deref(), Some(stop.as_str()));
    }

    #[test]
    fn test_recent_places_without_focus() {
        let builder = RouteBuilder::new(false);
        assert_eq!(builder.suggestions(&directory()).len(), 3);
    }

    #[test]
    fn test_go_to_delivery_gated_on_current_location_food() {
        let mut session = session(1);
        let mut builder = RouteBuilder::new(false);
        assert!(builder.can_go_to_delivery(&session));

        session.toggle_food("food-0", Destination::CurrentLocation).unwrap();
        assert!(!builder.can_go_to_delivery(&session));
        assert!(builder.go_to_delivery(&mut session).is_none());
    }

    #[test]
    fn test_go_to_delivery_disabled_when_stops_hold_every_item() {
        let mut session = session(2);
        let mut builder = RouteBuilder::new(false);
        builder.add_stop(&mut session);
        let stop = session.stops()[0].id.clone();
        builder.select_address(&mut session, &stop, "Cairo Road, Lusaka".to_string(), String::new());
        session.assign_food("food-0", Destination::Stop(&stop)).unwrap();
        session.assign_food("food-1", Destination::Stop(&stop)).unwrap();

        assert!(session.current_location_foods().is_empty());
        assert!(!builder.can_go_to_delivery(&session));
        assert!(builder.go_to_delivery(&mut session).is_none());
        assert_eq!(session.stops().len(), 1);
    }

    #[test]
    fn test_go_to_delivery_prunes_empty_stops() {
        let mut session = session(2);
        let mut builder = RouteBuilder::new(false);
        builder.add_stop(&mut session);
        builder.add_stop(&mut session);
        let kept = session.stops()[1].id.clone();
        builder.select_address(&mut session, &kept, "Woodlands, Lusaka".to_string(), String::new());

        assert_eq!(builder.go_to_delivery(&mut session), Some(Route::DeliverySelection));
        assert_eq!(session.stops().len(), 1);
        assert_eq!(session.stops()[0].id, kept);
    }

    #[test]
    fn test_stop_picker_needs_two_items() {
        let mut session = session(1);
        let mut builder = RouteBuilder::new(false);
        builder.add_stop(&mut session);
        let stop = session.stops()[0].id.clone();

        builder.open_food_picker(&session, PickerTarget::Stop(stop.clone()));
        assert!(builder.food_picker.is_none());

        session.add_to_cart(&FoodItem {
            id: "extra".to_string(),
            name: "Extra".to_string(),
            price: 10,
            image: String::new(),
        });
        builder.open_food_picker(&session, PickerTarget::Stop(stop.clone()));
        assert!(builder.food_picker.is_some());

        builder.toggle_picker_item(&mut session);
        assert_eq!(session.stop(&stop).unwrap().food_ids, vec!["food-0".to_string()]);
    }

    #[test]
    fn test_remove_stop_closes_its_picker() {
        let mut session = session(2);
        let mut builder = RouteBuilder::new(false);
        builder.add_stop(&mut session);
        let stop = session.stops()[0].id.clone();
        builder.open_food_picker(&session, PickerTarget::Stop(stop.clone()));

        builder.remove_stop(&mut session, &stop);
        assert!(session.stops().is_empty());
        assert!(builder.food_picker.is_none());
        assert!(builder.active_stop_input.is_none());
        assert_eq!(builder.cursor, 0);
    }
}
