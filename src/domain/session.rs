//! The in-memory aggregate for one food ordering flow.
//!
//! Every cart item is delivered to at most one destination: either the
//! user's current location or exactly one stop. Items enter the cart assigned
//! to the current location.

use super::errors::{DomainError, DomainResult};
use super::models::{CartItem, FoodItem, Price, Stop, StopUpdate};
use super::services::food_subtotal;
use tracing::debug;

pub const DEFAULT_MAX_STOPS: usize = 3;

/// Where a cart item is going to be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination<'a> {
    CurrentLocation,
    Stop(&'a str),
}

/// Shared session state for the food ordering screens.
///
/// Screens never touch the fields directly; all mutation goes through the
/// methods below so the single-destination invariant holds.
///
/// # Examples
///
/// ```
/// use aletwende::domain::FoodOrderSession;
///
/// let mut session = FoodOrderSession::new(2);
/// let first = session.add_stop().unwrap();
/// session.add_stop().unwrap();
/// assert!(!session.can_add_stop());
/// session.remove_stop(&first).unwrap();
/// assert!(session.can_add_stop());
/// ```
#[derive(Debug, Clone)]
pub struct FoodOrderSession {
    cart_items: Vec<CartItem>,
    current_location_food_ids: Vec<String>,
    stops: Vec<Stop>,
    max_stops: usize,
    next_stop_seq: u64,
}

impl Default for FoodOrderSession {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STOPS)
    }
}

impl FoodOrderSession {
    pub fn new(max_stops: usize) -> Self {
        Self {
            cart_items: Vec::new(),
            current_location_food_ids: Vec::new(),
            stops: Vec::new(),
            max_stops,
            next_stop_seq: 1,
        }
    }

    pub fn cart_items(&self) -> &[CartItem] {
        &self.cart_items
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn current_location_food_ids(&self) -> &[String] {
        &self.current_location_food_ids
    }

    pub fn max_stops(&self) -> usize {
        self.max_stops
    }

    /// Cart total for display and pricing. Saturates at `Price::MAX`; the
    /// confirmation payload rejects such a cart with `PriceOverflow`.
    pub fn subtotal(&self) -> Price {
        food_subtotal(&self.cart_items).unwrap_or(Price::MAX)
    }

    pub fn is_in_cart(&self, food_id: &str) -> bool {
        self.cart_items.iter().any(|item| item.id == food_id)
    }

    /// Adds a catalog food to the cart, delivered to the current location.
    /// Adding a food that is already in the cart does nothing.
    pub fn add_to_cart(&mut self, food: &FoodItem) {
        if self.is_in_cart(&food.id) {
            return;
        }
        self.cart_items.push(CartItem::from(food));
        self.current_location_food_ids.push(food.id.clone());
        debug!(food = %food.id, "added to cart");
    }

    /// Removes an item from the cart along with every assignment of it.
    pub fn remove_from_cart(&mut self, food_id: &str) -> DomainResult<CartItem> {
        let index = self
            .cart_items
            .iter()
            .position(|item| item.id == food_id)
            .ok_or_else(|| DomainError::UnknownFood(food_id.to_string()))?;
        self.unassign(food_id);
        debug!(food = %food_id, "removed from cart");
        Ok(self.cart_items.remove(index))
    }

    pub fn can_add_stop(&self) -> bool {
        self.stops.len() < self.max_stops
    }

    /// Appends an empty stop and returns its id.
    pub fn add_stop(&mut self) -> DomainResult<String> {
        if !self.can_add_stop() {
            return Err(DomainError::StopLimitReached(self.max_stops));
        }
        let id = format!("stop-{}", self.next_stop_seq);
        self.next_stop_seq += 1;
        self.stops.push(Stop::new(id.clone()));
        debug!(stop = %id, "stop added");
        Ok(id)
    }

    /// Drops a stop. Its foods go back to the current location; other stops
    /// keep their assignments.
    pub fn remove_stop(&mut self, stop_id: &str) -> DomainResult<Stop> {
        let index = self.stop_index(stop_id)?;
        let stop = self.stops.remove(index);
        for food_id in &stop.food_ids {
            if !self.current_location_food_ids.contains(food_id) {
                self.current_location_food_ids.push(food_id.clone());
            }
        }
        debug!(stop = %stop_id, foods = stop.food_ids.len(), "stop removed");
        Ok(stop)
    }

    pub fn update_stop(&mut self, stop_id: &str, update: StopUpdate) -> DomainResult<()> {
        let index = self.stop_index(stop_id)?;
        let stop = &mut self.stops[index];
        if let Some(address) = update.address {
            stop.address = address;
        }
        if let Some(description) = update.description {
            stop.description = description;
        }
        Ok(())
    }

    pub fn stop(&self, stop_id: &str) -> Option<&Stop> {
        self.stops.iter().find(|stop| stop.id == stop_id)
    }

    /// Moves a cart item to `destination`, taking it away from wherever it
    /// was before.
    pub fn assign_food(&mut self, food_id: &str, destination: Destination<'_>) -> DomainResult<()> {
        if !self.is_in_cart(food_id) {
            return Err(DomainError::UnknownFood(food_id.to_string()));
        }
        if let Destination::Stop(stop_id) = destination {
            self.stop_index(stop_id)?;
        }

        self.unassign(food_id);
        match destination {
            Destination::CurrentLocation => self.current_location_food_ids.push(food_id.to_string()),
            Destination::Stop(stop_id) => {
                let index = self.stop_index(stop_id)?;
                self.stops[index].food_ids.push(food_id.to_string());
            }
        }
        Ok(())
    }

    /// Removes a cart item from `destination` only. The item stays in the
    /// cart without a destination until it is assigned again.
    pub fn unassign_food(&mut self, food_id: &str, destination: Destination<'_>) -> DomainResult<()> {
        match destination {
            Destination::CurrentLocation => self.current_location_food_ids.retain(|id| id != food_id),
            Destination::Stop(stop_id) => {
                let index = self.stop_index(stop_id)?;
                self.stops[index].food_ids.retain(|id| id != food_id);
            }
        }
        Ok(())
    }

    /// Toggles a cart item in or out of `destination`. Taking an item off a
    /// stop sends it back to the current location; taking it off the current
    /// location leaves it without a destination.
    pub fn toggle_food(&mut self, food_id: &str, destination: Destination<'_>) -> DomainResult<()> {
        if self.destination_of(food_id) != Some(destination) {
            return self.assign_food(food_id, destination);
        }
        match destination {
            Destination::CurrentLocation => self.unassign_food(food_id, destination),
            Destination::Stop(_) => self.assign_food(food_id, Destination::CurrentLocation),
        }
    }

    pub fn destination_of(&self, food_id: &str) -> Option<Destination<'_>> {
        if self.current_location_food_ids.iter().any(|id| id == food_id) {
            return Some(Destination::CurrentLocation);
        }
        self.stops
            .iter()
            .find(|stop| stop.food_ids.iter().any(|id| id == food_id))
            .map(|stop| Destination::Stop(stop.id.as_str()))
    }

    pub fn current_location_foods(&self) -> Vec<&CartItem> {
        self.resolve_foods(&self.current_location_food_ids)
    }

    pub fn stop_foods(&self, stop_id: &str) -> Vec<&CartItem> {
        match self.stop(stop_id) {
            Some(stop) => self.resolve_foods(&stop.food_ids),
            None => Vec::new(),
        }
    }

    /// Drops every stop that has neither an address nor food. Running it
    /// again changes nothing.
    pub fn remove_stops_without_food_or_address(&mut self) -> usize {
        let before = self.stops.len();
        self.stops.retain(|stop| stop.has_address() || stop.has_food());
        let removed = before - self.stops.len();
        if removed > 0 {
            debug!(removed, "pruned empty stops");
        }
        removed
    }

    /// One-line summary of where the food is going, e.g.
    /// `Current Location (2 foods) → Cairo Road (1 food)`.
    pub fn route_summary(&self) -> String {
        let mut parts = Vec::new();

        let current = self.current_location_foods().len();
        if current > 0 {
            parts.push(format!("Current Location ({})", food_count(current)));
        }

        for stop in &self.stops {
            let count = self.stop_foods(&stop.id).len();
            if count > 0 && stop.has_address() {
                let short: String = stop.address.split(',').next().unwrap_or_default().chars().take(15).collect();
                parts.push(format!("{} ({})", short, food_count(count)));
            }
        }

        parts.join(" → ")
    }

    /// Starts a fresh flow, keeping the configured stop bound.
    pub fn reset(&mut self) {
        *self = Self::new(self.max_stops);
    }

    fn stop_index(&self, stop_id: &str) -> DomainResult<usize> {
        self.stops
            .iter()
            .position(|stop| stop.id == stop_id)
            .ok_or_else(|| DomainError::UnknownStop(stop_id.to_string()))
    }

    fn unassign(&mut self, food_id: &str) {
        self.current_location_food_ids.retain(|id| id != food_id);
        for stop in &mut self.stops {
            stop.food_ids.retain(|id| id != food_id);
        }
    }

    fn resolve_foods<'a>(&'a self, ids: &[String]) -> Vec<&'a CartItem> {
        ids.iter()
            .filter_map(|id| self.cart_items.iter().find(|item| &item.id == id))
            .collect()
    }
}

fn food_count(count: usize) -> String {
    if count == 1 {
        "1 food".to_string()
    } else {
        format!("{count} foods")
    }
}
