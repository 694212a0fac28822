//! Delivery pricing services.
//!
//! Delivery modes are never stored; they are generated from the current food
//! subtotal every time a screen needs them.

use super::errors::{DomainError, DomainResult};
use super::models::{CartItem, DeliveryCategory, DeliveryMode, DeliveryModeId, Price};

/// Static pricing parameters for one delivery mode.
struct ModeRate {
    id: DeliveryModeId,
    name: &'static str,
    description: &'static str,
    time: &'static str,
    icon: &'static str,
    category: DeliveryCategory,
    /// Fee as a percentage of the food subtotal.
    rate_percent: u64,
    minimum_fee: Price,
}

const MODE_RATES: [ModeRate; 3] = [
    ModeRate {
        id: DeliveryModeId::Car,
        name: "Car",
        description: "Fast delivery",
        time: "15-25 min",
        icon: "🚗",
        category: DeliveryCategory::Faster,
        rate_percent: 15,
        minimum_fee: 20,
    },
    ModeRate {
        id: DeliveryModeId::Motorbike,
        name: "Motorbike",
        description: "Balanced speed",
        time: "20-30 min",
        icon: "🏍️",
        category: DeliveryCategory::Recommended,
        rate_percent: 10,
        minimum_fee: 15,
    },
    ModeRate {
        id: DeliveryModeId::Bicycle,
        name: "Bicycle",
        description: "Eco-friendly",
        time: "30-45 min",
        icon: "🚲",
        category: DeliveryCategory::Cheaper,
        rate_percent: 8,
        minimum_fee: 10,
    },
];

/// Prices delivery modes against a food subtotal.
///
/// # Examples
///
/// ```
/// use aletwende::domain::{DeliveryModeId, DeliveryPricing};
///
/// let pricing = DeliveryPricing::new(300);
/// assert_eq!(pricing.fee(DeliveryModeId::Car), 45);
/// assert_eq!(pricing.fee(DeliveryModeId::Bicycle), 24);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryPricing {
    subtotal: Price,
}

impl DeliveryPricing {
    pub fn new(subtotal: Price) -> Self {
        Self { subtotal }
    }

    pub fn for_cart(items: &[CartItem]) -> DomainResult<Self> {
        food_subtotal(items).map(Self::new)
    }

    pub fn subtotal(&self) -> Price {
        self.subtotal
    }

    /// Computes `max(round(subtotal * rate), minimum)` for the given mode.
    ///
    /// Rounding is half-up, done in integer arithmetic so large subtotals
    /// never lose precision.
    pub fn fee(&self, mode: DeliveryModeId) -> Price {
        let rate = Self::rate(mode);
        let scaled = self.subtotal.saturating_mul(rate.rate_percent);
        let rounded = scaled / 100 + u64::from(scaled % 100 >= 50);
        rounded.max(rate.minimum_fee)
    }

    /// Generates the three delivery modes, in display order.
    pub fn modes(&self) -> Vec<DeliveryMode> {
        MODE_RATES
            .iter()
            .map(|rate| DeliveryMode {
                id: rate.id,
                name: rate.name.to_string(),
                description: rate.description.to_string(),
                time: rate.time.to_string(),
                price: self.fee(rate.id),
                icon: rate.icon.to_string(),
                category: rate.category,
            })
            .collect()
    }

    pub fn modes_in(&self, category: DeliveryCategory) -> Vec<DeliveryMode> {
        self.modes().into_iter().filter(|mode| mode.category == category).collect()
    }

    pub fn mode(&self, id: DeliveryModeId) -> DeliveryMode {
        self.modes()
            .into_iter()
            .find(|mode| mode.id == id)
            .unwrap_or_else(|| unreachable!("every mode id has a rate"))
    }

    /// The single mode tagged as recommended; used as the default selection.
    pub fn recommended(&self) -> DeliveryMode {
        let rate = MODE_RATES
            .iter()
            .find(|rate| rate.category == DeliveryCategory::Recommended)
            .unwrap_or(&MODE_RATES[0]);
        self.mode(rate.id)
    }

    pub fn total_with(&self, mode: &DeliveryMode) -> DomainResult<Price> {
        self.subtotal.checked_add(mode.price).ok_or(DomainError::PriceOverflow)
    }

    /// Checks that `mode` carries the fee this subtotal would produce.
    pub fn verify(&self, mode: &DeliveryMode) -> DomainResult<()> {
        let expected = self.fee(mode.id);
        if expected != mode.price {
            return Err(DomainError::TotalMismatch {
                expected: self.subtotal.saturating_add(expected),
                actual: self.subtotal.saturating_add(mode.price),
            });
        }
        Ok(())
    }

    fn rate(mode: DeliveryModeId) -> &'static ModeRate {
        MODE_RATES
            .iter()
            .find(|rate| rate.id == mode)
            .unwrap_or_else(|| unreachable!("every mode id has a rate"))
    }
}

/// Sum of the cart prices. Prices may come from a user-supplied catalog or
/// deserialized navigation state, so overflow is an error.
pub fn food_subtotal(items: &[CartItem]) -> DomainResult<Price> {
    items
        .iter()
        .try_fold(0 as Price, |sum, item| sum.checked_add(item.price))
        .ok_or(DomainError::PriceOverflow)
}
