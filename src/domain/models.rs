use serde::{Deserialize, Serialize};

/// Prices are whole currency units ("K 115").
pub type Price = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    pub price: Price,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub image: String,
    pub foods: Vec<FoodItem>,
}

impl Store {
    pub fn find_food(&self, food_id: &str) -> Option<&FoodItem> {
        self.foods.iter().find(|food| food.id == food_id)
    }
}

/// An item in the session cart. Never mutated after it is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub price: Price,
    pub image: String,
}

impl From<&FoodItem> for CartItem {
    fn from(food: &FoodItem) -> Self {
        Self {
            id: food.id.clone(),
            name: food.name.clone(),
            price: food.price,
            image: food.image.clone(),
        }
    }
}

/// An intermediate delivery point with its own address and food subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    /// `stop-<n>`, unique within a session
    pub id: String,
    /// Committed address; empty until a suggestion is selected
    pub address: String,
    #[serde(default)]
    pub description: String,
    /// Cart items delivered here, in the order they were assigned
    pub food_ids: Vec<String>,
}

impl Stop {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            address: String::new(),
            description: String::new(),
            food_ids: Vec::new(),
        }
    }

    pub fn has_address(&self) -> bool {
        !self.address.trim().is_empty()
    }

    pub fn has_food(&self) -> bool {
        !self.food_ids.is_empty()
    }
}

/// Partial update applied to a stop; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopUpdate {
    pub address: Option<String>,
    pub description: Option<String>,
}

/// One entry of the address directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSuggestion {
    pub id: String,
    /// Short place name shown first ("Manda Hill")
    pub name: String,
    pub description: String,
    /// Display text such as "2 km"
    #[serde(default)]
    pub distance: Option<String>,
    /// Full address committed to a stop
    pub address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryCategory {
    Recommended,
    Faster,
    Cheaper,
}

impl DeliveryCategory {
    pub const ALL: [DeliveryCategory; 3] = [
        DeliveryCategory::Recommended,
        DeliveryCategory::Faster,
        DeliveryCategory::Cheaper,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DeliveryCategory::Recommended => "Recommended",
            DeliveryCategory::Faster => "Faster",
            DeliveryCategory::Cheaper => "Cheaper",
        }
    }

    pub fn next(self) -> Self {
        match self {
            DeliveryCategory::Recommended => DeliveryCategory::Faster,
            DeliveryCategory::Faster => DeliveryCategory::Cheaper,
            DeliveryCategory::Cheaper => DeliveryCategory::Recommended,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            DeliveryCategory::Recommended => DeliveryCategory::Cheaper,
            DeliveryCategory::Faster => DeliveryCategory::Recommended,
            DeliveryCategory::Cheaper => DeliveryCategory::Faster,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryModeId {
    Car,
    Motorbike,
    Bicycle,
}

impl DeliveryModeId {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryModeId::Car => "car",
            DeliveryModeId::Motorbike => "motorbike",
            DeliveryModeId::Bicycle => "bicycle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryMode {
    pub id: DeliveryModeId,
    pub name: String,
    pub description: String,
    /// Estimated delivery window
    pub time: String,
    /// Delivery fee only; the food subtotal is added separately
    pub price: Price,
    pub icon: String,
    /// Tab the mode is listed under
    pub category: DeliveryCategory,
}

/// Cosmetic profile toggle in the payment panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileTab {
    Personal,
    #[default]
    Work,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    Cash,
    /// Placeholder for adding a card
    Card,
    /// Placeholder for other payment methods
    AddMethod,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Cash, PaymentMethod::Card, PaymentMethod::AddMethod];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Add debit/credit card",
            PaymentMethod::AddMethod => "Add payment method",
        }
    }

    /// Only cash can actually be chosen; the others have no handler yet.
    pub fn is_selectable(&self) -> bool {
        matches!(self, PaymentMethod::Cash)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceOption {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

pub const FOODIES_SERVICE_ID: &str = "foodies";

pub const SERVICES: [ServiceOption; 5] = [
    ServiceOption { id: "package", label: "Send My Package", description: "Delivery for parcels", icon: "📦" },
    ServiceOption { id: FOODIES_SERVICE_ID, label: "Foodies", description: "Order from shops", icon: "🍔" },
    ServiceOption { id: "clothes", label: "Clothes & Others", description: "Shop deliveries", icon: "👕" },
    ServiceOption { id: "truck", label: "Delivery Truck", description: "Large shipments", icon: "🚚" },
    ServiceOption { id: "heavy", label: "Heavy Duty", description: "Industrial delivery", icon: "⚙️" },
];
