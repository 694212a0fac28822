use crate::domain::{AddressDirectory, AddressSuggestion, FoodItem, Store};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

pub struct CatalogRepository;

impl CatalogRepository {
    /// Loads the store catalog from a JSON array of stores.
    pub fn load_stores(path: &Path) -> Result<Vec<Store>> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading store catalog {}", path.display()))?;
        let stores: Vec<Store> = serde_json::from_str(&content)
            .with_context(|| format!("invalid store catalog {}", path.display()))?;
        info!(path = %path.display(), stores = stores.len(), "store catalog loaded");
        Ok(stores)
    }

    /// Loads the address directory from CSV with the header
    /// `id,name,description,distance,address`. An empty distance column is
    /// read as no distance.
    pub fn load_addresses(path: &Path) -> Result<AddressDirectory> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("reading address directory {}", path.display()))?;
        let mut entries = Vec::new();
        for record in reader.deserialize() {
            let mut entry: AddressSuggestion =
                record.with_context(|| format!("invalid address row in {}", path.display()))?;
            if entry.distance.as_deref().is_some_and(|d| d.trim().is_empty()) {
                entry.distance = None;
            }
            entries.push(entry);
        }
        info!(path = %path.display(), entries = entries.len(), "address directory loaded");
        Ok(AddressDirectory::new(entries))
    }

    pub fn load_stores_or_default(path: Option<&Path>) -> Result<Vec<Store>> {
        match path {
            Some(path) => Self::load_stores(path),
            None => Ok(default_stores()),
        }
    }

    pub fn load_addresses_or_default(path: Option<&Path>) -> Result<AddressDirectory> {
        match path {
            Some(path) => Self::load_addresses(path),
            None => Ok(AddressDirectory::new(default_addresses())),
        }
    }
}

fn food(id: &str, name: &str, price: u64) -> FoodItem {
    FoodItem {
        id: id.to_string(),
        name: name.to_string(),
        price,
        image: format!("images/foods/{id}.jpg"),
    }
}

fn store(id: &str, name: &str, foods: Vec<FoodItem>) -> Store {
    Store {
        id: id.to_string(),
        name: name.to_string(),
        image: format!("images/stores/{id}.jpg"),
        foods,
    }
}

pub fn default_stores() -> Vec<Store> {
    vec![
        store(
            "hungry-lion",
            "Hungry Lion",
            vec![
                food("hl-2pc-chicken", "2 Piece Chicken & Chips", 65),
                food("hl-burger", "Chicken Burger", 55),
                food("hl-wings", "6 Wings", 70),
                food("hl-coke", "Coca-Cola 500ml", 15),
            ],
        ),
        store(
            "debonairs",
            "Debonairs Pizza",
            vec![
                food("db-triple-decker", "Triple-Decker Pizza", 180),
                food("db-regina", "Regina Pizza", 120),
                food("db-garlic-bread", "Garlic Bread", 35),
            ],
        ),
        store(
            "mama-nshima",
            "Mama's Nshima House",
            vec![
                food("mn-nshima-beef", "Nshima with Beef Stew", 60),
                food("mn-nshima-kapenta", "Nshima with Kapenta", 45),
                food("mn-ifisashi", "Ifisashi", 30),
            ],
        ),
        store(
            "java-house",
            "Java House",
            vec![
                food("jh-latte", "Caffe Latte", 40),
                food("jh-club", "Club Sandwich", 95),
                food("jh-muffin", "Blueberry Muffin", 30),
            ],
        ),
    ]
}

pub fn default_addresses() -> Vec<AddressSuggestion> {
    let entry = |id: &str, name: &str, description: &str, distance: Option<&str>, address: &str| {
        AddressSuggestion {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            distance: distance.map(str::to_string),
            address: address.to_string(),
        }
    };
    vec![
        entry("addr-1", "Manda Hill Mall", "Great East Road", Some("2.1 km"), "Manda Hill Mall, Great East Road, Lusaka"),
        entry("addr-2", "East Park Mall", "Great East Road", Some("3.4 km"), "East Park Mall, Great East Road, Lusaka"),
        entry("addr-3", "Levy Junction", "Church Road", Some("1.2 km"), "Levy Junction, Church Road, Lusaka"),
        entry("addr-4", "Arcades Shopping Centre", "Great East Road", Some("2.8 km"), "Arcades Shopping Centre, Lusaka"),
        entry("addr-5", "University of Zambia", "Great East Road Campus", Some("5.0 km"), "UNZA, Great East Road, Lusaka"),
        entry("addr-6", "Cairo Road", "Central Business District", Some("0.8 km"), "Cairo Road, Lusaka"),
        entry("addr-7", "Woodlands Stadium", "Woodlands", None, "Woodlands Stadium, Woodlands, Lusaka"),
        entry("addr-8", "Kabulonga Shopping Centre", "Kabulonga", Some("4.6 km"), "Kabulonga Road, Lusaka"),
        entry("addr-9", "Rhodes Park", "Residential area", Some("1.9 km"), "Rhodes Park, Lusaka"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_stores_from_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "s1", "name": "Shop One", "image": "s1.jpg",
                 "foods": [{{"id": "f1", "name": "Fritters", "price": 12, "image": "f1.jpg"}}]}}]"#
        )
        .unwrap();

        let stores = CatalogRepository::load_stores(file.path()).unwrap();
        assert_eq!(stores.len(), 1);
        assert_eq!(stores[0].find_food("f1").unwrap().price, 12);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = CatalogRepository::load_stores(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid store catalog"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(CatalogRepository::load_stores(Path::new("/definitely/not/here.json")).is_err());
    }

    #[test]
    fn test_load_addresses_from_csv() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "id,name,description,distance,address").unwrap();
        writeln!(file, "a1,Cairo Road,CBD,0.8 km,\"Cairo Road, Lusaka\"").unwrap();
        writeln!(file, "a2,Woodlands,Residential,,\"Woodlands, Lusaka\"").unwrap();

        let directory = CatalogRepository::load_addresses(file.path()).unwrap();
        assert_eq!(directory.entries().len(), 2);
        assert_eq!(directory.entries()[0].distance.as_deref(), Some("0.8 km"));
        assert_eq!(directory.entries()[0].address, "Cairo Road, Lusaka");
        assert_eq!(directory.entries()[1].distance, None);
    }

    #[test]
    fn test_defaults() {
        let stores = CatalogRepository::load_stores_or_default(None).unwrap();
        assert!(stores.iter().all(|store| !store.foods.is_empty()));
        let directory = CatalogRepository::load_addresses_or_default(None).unwrap();
        assert!(directory.entries().len() > 7);
    }
}
