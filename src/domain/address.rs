use super::models::AddressSuggestion;

/// Static directory of delivery addresses used for stop suggestions.
#[derive(Debug, Clone, Default)]
pub struct AddressDirectory {
    entries: Vec<AddressSuggestion>,
}

impl AddressDirectory {
    pub fn new(entries: Vec<AddressSuggestion>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[AddressSuggestion] {
        &self.entries
    }

    /// The first few entries, shown as recent places while no stop is being
    /// edited.
    pub fn recent(&self, limit: usize) -> &[AddressSuggestion] {
        &self.entries[..limit.min(self.entries.len())]
    }

    /// Returns entries whose name, description or address contains `query`,
    /// ignoring case. Name-prefix matches are listed first; an empty query
    /// returns the whole directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use aletwende::domain::{AddressDirectory, AddressSuggestion};
    ///
    /// let directory = AddressDirectory::new(vec![AddressSuggestion {
    ///     id: "1".to_string(),
    ///     name: "Levy Junction".to_string(),
    ///     description: "Shopping mall".to_string(),
    ///     distance: None,
    ///     address: "Church Road, Lusaka".to_string(),
    /// }]);
    /// assert_eq!(directory.suggestions("LEVY").len(), 1);
    /// assert_eq!(directory.suggestions("church").len(), 1);
    /// assert!(directory.suggestions("kitwe").is_empty());
    /// ```
    pub fn suggestions(&self, query: &str) -> Vec<&AddressSuggestion> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.entries.iter().collect();
        }

        let (mut prefixed, rest): (Vec<_>, Vec<_>) = self
            .entries
            .iter()
            .filter(|entry| {
                entry.name.to_lowercase().contains(&needle)
                    || entry.description.to_lowercase().contains(&needle)
                    || entry.address.to_lowercase().contains(&needle)
            })
            .partition(|entry| entry.name.to_lowercase().starts_with(&needle));

        prefixed.extend(rest);
        prefixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, name: &str, description: &str, address: &str) -> AddressSuggestion {
        AddressSuggestion {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            distance: Some("1.2 km".to_string()),
            address: address.to_string(),
        }
    }

    fn directory() -> AddressDirectory {
        AddressDirectory::new(vec![
            entry("1", "East Park Mall", "Great East Road", "Great East Road, Lusaka"),
            entry("2", "Arcades", "Shopping centre near the park", "Great East Road, Lusaka"),
            entry("3", "Parklands", "Residential", "Parklands, Kitwe"),
        ])
    }

    #[test]
    fn test_empty_query_returns_everything() {
        assert_eq!(directory().suggestions("").len(), 3);
        assert_eq!(directory().suggestions("   ").len(), 3);
    }

    #[test]
    fn test_name_prefix_matches_come_first() {
        let directory = directory();
        let ids: Vec<_> = directory.suggestions("park").iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_matching_ignores_case() {
        let directory = directory();
        let ids: Vec<_> = directory.suggestions("KITWE").iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["3"]);
    }

    #[test]
    fn test_no_match() {
        assert!(directory().suggestions("ndola").is_empty());
    }

    #[test]
    fn test_recent_is_bounded() {
        let directory = directory();
        assert_eq!(directory.recent(7).len(), 3);
        assert_eq!(directory.recent(2).len(), 2);
    }
}
