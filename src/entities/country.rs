// 🌍 Country Lookup - NOC code → country name for tally rows

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct CountryTable {
    names: HashMap<String, String>,
}

impl CountryTable {
    pub fn new() -> Self {
        CountryTable::default()
    }

    /// Set (or replace) the name for a NOC
    pub fn insert(&mut self, noc: &str, name: &str) {
        self.names.insert(noc.trim().to_string(), name.trim().to_string());
    }

    /// Add a NOC only if the historical table doesn't know it yet
    pub fn insert_if_absent(&mut self, noc: &str, name: &str) -> bool {
        let noc = noc.trim();
        if self.names.contains_key(noc) {
            return false;
        }
        self.names.insert(noc.to_string(), name.trim().to_string());
        true
    }

    pub fn name(&self, noc: &str) -> Option<&str> {
        self.names.get(noc).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_historical_name_wins() {
        let mut table = CountryTable::new();
        table.insert("TPE", "Chinese Taipei");

        assert!(!table.insert_if_absent("TPE", "Taiwan"));
        assert!(table.insert_if_absent("AIN", "AIN"));
        assert_eq!(table.name("TPE"), Some("Chinese Taipei"));
        assert_eq!(table.name("AIN"), Some("AIN"));
        assert_eq!(table.name("XXX"), None);
        assert_eq!(table.len(), 2);
    }
}
