//! Per-country behavior table
//!
//! Country-specific special cases (forced DS division, receiver splits,
//! receiver-keyed settings) live here as data so that onboarding a country
//! only touches configuration.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::convention::Division;

/// Lookup table of country special cases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountryTable {
    /// Countries whose generated prefix always uses the DS division
    pub ds_only: BTreeSet<String>,
    /// Countries served by a single `DS <cc>` receiver
    pub ds_receiver_only: BTreeSet<String>,
    /// Countries whose schedules, groups and aliases are keyed by receiver (`HS PL`)
    pub receiver_keyed: BTreeSet<String>,
    /// Countries whose names take the receiver's division and whose base row
    /// is picked per receiver
    pub receiver_division: BTreeSet<String>,
}

fn set_of(codes: &[&str]) -> BTreeSet<String> {
    codes.iter().map(|c| c.to_string()).collect()
}

impl Default for CountryTable {
    fn default() -> Self {
        CountryTable {
            ds_only: set_of(&["UA", "MD", "RO", "TR"]),
            ds_receiver_only: set_of(&["CY", "UA", "MD", "RO", "TR"]),
            receiver_keyed: set_of(&["PL"]),
            receiver_division: set_of(&["DE"]),
        }
    }
}

impl CountryTable {
    pub fn is_ds_only(&self, country: &str) -> bool {
        self.ds_only.contains(country)
    }

    pub fn is_receiver_keyed(&self, country: &str) -> bool {
        self.receiver_keyed.contains(country)
    }

    pub fn uses_receiver_division(&self, country: &str) -> bool {
        self.receiver_division.contains(country)
    }

    /// Receivers a country's offerings are generated for
    pub fn receivers(&self, country: &str) -> Vec<String> {
        if self.ds_receiver_only.contains(country) {
            vec![format!("DS {}", country)]
        } else {
            vec![format!("HS {}", country), format!("DS {}", country)]
        }
    }

    /// Key used for per-country settings lookups
    pub fn settings_key<'a>(&self, country: &'a str, receiver: &'a str) -> &'a str {
        if self.is_receiver_keyed(country) && !receiver.is_empty() {
            receiver
        } else {
            country
        }
    }

    /// Division forced by the country, if any
    pub fn forced_division(&self, country: &str) -> Option<Division> {
        if self.is_ds_only(country) {
            Some(Division::Ds)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_receivers() {
        let table = CountryTable::default();
        assert_eq!(table.receivers("PL"), vec!["HS PL", "DS PL"]);
        assert_eq!(table.receivers("DE"), vec!["HS DE", "DS DE"]);
        assert_eq!(table.receivers("UA"), vec!["DS UA"]);
        assert_eq!(table.receivers("CY"), vec!["DS CY"]);
        assert_eq!(table.receivers("CZ"), vec!["HS CZ", "DS CZ"]);
    }

    #[test]
    fn test_forced_division() {
        let table = CountryTable::default();
        for cc in ["UA", "MD", "RO", "TR"] {
            assert_eq!(table.forced_division(cc), Some(Division::Ds));
        }
        assert_eq!(table.forced_division("PL"), None);
        // CY only has a DS receiver, the parsed division still wins in names
        assert_eq!(table.forced_division("CY"), None);
    }

    #[test]
    fn test_settings_key() {
        let table = CountryTable::default();
        assert_eq!(table.settings_key("PL", "HS PL"), "HS PL");
        assert_eq!(table.settings_key("DE", "HS DE"), "DE");
        assert_eq!(table.settings_key("PL", ""), "PL");
    }

    #[test]
    fn test_adding_country_is_data_only() {
        let mut table = CountryTable::default();
        table.ds_only.insert("BG".to_string());
        table.ds_receiver_only.insert("BG".to_string());
        assert_eq!(table.forced_division("BG"), Some(Division::Ds));
        assert_eq!(table.receivers("BG"), vec!["DS BG"]);
    }
}
