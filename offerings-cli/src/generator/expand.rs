//! Cross product of the expansion axes
//!
//! Every candidate row is expanded over apps x receivers x schedules, in
//! that nesting order. Schedules depend on the receiver, so the axes are
//! resolved per country before iteration.

use std::collections::BTreeMap;

use crate::naming::CountryTable;

/// One point of the cross product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Combination<'a> {
    pub app: Option<&'a str>,
    pub receiver: &'a str,
    pub schedule: &'a str,
}

/// Resolved axes for one country
#[derive(Debug, Clone, Default)]
pub struct Axes {
    apps: Vec<Option<String>>,
    /// Receivers with their schedules, in receiver order
    receivers: Vec<(String, Vec<String>)>,
}

/// Schedules for a receiver: per-receiver override for receiver-keyed
/// countries, per-country override otherwise, else the global list
pub fn schedules_for<'a>(
    countries: &CountryTable,
    country: &str,
    receiver: &str,
    per_country: &'a BTreeMap<String, Vec<String>>,
    global: &'a [String],
) -> &'a [String] {
    let key = countries.settings_key(country, receiver);
    per_country.get(key).map(Vec::as_slice).unwrap_or(global)
}

impl Axes {
    pub fn new(
        countries: &CountryTable,
        country: &str,
        apps: Vec<Option<String>>,
        per_country: &BTreeMap<String, Vec<String>>,
        global: &[String],
    ) -> Self {
        let receivers = countries
            .receivers(country)
            .into_iter()
            .map(|receiver| {
                let schedules = schedules_for(countries, country, &receiver, per_country, global).to_vec();
                (receiver, schedules)
            })
            .collect();

        Axes { apps, receivers }
    }

    /// Number of combinations the iterator yields
    pub fn combination_count(&self) -> usize {
        let per_app: usize = self.receivers.iter().map(|(_, s)| s.len()).sum();
        self.apps.len() * per_app
    }

    pub fn combinations(&self) -> impl Iterator<Item = Combination<'_>> {
        self.apps.iter().flat_map(move |app| {
            self.receivers.iter().flat_map(move |(receiver, schedules)| {
                schedules.iter().map(move |schedule| Combination {
                    app: app.as_deref(),
                    receiver,
                    schedule,
                })
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_order_and_len() {
        let table = CountryTable::default();
        let apps = vec![Some("Outlook".to_string()), Some("Teams".to_string())];
        let global = strings(&["9-17", "24/7"]);
        let axes = Axes::new(&table, "CZ", apps, &BTreeMap::new(), &global);

        let combos: Vec<_> = axes.combinations().collect();
        assert_eq!(combos.len(), axes.combination_count());
        assert_eq!(combos.len(), 2 * 2 * 2);
        assert_eq!(
            combos[0],
            Combination {
                app: Some("Outlook"),
                receiver: "HS CZ",
                schedule: "9-17"
            }
        );
        assert_eq!(combos[1].schedule, "24/7");
        assert_eq!(combos[2].receiver, "DS CZ");
        assert_eq!(combos[4].app, Some("Teams"));
    }

    #[test]
    fn test_per_receiver_schedules() {
        let table = CountryTable::default();
        let per_country = BTreeMap::from([("HS PL".to_string(), strings(&["Mon-Fri 8-16"]))]);
        let global = strings(&["9-17", "24/7"]);
        let axes = Axes::new(&table, "PL", vec![None], &per_country, &global);

        let combos: Vec<_> = axes.combinations().collect();
        assert_eq!(combos.len(), 3);
        assert_eq!(combos[0].schedule, "Mon-Fri 8-16");
        assert_eq!(combos[1].receiver, "DS PL");
        assert!(combos.iter().all(|c| c.app.is_none()));
    }

    #[test]
    fn test_country_keyed_schedules() {
        let table = CountryTable::default();
        let per_country = BTreeMap::from([("DE".to_string(), strings(&["Mon-Fri 7-16"]))]);
        assert_eq!(schedules_for(&table, "DE", "HS DE", &per_country, &[]), &["Mon-Fri 7-16".to_string()]);
        assert!(schedules_for(&table, "CZ", "HS CZ", &per_country, &[]).is_empty());

        let axes = Axes::new(&table, "UA", vec![None], &per_country, &strings(&["24/7"]));
        let receivers: Vec<_> = axes.combinations().map(|c| c.receiver).collect();
        assert_eq!(receivers, vec!["DS UA"]);
    }
}
