//! Support / managed-by group resolution per country and receiver

use crate::config::settings::GroupSettings;
use crate::naming::CountryTable;

/// One support group with its managed-by group
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupPair {
    pub support: String,
    pub managed: String,
}

impl GroupPair {
    pub fn new(support: impl Into<String>, managed: impl Into<String>) -> Self {
        GroupPair {
            support: support.into(),
            managed: managed.into(),
        }
    }

    fn empty() -> Self {
        Self::new("", "")
    }
}

fn lines(value: &str) -> Vec<String> {
    value
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

fn lookup<'a>(map: &'a std::collections::BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    map.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Receiver-keyed countries take one pair from the receiver's entry
fn receiver_keyed_groups(groups: &GroupSettings, receiver: &str) -> Vec<GroupPair> {
    match lookup(&groups.support_per_country, receiver) {
        Some(support) => {
            let managed = lookup(&groups.managed_per_country, receiver).unwrap_or(support);
            vec![GroupPair::new(support, managed)]
        }
        None => vec![GroupPair::empty()],
    }
}

fn country_groups(groups: &GroupSettings, country: &str) -> Vec<GroupPair> {
    let support_value = lookup(&groups.support_per_country, country).unwrap_or(groups.support_group.trim());
    let managed_value = lookup(&groups.managed_per_country, country).unwrap_or(groups.managed_by_group.trim());

    let supports = lines(support_value);
    if supports.len() > 1 {
        let managed = lines(managed_value);
        let managed: Vec<String> = match managed.len() {
            0 => supports.clone(),
            1 => vec![managed[0].clone(); supports.len()],
            _ => managed,
        };
        return supports
            .iter()
            .enumerate()
            .map(|(idx, support)| {
                let managed = managed.get(idx).unwrap_or(support);
                GroupPair::new(support.as_str(), managed.as_str())
            })
            .collect();
    }

    match supports.into_iter().next() {
        Some(support) => {
            let managed = if managed_value.is_empty() { support.clone() } else { managed_value.to_string() };
            vec![GroupPair::new(support, managed)]
        }
        None => vec![GroupPair::empty()],
    }
}

/// Group pairs a combination expands over
///
/// Newline-separated groups yield one pair each. Countries that pick rows
/// per receiver keep only groups starting with the receiver when any do.
pub fn groups_for(groups: &GroupSettings, countries: &CountryTable, country: &str, receiver: &str) -> Vec<GroupPair> {
    if countries.is_receiver_keyed(country) && !receiver.is_empty() {
        return receiver_keyed_groups(groups, receiver);
    }

    let pairs = country_groups(groups, country);
    if countries.uses_receiver_division(country) && !receiver.is_empty() {
        let matching: Vec<GroupPair> = pairs
            .iter()
            .filter(|p| p.support.starts_with(receiver))
            .cloned()
            .collect();
        if !matching.is_empty() {
            return matching;
        }
    }
    pairs
}
