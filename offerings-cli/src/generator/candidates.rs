//! Base rows for expansion and the schedule precedent index

use crate::catalog::row::clean_value;
use crate::catalog::{CatalogSheet, OfferingRow, columns};
use crate::config::NewParentPair;
use crate::config::settings::Settings;
use crate::filter::is_candidate;

/// Name markers of CORP-style offerings
const CORP_MARKERS: &[&str] = &["CORP", "DEDICATED", "RECP"];

/// Fresh row for a user-supplied parent offering
pub fn new_parent_row(pair: &NewParentPair, settings: &Settings) -> OfferingRow {
    let (approval_required, approval_group) = if settings.approval.enabled {
        ("true", settings.approval.group.as_str())
    } else {
        ("false", "empty")
    };

    OfferingRow::from_pairs([
        (columns::NAME, ""),
        (columns::PARENT_OFFERING, pair.offering.trim()),
        (columns::PARENT, pair.parent.trim()),
        (columns::DEPEND_ON, ""),
        (columns::COMMITMENTS, ""),
        (columns::DELIVERY_MANAGER, ""),
        (columns::SUBSCRIBED_LOCATION, settings.subscribed_location.as_str()),
        (columns::PHASE, "Catalog"),
        (columns::STATUS, "Operational"),
        (columns::LIFECYCLE_STAGE, "Operational"),
        (columns::LIFECYCLE_STATUS, "In Use"),
        (columns::SUPPORT_GROUP, ""),
        (columns::MANAGED_BY, ""),
        (columns::SUBSCRIBED_COMPANY, ""),
        (columns::VISIBILITY_GROUP, ""),
        (columns::BUSINESS_CRITICALITY, settings.business_criticality.as_deref().unwrap_or("")),
        (columns::RECORD_VIEW, ""),
        (columns::APPROVAL_REQUIRED, approval_required),
        (columns::APPROVAL_GROUP, approval_group),
    ])
}

/// Rows a sheet contributes: filtered candidates, or one synthetic row per
/// configured parent in new-parent mode
pub fn base_pool(settings: &Settings, sheet: Option<&CatalogSheet>, level: u8) -> Vec<OfferingRow> {
    if settings.new_parent_mode() {
        return settings
            .new_parents
            .iter()
            .map(|pair| new_parent_row(pair, settings))
            .collect();
    }

    let Some(sheet) = sheet else {
        return Vec::new();
    };

    let pool: Vec<OfferingRow> = sheet
        .rows
        .iter()
        .filter(|row| is_candidate(&settings.filter, row, level))
        .cloned()
        .collect();

    log::debug!(
        "{} of {} row(s) in '{}' match the filters",
        pool.len(),
        sheet.rows.len(),
        sheet.name
    );
    pool
}

/// Uppercased pool names split by CORP marker, for schedule precedent checks
#[derive(Debug, Clone, Default)]
pub struct ScheduleIndex {
    corp: Vec<String>,
    other: Vec<String>,
}

impl ScheduleIndex {
    pub fn from_rows(rows: &[OfferingRow]) -> Self {
        let mut index = ScheduleIndex::default();
        for row in rows {
            let name = clean_value(row.name()).to_uppercase();
            if CORP_MARKERS.iter().any(|m| name.contains(m)) {
                index.corp.push(name);
            } else {
                index.other.push(name);
            }
        }
        index
    }

    /// Whether no name of the relevant class carries the schedule
    ///
    /// An empty pool never flags; an empty class always does.
    pub fn is_missing(&self, schedule: &str, corp_convention: bool) -> bool {
        if self.corp.is_empty() && self.other.is_empty() {
            return false;
        }
        let names = if corp_convention { &self.corp } else { &self.other };
        let pattern = schedule.trim().to_uppercase();
        !names.iter().any(|name| name.contains(&pattern))
    }
}
