//! Index of everything already present in the loaded catalog

use std::collections::{HashMap, HashSet};

use crate::catalog::row::clean_value;
use crate::catalog::{CatalogSheet, CountryWorkbook, column_order_key, columns};

/// LDAP values of one support group, in column order
pub type LdapValues = Vec<(String, String)>;

/// Names, column orders and the Germany LDAP side table
#[derive(Debug, Clone, Default)]
pub struct ExistingCatalog {
    names: HashSet<String>,
    column_orders: HashMap<String, Vec<String>>,
    ldap_by_group: HashMap<String, LdapValues>,
}

impl ExistingCatalog {
    pub fn collect(workbooks: &[CountryWorkbook]) -> Self {
        let mut existing = ExistingCatalog::default();

        for workbook in workbooks {
            for sheet in &workbook.sheets {
                existing
                    .column_orders
                    .entry(column_order_key(&workbook.country, &sheet.name))
                    .or_insert_with(|| sheet.columns.clone());

                existing.names.extend(sheet.names());

                if workbook.country == "DE" {
                    existing.collect_ldap(sheet);
                }
            }
        }

        log::info!(
            "Collected {} existing offering name(s) from {} workbook(s)",
            existing.names.len(),
            workbooks.len()
        );
        existing
    }

    fn collect_ldap(&mut self, sheet: &CatalogSheet) {
        let ldap_columns: Vec<&String> = sheet.columns.iter().filter(|c| columns::is_ldap(c)).collect();
        if ldap_columns.is_empty() {
            return;
        }

        for row in &sheet.rows {
            let group = clean_value(row.get(columns::SUPPORT_GROUP));
            if group.is_empty() {
                continue;
            }
            let values: LdapValues = ldap_columns
                .iter()
                .filter_map(|col| {
                    let value = clean_value(row.get(col));
                    (!value.is_empty()).then(|| ((*col).clone(), value.to_string()))
                })
                .collect();
            if !values.is_empty() {
                self.ldap_by_group.insert(group.to_string(), values);
            }
        }
    }

    /// Whether a normalized name is already in the catalog
    pub fn contains(&self, normalized_name: &str) -> bool {
        self.names.contains(normalized_name)
    }

    pub fn column_order(&self, country: &str, sheet: &str) -> Option<&[String]> {
        self.column_orders
            .get(&column_order_key(country, sheet))
            .map(Vec::as_slice)
    }

    pub fn ldap_for(&self, support_group: &str) -> Option<&LdapValues> {
        self.ldap_by_group.get(support_group)
    }

    pub fn name_count(&self) -> usize {
        self.names.len()
    }
}
