//! In-memory catalog rows and sheets

use std::collections::HashMap;

use super::columns;

/// Null-like cell texts treated as empty
pub const NULL_TOKENS: &[&str] = &["nan", "NaN", "None", "none", "NULL", "null", "<NA>"];

pub fn is_null_token(value: &str) -> bool {
    NULL_TOKENS.contains(&value.trim())
}

/// Trimmed value, or empty when the cell holds a null-like token
pub fn clean_value(value: &str) -> &str {
    let trimmed = value.trim();
    if is_null_token(trimmed) { "" } else { trimmed }
}

/// One service offering: column name -> text, in column order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferingRow {
    columns: Vec<String>,
    values: HashMap<String, String>,
}

impl OfferingRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut row = Self::new();
        for (column, value) in pairs {
            row.set(column, value);
        }
        row
    }

    /// Cell text, empty when the column is absent
    pub fn get(&self, column: &str) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    /// Set a cell, appending the column when it is new
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        if !self.values.contains_key(&column) {
            self.columns.push(column.clone());
        }
        self.values.insert(column, value.into());
    }

    /// Add an empty column if missing
    pub fn ensure_column(&mut self, column: &str) {
        if !self.has_column(column) {
            self.set(column, "");
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn name(&self) -> &str {
        self.get(columns::NAME)
    }

    pub fn parent_offering(&self) -> &str {
        self.get(columns::PARENT_OFFERING)
    }

    /// Columns matching a predicate, in column order
    pub fn columns_where(&self, predicate: impl Fn(&str) -> bool) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| predicate(c))
            .cloned()
            .collect()
    }
}

/// A loaded worksheet
#[derive(Debug, Clone, Default)]
pub struct CatalogSheet {
    pub name: String,
    /// Header order as found in the workbook
    pub columns: Vec<String>,
    pub rows: Vec<OfferingRow>,
}

impl CatalogSheet {
    /// Normalized (whitespace-collapsed) non-empty names
    pub fn names(&self) -> impl Iterator<Item = String> + '_ {
        self.rows
            .iter()
            .map(|r| clean_value(r.name()))
            .filter(|n| !n.is_empty())
            .map(normalize_name)
    }
}

/// Collapse runs of whitespace and trim
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Source workbook of one country
#[derive(Debug, Clone, Default)]
pub struct CountryWorkbook {
    /// Uppercase country code from the file name
    pub country: String,
    pub file_name: String,
    pub sheets: Vec<CatalogSheet>,
}

impl CountryWorkbook {
    pub fn sheet(&self, name: &str) -> Option<&CatalogSheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_keeps_column_order() {
        let mut row = OfferingRow::from_pairs([("B", "2"), ("A", "1")]);
        row.set("C", "3");
        row.set("B", "two");
        assert_eq!(row.columns(), &["B", "A", "C"]);
        assert_eq!(row.get("B"), "two");
        assert_eq!(row.get("missing"), "");
    }

    #[test]
    fn test_clean_value() {
        assert_eq!(clean_value(" nan "), "");
        assert_eq!(clean_value("<NA>"), "");
        assert_eq!(clean_value(" value "), "value");
        assert_eq!(clean_value("Nancy"), "Nancy");
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  [SR HS PL]   Name\n x "), "[SR HS PL] Name x");
    }

    #[test]
    fn test_sheet_names_skip_empty() {
        let sheet = CatalogSheet {
            name: "Child SO lvl1".to_string(),
            columns: vec![columns::NAME.to_string()],
            rows: vec![
                OfferingRow::from_pairs([(columns::NAME, "[SR HS PL]  A")]),
                OfferingRow::from_pairs([(columns::NAME, "nan")]),
                OfferingRow::from_pairs([(columns::NAME, "")]),
            ],
        };
        assert_eq!(sheet.names().collect::<Vec<_>>(), vec!["[SR HS PL] A"]);
    }
}
