//! Service catalog spreadsheets: column names, in-memory rows, xlsx I/O

pub mod columns;
pub mod reader;
pub mod row;
pub mod writer;

pub use row::{CatalogSheet, CountryWorkbook, OfferingRow, normalize_name};
pub use writer::{GeneratedRow, OutputSheet};

/// Source sheet holding offerings of the given level
pub fn level_sheet(level: u8) -> String {
    format!("Child SO lvl{}", level)
}

/// Output sheet key, e.g. `PL lvl1`
pub fn output_sheet_key(country: &str, level: u8) -> String {
    format!("{} lvl{}", country, level)
}

/// Column-order key of a source sheet, e.g. `PL_Child SO lvl1`
pub fn column_order_key(country: &str, sheet: &str) -> String {
    format!("{}_{}", country, sheet)
}
