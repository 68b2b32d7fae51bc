//! Load `ALL_Service_Offering_<CC>.xlsx` workbooks

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calamine::{Data, Reader, Xlsx, open_workbook};

use super::columns;
use super::row::{CatalogSheet, CountryWorkbook, OfferingRow};

pub const SOURCE_PREFIX: &str = "ALL_Service_Offering_";

/// Source workbooks in `dir`, sorted by file name
pub fn discover_sources(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read source directory: {}", dir.display()))?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(SOURCE_PREFIX) && n.ends_with(".xlsx"))
        })
        .collect();

    paths.sort();
    Ok(paths)
}

/// Uppercase text after the last `_` of the file stem
pub fn country_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .and_then(|stem| stem.rsplit('_').next())
        .unwrap_or_default()
        .to_uppercase()
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Empty | Data::Error(_) => String::new(),
        other => other.to_string(),
    }
}

/// Read one worksheet; `Ok(None)` when the workbook has no such sheet
fn read_sheet(workbook: &mut Xlsx<std::io::BufReader<std::fs::File>>, sheet_name: &str, country: &str) -> Result<Option<CatalogSheet>> {
    if !workbook.sheet_names().iter().any(|s| s == sheet_name) {
        return Ok(None);
    }

    let range = workbook
        .worksheet_range(sheet_name)
        .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Some(CatalogSheet {
            name: sheet_name.to_string(),
            ..Default::default()
        }));
    };

    // Column index -> header name, skipping unnamed columns
    let headers: Vec<(usize, String)> = header
        .iter()
        .enumerate()
        .map(|(idx, cell)| (idx, cell_text(cell).trim().to_string()))
        .filter(|(_, name)| !name.is_empty())
        .collect();

    let mut sheet = CatalogSheet {
        name: sheet_name.to_string(),
        columns: headers.iter().map(|(_, name)| name.clone()).collect(),
        rows: Vec::new(),
    };

    let needs_ldap = country == "DE" && !sheet.columns.iter().any(|c| columns::is_ldap(c));

    for cells in rows {
        if cells.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }

        let mut row = OfferingRow::new();
        for (idx, name) in &headers {
            let value = cells.get(*idx).map(cell_text).unwrap_or_default();
            row.set(name.as_str(), value);
        }
        for column in columns::REQUIRED {
            row.ensure_column(column);
        }
        if needs_ldap {
            row.ensure_column(columns::LDAP);
        }
        sheet.rows.push(row);
    }

    log::debug!("Loaded {} rows from sheet '{}' ({})", sheet.rows.len(), sheet_name, country);
    Ok(Some(sheet))
}

/// Read the requested sheets of one source workbook
///
/// Sheets that are missing or fail to parse are skipped with a warning.
pub fn read_country_workbook(path: &Path, sheet_names: &[String]) -> Result<CountryWorkbook> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

    let country = country_from_path(path);
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut sheets = Vec::new();
    for sheet_name in sheet_names {
        match read_sheet(&mut workbook, sheet_name, &country) {
            Ok(Some(sheet)) => sheets.push(sheet),
            Ok(None) => log::debug!("{} has no sheet '{}'", file_name, sheet_name),
            Err(e) => log::warn!("Skipping sheet '{}' in {}: {:#}", sheet_name, file_name, e),
        }
    }

    Ok(CountryWorkbook {
        country,
        file_name,
        sheets,
    })
}

/// Load every source workbook in `dir`
///
/// Files that cannot be opened are logged and skipped.
pub fn load_catalog(dir: &Path, sheet_names: &[String]) -> Result<Vec<CountryWorkbook>> {
    let paths = discover_sources(dir)?;
    log::info!("Found {} source workbook(s) in {}", paths.len(), dir.display());

    let mut workbooks = Vec::with_capacity(paths.len());
    for (idx, path) in paths.iter().enumerate() {
        log::info!(
            "Loading file {}/{}: {}",
            idx + 1,
            paths.len(),
            path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default()
        );
        match read_country_workbook(path, sheet_names) {
            Ok(workbook) => workbooks.push(workbook),
            Err(e) => log::warn!("Skipping {}: {:#}", path.display(), e),
        }
    }

    Ok(workbooks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    #[test]
    fn test_country_from_path() {
        assert_eq!(country_from_path(Path::new("/tmp/ALL_Service_Offering_pl.xlsx")), "PL");
        assert_eq!(country_from_path(Path::new("ALL_Service_Offering_Export_DE.xlsx")), "DE");
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Float(3.0)), "3");
        assert_eq!(cell_text(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_text(&Data::Bool(true)), "true");
        assert_eq!(cell_text(&Data::Empty), "");
    }

    #[test]
    fn test_discover_and_read() {
        let dir = tempfile::tempdir().unwrap();

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Child SO lvl1").unwrap();
        sheet.write_string(0, 0, "Number").unwrap();
        sheet.write_string(0, 1, columns::NAME).unwrap();
        sheet.write_string(1, 0, "SO001").unwrap();
        sheet.write_string(1, 1, "[SR HS DE IT] Software assistance Prod 24/7").unwrap();
        sheet.write_number(2, 0, 42.0).unwrap();
        workbook.save(dir.path().join("ALL_Service_Offering_DE.xlsx")).unwrap();

        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let sources = discover_sources(dir.path()).unwrap();
        assert_eq!(sources.len(), 1);

        let sheets = vec!["Child SO lvl1".to_string(), "Child SO lvl2".to_string()];
        let loaded = read_country_workbook(&sources[0], &sheets).unwrap();
        assert_eq!(loaded.country, "DE");
        assert_eq!(loaded.sheets.len(), 1);

        let lvl1 = &loaded.sheets[0];
        assert_eq!(lvl1.columns, vec!["Number", columns::NAME]);
        assert_eq!(lvl1.rows.len(), 2);
        assert_eq!(lvl1.rows[1].get("Number"), "42");
        // required and Germany LDAP columns are filled in
        assert!(lvl1.rows[0].has_column(columns::COMMITMENTS));
        assert!(lvl1.rows[0].has_column(columns::LDAP));
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ALL_Service_Offering_PL.xlsx"), "not a zip").unwrap();

        let loaded = load_catalog(dir.path(), &["Child SO lvl1".to_string()]).unwrap();
        assert!(loaded.is_empty());
    }
}
