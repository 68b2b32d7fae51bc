//! Write generated offerings to a multi-sheet workbook

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use super::columns;
use super::row::{OfferingRow, clean_value};
use crate::generator::GenerateError;

const MIN_COLUMN_WIDTH: usize = 10;
const MAX_COLUMN_WIDTH: usize = 100;
const MISSING_SCHEDULE_FILL: u32 = 0xFFCCCC;

/// Generated row plus its highlight flag
#[derive(Debug, Clone)]
pub struct GeneratedRow {
    pub row: OfferingRow,
    /// Schedule has no precedent in the source sheet
    pub missing_schedule: bool,
}

/// Rows for one output sheet such as `PL lvl1`
#[derive(Debug, Clone, Default)]
pub struct OutputSheet {
    pub name: String,
    /// Column order of the source sheet the rows came from
    pub source_columns: Vec<String>,
    pub rows: Vec<GeneratedRow>,
}

impl OutputSheet {
    pub fn new(name: impl Into<String>, source_columns: Vec<String>) -> Self {
        OutputSheet {
            name: name.into(),
            source_columns,
            rows: Vec::new(),
        }
    }

    /// Source order without `Number`, then columns only the rows have
    pub fn ordered_columns(&self) -> Vec<String> {
        let mut ordered: Vec<String> = self
            .source_columns
            .iter()
            .filter(|c| c.as_str() != columns::NUMBER)
            .cloned()
            .collect();

        for generated in &self.rows {
            for column in generated.row.columns() {
                if column != columns::NUMBER && !ordered.contains(column) {
                    ordered.push(column.clone());
                }
            }
        }
        ordered
    }
}

/// `true`/`false` from loose spellings; other values are kept
pub fn normalize_approval_required(value: &str) -> String {
    let value = clean_value(value);
    match value.to_lowercase().as_str() {
        "" | "false" | "no" | "n" | "0" => "false".to_string(),
        "true" | "yes" | "y" | "1" => "true".to_string(),
        _ => value.to_string(),
    }
}

pub fn normalize_approval_group(value: &str) -> String {
    let value = clean_value(value);
    if value.is_empty() {
        "empty".to_string()
    } else {
        value.to_string()
    }
}

/// Final text of a cell as written to the output
pub fn output_value(column: &str, row: &OfferingRow) -> String {
    let raw = row.get(column);
    match column {
        columns::APPROVAL_REQUIRED => normalize_approval_required(raw),
        columns::APPROVAL_GROUP => normalize_approval_group(raw),
        _ => clean_value(raw).to_string(),
    }
}

fn column_width(header: &str, values: &[Vec<String>], col: usize) -> f64 {
    let longest = values
        .iter()
        .filter_map(|row| row.get(col))
        .map(|v| v.chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or(0);
    (longest.min(MAX_COLUMN_WIDTH).max(MIN_COLUMN_WIDTH) + 2) as f64
}

/// Only the Name cell of a missing-schedule row is filled
fn is_highlighted(generated: &GeneratedRow, col: usize, name_col: Option<usize>) -> bool {
    generated.missing_schedule && Some(col) == name_col
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &OutputSheet, styled: bool) -> Result<(), XlsxError> {
    worksheet.set_name(&sheet.name)?;

    let headers = sheet.ordered_columns();
    let name_col = headers.iter().position(|c| c == columns::NAME);

    let values: Vec<Vec<String>> = sheet
        .rows
        .iter()
        .map(|generated| headers.iter().map(|c| output_value(c, &generated.row)).collect())
        .collect();

    let header_format = Format::new().set_bold().set_text_wrap();
    let wrap = Format::new().set_text_wrap();
    let highlight = Format::new()
        .set_text_wrap()
        .set_background_color(MISSING_SCHEDULE_FILL);

    for (col, name) in headers.iter().enumerate() {
        if styled {
            worksheet.write_string_with_format(0, col as u16, name, &header_format)?;
        } else {
            worksheet.write_string(0, col as u16, name)?;
        }
    }

    for (row_idx, (generated, cells)) in sheet.rows.iter().zip(&values).enumerate() {
        let row = (row_idx + 1) as u32;
        for (col, value) in cells.iter().enumerate() {
            let flagged = is_highlighted(generated, col, name_col);
            if value.is_empty() && !flagged {
                continue;
            }
            if !styled {
                worksheet.write_string(row, col as u16, value)?;
            } else if flagged {
                worksheet.write_string_with_format(row, col as u16, value, &highlight)?;
            } else {
                worksheet.write_string_with_format(row, col as u16, value, &wrap)?;
            }
        }
    }

    if styled {
        for (col, name) in headers.iter().enumerate() {
            worksheet.set_column_width(col as u16, column_width(name, &values, col))?;
        }
    }

    Ok(())
}

/// Build one worksheet, falling back to plain output when styling fails
fn render_sheet(sheet: &OutputSheet) -> Result<Worksheet, XlsxError> {
    render_with_fallback(sheet, |worksheet| write_sheet(worksheet, sheet, true))
}

/// Run `styled`; on error discard its partial output and write `sheet` plain
fn render_with_fallback<F>(sheet: &OutputSheet, styled: F) -> Result<Worksheet, XlsxError>
where
    F: FnOnce(&mut Worksheet) -> Result<(), XlsxError>,
{
    let mut worksheet = Worksheet::new();
    match styled(&mut worksheet) {
        Ok(()) => Ok(worksheet),
        Err(e) => {
            log::warn!("Error applying formatting to sheet '{}': {}", sheet.name, e);
            let mut plain = Worksheet::new();
            write_sheet(&mut plain, sheet, false)?;
            Ok(plain)
        }
    }
}

/// `Generated_Service_Offerings_<YYYYmmdd_HHMMSS>.xlsx` in `out_dir`
pub fn output_path(out_dir: &Path, timestamp: chrono::DateTime<chrono::Local>) -> PathBuf {
    out_dir.join(format!(
        "Generated_Service_Offerings_{}.xlsx",
        timestamp.format("%Y%m%d_%H%M%S")
    ))
}

/// Write all non-empty sheets to a new workbook in `out_dir`
pub fn write_output(out_dir: &Path, sheets: &[OutputSheet]) -> Result<PathBuf, GenerateError> {
    if sheets.iter().all(|s| s.rows.is_empty()) {
        return Err(GenerateError::NoMatches);
    }

    std::fs::create_dir_all(out_dir)?;
    let path = output_path(out_dir, chrono::Local::now());

    let mut workbook = Workbook::new();
    for sheet in sheets.iter().filter(|s| !s.rows.is_empty()) {
        log::info!("  Writing {}: {} rows", sheet.name, sheet.rows.len());
        let worksheet = render_sheet(sheet)?;
        workbook.push_worksheet(worksheet);
    }

    workbook.save(&path)?;
    log::info!("Excel file exported to: {}", path.display());

    Ok(path)
}
