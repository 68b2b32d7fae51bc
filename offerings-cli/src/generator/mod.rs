//! Offering generation
//!
//! Loads every source workbook, selects candidate rows, expands each one
//! over apps x receivers x schedules x support groups and writes the
//! resulting rows to a single output workbook. The run either writes one
//! complete workbook or fails without writing anything.

pub mod candidates;
pub mod enrich;
pub mod error;
pub mod existing;
pub mod expand;
pub mod groups;

pub use error::GenerateError;

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use crate::catalog::reader::load_catalog;
use crate::catalog::writer::write_output;
use crate::catalog::{CountryWorkbook, GeneratedRow, OfferingRow, OutputSheet, level_sheet, normalize_name, output_sheet_key};
use crate::config::Settings;
use crate::naming::{NameBuilder, NameRequest};
use candidates::{ScheduleIndex, base_pool};
use enrich::{Enricher, RowContext, contains_words};
use existing::ExistingCatalog;
use expand::{Axes, Combination};
use groups::groups_for;

/// Base rows are reported every this many rows
const PROGRESS_EVERY: usize = 10;

/// In-run identity of a generated row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SeenKey {
    name: String,
    receiver: String,
    app: Option<String>,
    schedule: String,
    support: String,
    managed: String,
}

/// Output sheets in first-use order
#[derive(Debug, Default)]
struct SheetSet {
    sheets: Vec<OutputSheet>,
    index: HashMap<String, usize>,
}

impl SheetSet {
    fn sheet_mut(&mut self, key: &str, source_columns: &[String]) -> &mut OutputSheet {
        let idx = match self.index.get(key) {
            Some(idx) => *idx,
            None => {
                self.sheets.push(OutputSheet::new(key, source_columns.to_vec()));
                self.index.insert(key.to_string(), self.sheets.len() - 1);
                self.sheets.len() - 1
            }
        };
        &mut self.sheets[idx]
    }
}

/// Source rows of one sheet being expanded
struct SheetJob<'p> {
    country: &'p str,
    level: u8,
    pool: &'p [OfferingRow],
    schedules: ScheduleIndex,
    source_columns: Vec<String>,
}

/// Expansion state for one run
pub struct Generator<'a> {
    settings: &'a Settings,
    existing: &'a ExistingCatalog,
    names: NameBuilder<'a>,
    enricher: Enricher<'a>,
    seen: HashSet<SeenKey>,
    sheets: SheetSet,
}

impl<'a> Generator<'a> {
    pub fn new(settings: &'a Settings, existing: &'a ExistingCatalog) -> Self {
        Generator {
            settings,
            existing,
            names: NameBuilder::new(settings.convention, &settings.countries).with_prod(settings.add_prod),
            enricher: Enricher::new(settings, existing),
            seen: HashSet::new(),
            sheets: SheetSet::default(),
        }
    }

    /// Expand every workbook; fails on the first duplicate name
    pub fn process(&mut self, workbooks: &[CountryWorkbook]) -> Result<(), GenerateError> {
        for (idx, workbook) in workbooks.iter().enumerate() {
            log::info!("Processing file {}/{}: {}", idx + 1, workbooks.len(), workbook.file_name);

            for level in self.settings.levels() {
                let sheet_name = level_sheet(level);
                let sheet = workbook.sheet(&sheet_name);
                let pool = base_pool(self.settings, sheet, level);
                if pool.is_empty() {
                    continue;
                }

                let source_columns = self
                    .existing
                    .column_order(&workbook.country, &sheet_name)
                    .map(<[String]>::to_vec)
                    .unwrap_or_else(|| pool[0].columns().to_vec());

                let job = SheetJob {
                    country: &workbook.country,
                    level,
                    pool: &pool,
                    schedules: ScheduleIndex::from_rows(&pool),
                    source_columns,
                };
                self.process_sheet(&job)?;
            }
        }
        Ok(())
    }

    fn process_sheet(&mut self, job: &SheetJob<'_>) -> Result<(), GenerateError> {
        let settings = self.settings;
        let axes = Axes::new(
            &settings.countries,
            job.country,
            settings.app_axis(),
            &settings.schedules_per_country,
            &settings.schedules,
        );

        log::info!(
            "Processing {} base row(s) x {} combination(s) for {} lvl{}",
            job.pool.len(),
            axes.combination_count(),
            job.country,
            job.level
        );

        for (idx, base) in job.pool.iter().enumerate() {
            if idx > 0 && idx % PROGRESS_EVERY == 0 {
                log::info!("  Processed {}/{} base rows...", idx, job.pool.len());
            }
            for combo in axes.combinations() {
                self.process_combination(job, base, &combo)?;
            }
        }
        Ok(())
    }

    /// Germany picks the first pool row naming the receiver as its base
    fn base_for_receiver<'p>(&self, job: &SheetJob<'p>, base: &'p OfferingRow, receiver: &str) -> &'p OfferingRow {
        if self.settings.new_parent_mode() || !self.settings.countries.uses_receiver_division(job.country) {
            return base;
        }
        job.pool
            .iter()
            .find(|row| contains_words(row.name(), receiver))
            .unwrap_or(base)
    }

    fn build_name(&self, parent_offering: &str, combo: &Combination<'_>, level: u8) -> String {
        let settings = self.settings;
        let req = NameRequest::new(parent_offering, settings.kind, combo.schedule)
            .with_app(combo.app)
            .with_receiver(combo.receiver)
            .with_delivering(&settings.delivering_tag);

        if level >= 2 {
            self.names.build_lvl2(&req, &settings.service_type_lvl2)
        } else {
            self.names.build(&req)
        }
    }

    fn process_combination(&mut self, job: &SheetJob<'_>, base: &OfferingRow, combo: &Combination<'_>) -> Result<(), GenerateError> {
        let settings = self.settings;
        let missing_schedule = job
            .schedules
            .is_missing(combo.schedule, settings.convention.is_corp());
        let row_base = self.base_for_receiver(job, base, combo.receiver);

        let name = self.build_name(base.parent_offering(), combo, job.level);
        let normalized = normalize_name(&name);
        if self.existing.contains(&normalized) {
            return Err(GenerateError::Duplicate { name });
        }

        for pair in groups_for(&settings.groups, &settings.countries, job.country, combo.receiver) {
            let key = SeenKey {
                name: normalized.clone(),
                receiver: combo.receiver.to_string(),
                app: combo.app.map(String::from),
                schedule: combo.schedule.to_string(),
                support: pair.support.clone(),
                managed: pair.managed.clone(),
            };
            if !self.seen.insert(key) {
                log::debug!("Skipping repeated offering: {}", name);
                continue;
            }

            let ctx = RowContext {
                country: job.country,
                level: job.level,
                name: &name,
                app: combo.app,
                receiver: combo.receiver,
                schedule: combo.schedule,
                groups: &pair,
                missing_schedule,
            };
            let row = self.enricher.enrich(row_base, &ctx);
            log::debug!("Generated: {}", name);

            let sheet_key = output_sheet_key(job.country, job.level);
            self.sheets
                .sheet_mut(&sheet_key, &job.source_columns)
                .rows
                .push(GeneratedRow { row, missing_schedule });
        }
        Ok(())
    }

    pub fn into_sheets(self) -> Vec<OutputSheet> {
        self.sheets.sheets
    }
}

/// Generate output sheets from already loaded workbooks
pub fn generate(settings: &Settings, workbooks: &[CountryWorkbook]) -> Result<Vec<OutputSheet>, GenerateError> {
    let existing = ExistingCatalog::collect(workbooks);
    log::info!("Loaded {} existing offering name(s)", existing.name_count());
    let mut generator = Generator::new(settings, &existing);
    generator.process(workbooks)?;

    let sheets = generator.into_sheets();
    let total: usize = sheets.iter().map(|s| s.rows.len()).sum();
    log::info!("Generated {} offering(s) across {} sheet(s)", total, sheets.len());
    Ok(sheets)
}

/// Run a full generation and return the written workbook path
pub fn run(settings: &Settings) -> Result<PathBuf, GenerateError> {
    let sheet_names = [level_sheet(1), level_sheet(2)];
    let workbooks = load_catalog(&settings.source_dir, &sheet_names)
        .map_err(GenerateError::Load)?;

    let sheets = generate(settings, &workbooks)?;
    write_output(&settings.output_dir, &sheets)
}
