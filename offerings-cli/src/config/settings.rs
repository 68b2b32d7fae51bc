//! Validated, immutable run settings

use std::collections::BTreeMap;
use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{NewParentPair, OneOrMany, RunConfig};
use crate::commitments::CommitmentPlan;
use crate::filter::RowFilter;
use crate::generator::GenerateError;
use crate::naming::{Convention, CountryTable, ServiceKind};

static APP_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,\n;]+").expect("app separator regex"));

/// Alias value marker meaning "use the application name"
pub const USE_APP_NAMES: &str = "use-app-names";

/// Support and managed-by groups
#[derive(Debug, Clone, Default)]
pub struct GroupSettings {
    pub support_group: String,
    pub managed_by_group: String,
    pub support_per_country: BTreeMap<String, String>,
    pub managed_per_country: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct ApprovalSettings {
    pub enabled: bool,
    pub group: String,
    pub per_app: BTreeMap<String, String>,
}

impl ApprovalSettings {
    /// Approval group for an app, falling back to the global group
    pub fn group_for(&self, app: Option<&str>) -> &str {
        app.and_then(|a| self.per_app.get(a))
            .map(String::as_str)
            .filter(|g| !g.trim().is_empty())
            .unwrap_or(&self.group)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasValue {
    Text(String),
    AppNames,
}

impl AliasValue {
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            None
        } else if raw.eq_ignore_ascii_case(USE_APP_NAMES) || raw == "USE_APP_NAMES" {
            Some(AliasValue::AppNames)
        } else {
            Some(AliasValue::Text(raw.to_string()))
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AliasSettings {
    pub enabled: bool,
    pub value: Option<AliasValue>,
    pub languages: Vec<String>,
    pub per_country: BTreeMap<String, AliasValue>,
}

/// Everything one generation run needs
#[derive(Debug, Clone)]
pub struct Settings {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub kind: ServiceKind,
    pub convention: Convention,
    pub filter: RowFilter,
    /// Empty when no application was given
    pub apps: Vec<String>,
    pub schedules: Vec<String>,
    pub schedules_per_country: BTreeMap<String, Vec<String>>,
    pub add_prod: bool,
    pub global_prod: bool,
    pub delivery_manager: String,
    pub delivering_tag: String,
    pub business_criticality: Option<String>,
    pub include_lvl2: bool,
    pub service_type_lvl2: String,
    pub commitments: CommitmentPlan,
    pub groups: GroupSettings,
    pub approval: ApprovalSettings,
    pub subscribed_location: String,
    pub aliases: AliasSettings,
    pub depend_on_prefix: Option<String>,
    pub new_parents: Vec<NewParentPair>,
    pub countries: CountryTable,
}

/// Split app entries on `,`, `;` and newlines
pub fn parse_apps(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|entry| APP_SEPARATORS.split(entry))
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(String::from)
        .collect()
}

/// Schedules from list items, each of which may hold several lines
fn parse_schedules(raw: &OneOrMany<String>) -> Vec<String> {
    raw.to_vec()
        .iter()
        .flat_map(|s| s.lines())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() { None } else { Some(value.to_string()) }
}

impl Settings {
    /// Validate a raw run file
    pub fn from_config(config: RunConfig) -> Result<Self, GenerateError> {
        let conventions = config.convention.to_vec();
        if conventions.len() > 1 {
            return Err(GenerateError::Config("Please select only one naming type".to_string()));
        }
        let convention = conventions.first().copied().unwrap_or_default();

        let new_parents: Vec<NewParentPair> = if config.new_parent.enabled {
            config
                .new_parent
                .pairs
                .iter()
                .filter(|p| !p.offering.trim().is_empty())
                .cloned()
                .collect()
        } else {
            Vec::new()
        };
        if config.new_parent.enabled && new_parents.is_empty() {
            return Err(GenerateError::Config(
                "New parent mode needs at least one parent offering".to_string(),
            ));
        }

        let filter = RowFilter::new(&config.keywords.parent, &config.keywords.child, &config.keywords.excluded);
        if new_parents.is_empty() && !filter.has_keywords() {
            return Err(GenerateError::Config(
                "Please provide parent or child keywords to select offerings".to_string(),
            ));
        }

        let schedules = parse_schedules(&config.schedules);
        let schedules_per_country: BTreeMap<String, Vec<String>> = config
            .schedules_per_country
            .iter()
            .map(|(key, value)| (key.trim().to_string(), parse_schedules(value)))
            .filter(|(_, value)| !value.is_empty())
            .collect();
        if schedules.is_empty() && schedules_per_country.is_empty() {
            return Err(GenerateError::Config("Please provide at least one schedule".to_string()));
        }

        let source_dir = config
            .source_dir
            .clone()
            .ok_or_else(|| GenerateError::Config("Source directory is not set".to_string()))?;
        if !source_dir.is_dir() {
            return Err(GenerateError::Config(format!(
                "Source directory does not exist: {}",
                source_dir.display()
            )));
        }
        let output_dir = config.output_dir.clone().unwrap_or_else(|| PathBuf::from("."));

        let commitments = CommitmentPlan {
            kind: config.kind,
            rsp: config.commitments.rsp.trim().to_string(),
            rsl: config.commitments.rsl.trim().to_string(),
            ola_policy: config.commitments.ola_policy.clone(),
            custom: config.commitments.custom.clone(),
        };

        let aliases = AliasSettings {
            enabled: config.aliases.enabled,
            value: AliasValue::parse(&config.aliases.value),
            languages: config
                .aliases
                .languages
                .iter()
                .filter_map(|l| non_empty(l))
                .collect(),
            per_country: config
                .aliases
                .per_country
                .iter()
                .filter_map(|(k, v)| AliasValue::parse(v).map(|v| (k.trim().to_string(), v)))
                .collect(),
        };

        let settings = Settings {
            source_dir,
            output_dir,
            kind: config.kind,
            convention,
            filter,
            apps: parse_apps(&config.apps),
            schedules,
            schedules_per_country,
            add_prod: config.add_prod.unwrap_or(true),
            global_prod: config.global_prod,
            delivery_manager: config.delivery_manager.trim().to_string(),
            delivering_tag: config.delivering_tag.trim().to_string(),
            business_criticality: non_empty(&config.business_criticality),
            include_lvl2: config.lvl2.enabled,
            service_type_lvl2: config.lvl2.service_type.trim().to_string(),
            commitments,
            groups: GroupSettings {
                support_group: config.groups.support_group.trim().to_string(),
                managed_by_group: config.groups.managed_by_group.trim().to_string(),
                support_per_country: config.groups.support_per_country.clone(),
                managed_per_country: config.groups.managed_per_country.clone(),
            },
            approval: ApprovalSettings {
                enabled: config.approval.enabled,
                group: config.approval.group.trim().to_string(),
                per_app: config.approval.per_app.clone(),
            },
            subscribed_location: non_empty(&config.subscribed_location).unwrap_or_else(|| "Global".to_string()),
            aliases,
            depend_on_prefix: non_empty(&config.depend_on.custom_prefix),
            new_parents,
            countries: config.countries.clone().unwrap_or_default(),
        };

        log::debug!(
            "Settings: convention={}, kind={}, {} app(s), {} schedule(s)",
            settings.convention.label(),
            settings.kind,
            settings.apps.len(),
            settings.schedules.len()
        );

        Ok(settings)
    }

    /// Catalog levels to generate
    pub fn levels(&self) -> Vec<u8> {
        if self.include_lvl2 { vec![1, 2] } else { vec![1] }
    }

    pub fn new_parent_mode(&self) -> bool {
        !self.new_parents.is_empty()
    }

    /// Apps to expand over; `[None]` when no app was given
    pub fn app_axis(&self) -> Vec<Option<String>> {
        if self.apps.is_empty() {
            vec![None]
        } else {
            self.apps.iter().cloned().map(Some).collect()
        }
    }
}
