//! Run configuration
//!
//! A run is described by a TOML file deserialized into [`RunConfig`], a
//! direct mirror of what the user typed. [`Settings::from_config`] validates
//! it once into the immutable [`Settings`] the generator works from.

pub mod settings;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::commitments::{CustomCommitments, OlaPolicy};
use crate::naming::{Convention, CountryTable, ServiceKind};

pub use settings::Settings;

const APP_DIR: &str = "service-offerings";
const RUN_FILE: &str = "run.toml";

/// A single value or a list of values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl<T: Clone> OneOrMany<T> {
    pub fn to_vec(&self) -> Vec<T> {
        match self {
            OneOrMany::One(v) => vec![v.clone()],
            OneOrMany::Many(vs) => vs.clone(),
        }
    }
}

/// Raw run file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub source_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub kind: ServiceKind,
    /// Naming conventions; at most one may be selected
    pub convention: OneOrMany<Convention>,
    /// Entries may hold several apps separated by `,`, `;` or newlines
    pub apps: Vec<String>,
    /// Schedule suffixes; newline-separated text or a list
    pub schedules: OneOrMany<String>,
    pub schedules_per_country: BTreeMap<String, OneOrMany<String>>,
    pub add_prod: Option<bool>,
    pub global_prod: bool,
    pub delivery_manager: String,
    pub delivering_tag: String,
    pub business_criticality: String,
    pub lvl2: Lvl2Config,
    pub keywords: KeywordConfig,
    pub commitments: CommitmentConfig,
    pub groups: GroupConfig,
    pub approval: ApprovalConfig,
    pub subscribed_location: String,
    pub aliases: AliasConfig,
    pub depend_on: DependOnConfig,
    pub new_parent: NewParentConfig,
    pub countries: Option<CountryTable>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Matched against `Parent Offering`
    pub parent: String,
    /// Matched against the child offering name
    pub child: String,
    pub excluded: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Lvl2Config {
    pub enabled: bool,
    pub service_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitmentConfig {
    pub rsp: String,
    pub rsl: String,
    pub ola_policy: OlaPolicy,
    pub custom: Option<CustomCommitments>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupConfig {
    pub support_group: String,
    pub managed_by_group: String,
    /// Keyed by country, or by receiver (`HS PL`) for receiver-keyed countries
    pub support_per_country: BTreeMap<String, String>,
    pub managed_per_country: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApprovalConfig {
    pub enabled: bool,
    pub group: String,
    /// Approval group per application
    pub per_app: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasConfig {
    pub enabled: bool,
    /// Alias text, or `use-app-names`
    pub value: String,
    pub languages: Vec<String>,
    pub per_country: BTreeMap<String, String>,
}

impl Default for AliasConfig {
    fn default() -> Self {
        AliasConfig {
            enabled: false,
            value: String::new(),
            languages: vec!["ENG".to_string()],
            per_country: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DependOnConfig {
    /// Replaces the computed tag, e.g. `DS PL`
    pub custom_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewParentPair {
    pub offering: String,
    pub parent: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewParentConfig {
    pub enabled: bool,
    pub pairs: Vec<NewParentPair>,
}

impl RunConfig {
    /// Load a run file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content).with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: RunConfig = toml::from_str(content)?;
        log::debug!("Loaded run config: {:?}", config);
        Ok(config)
    }
}

/// `<config_dir>/service-offerings/run.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(RUN_FILE)
}

/// Commented run file written by `init-config`
pub const TEMPLATE: &str = r#"# Service offerings generator run file

source_dir = "./input"
output_dir = "./output"

# SR or IM
kind = "SR"

# standard, it, hr, medical, dak, corp, corp-recp, corp-it, corp-dedicated
convention = "standard"

apps = ["Outlook", "Teams"]
schedules = ["Mon-Fri 9-17"]

add_prod = true
global_prod = false
delivery_manager = ""
# Delivering party for CORP conventions, e.g. "HS PL"
delivering_tag = ""
business_criticality = ""
# Empty means Global
subscribed_location = ""

[schedules_per_country]
# "HS PL" = ["Mon-Fri 8-16"]
# DE = "Mon-Fri 7-16\nMon-Fri 7-18"

[keywords]
# comma = all must match, newline = any may match
parent = "software"
child = ""
excluded = ""

[lvl2]
enabled = false
service_type = ""

[commitments]
rsp = "4h"
rsl = "3d"
# preserve, ensure-for-sr, or { suppress-for = ["PL"] }
ola_policy = "preserve"

# [commitments.custom]
# country = "PL"
# rsp = { schedule = "Mon-Fri 6-21", priority = "P1-P4", time = "2h" }
# rsl = { schedule = "Mon-Fri 6-21", priority = "P1-P4", time = "1d" }

[groups]
support_group = ""
managed_by_group = ""

[groups.support_per_country]
# "HS PL" = "HS PL IT Service Desk"
# DE = "HS DE IT Service Desk HC\nDS DE IT Service Desk - Labs"

[groups.managed_per_country]

[approval]
enabled = false
group = ""

[aliases]
enabled = false
# text, or "use-app-names"
value = ""
languages = ["ENG"]

[depend_on]
custom_prefix = ""

[new_parent]
enabled = false
# pairs = [{ offering = "[Parent HS PL IT] Software assistance", parent = "IT Services" }]
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses() {
        let config = RunConfig::from_toml(TEMPLATE).unwrap();
        assert_eq!(config.kind, ServiceKind::Sr);
        assert_eq!(config.convention, OneOrMany::One(Convention::Standard));
        assert_eq!(config.apps, vec!["Outlook", "Teams"]);
        assert_eq!(config.keywords.parent, "software");
        assert_eq!(config.commitments.ola_policy, OlaPolicy::Preserve);
        assert_eq!(config.aliases.languages, vec!["ENG"]);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = RunConfig::from_toml("").unwrap();
        assert_eq!(config.kind, ServiceKind::Sr);
        assert_eq!(config.convention, OneOrMany::Many(vec![]));
        assert!(config.add_prod.is_none());
        assert!(config.countries.is_none());
    }

    #[test]
    fn test_ola_policy_forms() {
        let config = RunConfig::from_toml(
            r#"
            [commitments]
            ola_policy = { suppress-for = ["PL"] }
            "#,
        )
        .unwrap();
        assert_eq!(
            config.commitments.ola_policy,
            OlaPolicy::SuppressFor(vec!["PL".to_string()])
        );
    }

    #[test]
    fn test_schedule_forms() {
        let config = RunConfig::from_toml(
            r#"
            schedules = "Mon-Fri 9-17"
            [schedules_per_country]
            "HS PL" = ["Mon-Fri 8-16", "24/7"]
            DE = "Mon-Fri 7-16"
            "#,
        )
        .unwrap();
        assert_eq!(config.schedules.to_vec(), vec!["Mon-Fri 9-17"]);
        assert_eq!(config.schedules_per_country["HS PL"].to_vec().len(), 2);
    }

    #[test]
    fn test_from_file_reports_path() {
        let err = RunConfig::from_file(Path::new("/nonexistent/run.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/run.toml"));
    }

    #[test]
    fn test_default_config_path() {
        let path = default_config_path();
        assert!(path.ends_with("service-offerings/run.toml"));
    }
}
