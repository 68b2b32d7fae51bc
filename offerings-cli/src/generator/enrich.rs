//! Fill the enrichment columns of a generated row

use once_cell::sync::Lazy;
use regex::Regex;

use super::existing::ExistingCatalog;
use super::groups::GroupPair;
use crate::catalog::row::clean_value;
use crate::catalog::{OfferingRow, columns};
use crate::config::settings::{AliasValue, Settings};
use crate::naming::{Convention, pluralize_app_name};

/// Company pair after `CORP` inside the name tag, e.g. `[SR HS PL CORP DS CZ]`
static CORP_COMPANY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[.*?CORP\s+([A-Z]{2}\s+[A-Z]{2})").expect("corp company regex"));

/// Germany support groups with fixed company and LDAP values
const DE_COMPANY_MAPPINGS: &[(&str, &[&str], &str, &str)] = &[
    (
        "HS DE",
        &["HS DE IT Service Desk HC"],
        "DE Internal Patients",
        "CALDOM1.DE [Hospital Calbe]",
    ),
    (
        "HS DE",
        &["HS DE IT Service Desk - MCC"],
        "DE External Patients",
        "mednet-de.world [Medicover Clinics]",
    ),
    (
        "DS DE",
        &["DS DE IT Service Desk -Labs", "DS DE IT Service Desk - Labs"],
        "DE IFLB Laboratories\nDE IMD Laboratories",
        "imd-labore.intern [General]",
    ),
];

/// Per-combination inputs of one generated row
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    pub country: &'a str,
    pub level: u8,
    pub name: &'a str,
    pub app: Option<&'a str>,
    pub receiver: &'a str,
    pub schedule: &'a str,
    pub groups: &'a GroupPair,
    pub missing_schedule: bool,
}

/// Whether `needle`'s words appear consecutively in `haystack`, ignoring case
/// and punctuation
pub fn contains_words(haystack: &str, needle: &str) -> bool {
    let words: Vec<&str> = haystack
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let wanted: Vec<&str> = needle.split_whitespace().collect();
    if wanted.is_empty() {
        return false;
    }
    words
        .windows(wanted.len())
        .any(|window| window.iter().zip(&wanted).all(|(a, b)| a.eq_ignore_ascii_case(b)))
}

/// Fixed company and LDAP for a Germany support group
pub fn de_company_mapping(support_group: &str, receiver: &str) -> Option<(&'static str, &'static str)> {
    let normalized = crate::catalog::normalize_name(support_group);
    DE_COMPANY_MAPPINGS
        .iter()
        .find(|(recv, groups, _, _)| *recv == receiver && groups.iter().any(|g| normalized.contains(g)))
        .map(|(_, _, company, ldap)| (*company, *ldap))
}

/// Alias column matches a selected language
fn alias_column_matches(column: &str, language: &str) -> bool {
    if column.contains(&format!("- {}", language))
        || column.contains(&format!("({})", language))
        || column.contains(&format!("_{}", language))
        || column.ends_with(&format!(" {}", language))
    {
        return true;
    }
    match language {
        "ENG" => ["- EN", "- ENGLISH", "(EN)", "(ENGLISH)"].iter().any(|x| column.contains(x)),
        "DE" => ["- GER", "- GERMAN", "(GER)", "(GERMAN)"].iter().any(|x| column.contains(x)),
        _ => false,
    }
}

/// Applies run settings to base rows
pub struct Enricher<'a> {
    settings: &'a Settings,
    existing: &'a ExistingCatalog,
}

impl<'a> Enricher<'a> {
    pub fn new(settings: &'a Settings, existing: &'a ExistingCatalog) -> Self {
        Enricher { settings, existing }
    }

    /// Copy `base` and fill every enrichment column for `ctx`
    pub fn enrich(&self, base: &OfferingRow, ctx: &RowContext<'_>) -> OfferingRow {
        let settings = self.settings;
        let mut row = base.clone();

        row.set(columns::NAME, ctx.name);
        let parent = if settings.new_parent_mode() { base.get(columns::PARENT).to_string() } else { String::new() };
        row.set(columns::PARENT, parent);
        row.set(columns::DELIVERY_MANAGER, settings.delivery_manager.as_str());

        if let Some(criticality) = &settings.business_criticality {
            row.set(columns::BUSINESS_CRITICALITY, criticality.as_str());
        }
        row.set(columns::RECORD_VIEW, settings.kind.record_view());
        self.apply_approval(&mut row, ctx);
        row.set(columns::SUBSCRIBED_LOCATION, settings.subscribed_location.as_str());

        row.set(columns::SUPPORT_GROUP, ctx.groups.support.as_str());
        row.set(columns::MANAGED_BY, ctx.groups.managed.as_str());

        self.apply_aliases(&mut row, ctx);
        self.apply_company(&mut row, base, ctx);

        let commitments = settings.commitments.resolve(
            base.get(columns::COMMITMENTS),
            ctx.country,
            ctx.schedule,
            ctx.missing_schedule,
            ctx.level >= 2,
        );
        row.set(columns::COMMITMENTS, commitments);
        row.set(columns::DEPEND_ON, self.depend_on(ctx));

        row
    }

    fn apply_approval(&self, row: &mut OfferingRow, ctx: &RowContext<'_>) {
        let approval = &self.settings.approval;
        if approval.enabled {
            row.set(columns::APPROVAL_REQUIRED, "true");
            row.set(columns::APPROVAL_GROUP, approval.group_for(ctx.app));
        } else {
            row.set(columns::APPROVAL_REQUIRED, "false");
            row.set(columns::APPROVAL_GROUP, "empty");
        }
    }

    fn alias_value(&self, ctx: &RowContext<'_>) -> String {
        let aliases = &self.settings.aliases;
        let key = self.settings.countries.settings_key(ctx.country, ctx.receiver);
        let value = aliases.per_country.get(key).or(aliases.value.as_ref());
        match value {
            Some(AliasValue::Text(text)) => text.clone(),
            Some(AliasValue::AppNames) => ctx.app.unwrap_or_default().to_string(),
            None => String::new(),
        }
    }

    fn apply_aliases(&self, row: &mut OfferingRow, ctx: &RowContext<'_>) {
        let aliases = &self.settings.aliases;
        if !aliases.enabled {
            return;
        }
        let value = self.alias_value(ctx);
        if value.is_empty() || aliases.languages.is_empty() {
            return;
        }

        let targets = row.columns_where(|c| {
            columns::is_alias(c) && aliases.languages.iter().any(|lang| alias_column_matches(c, lang))
        });
        for column in targets {
            row.set(column, value.as_str());
        }
    }

    fn corp_company(ctx: &RowContext<'_>) -> String {
        CORP_COMPANY
            .captures(ctx.name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| ctx.receiver.to_string())
    }

    fn apply_company(&self, row: &mut OfferingRow, base: &OfferingRow, ctx: &RowContext<'_>) {
        let settings = self.settings;
        let corp = settings.convention.is_corp();
        let original_company = clean_value(base.get(columns::SUBSCRIBED_COMPANY));

        if settings.new_parent_mode() {
            let company = if corp { Self::corp_company(ctx) } else { ctx.receiver.to_string() };
            row.set(columns::SUBSCRIBED_COMPANY, company);
        } else if settings.countries.uses_receiver_division(ctx.country) {
            let support = ctx.groups.support.as_str();
            let mapping = de_company_mapping(support, ctx.receiver);
            let company = match mapping {
                Some((company, _)) => company,
                None if !original_company.is_empty() => original_company,
                None => support,
            };
            row.set(columns::SUBSCRIBED_COMPANY, company);
            self.apply_ldap(row, support, mapping.map(|(_, ldap)| ldap));
        } else if corp {
            row.set(columns::SUBSCRIBED_COMPANY, Self::corp_company(ctx));
        } else {
            row.set(columns::SUBSCRIBED_COMPANY, original_company);
        }
    }

    /// Clear LDAP columns, then write the fixed value or the values seen for
    /// the support group in the source catalog
    fn apply_ldap(&self, row: &mut OfferingRow, support_group: &str, fixed: Option<&str>) {
        let ldap_columns = row.columns_where(columns::is_ldap);
        if ldap_columns.is_empty() {
            return;
        }
        for column in &ldap_columns {
            row.set(column.as_str(), "");
        }

        match fixed {
            Some(ldap) => row.set(ldap_columns[0].as_str(), ldap),
            None => {
                if let Some(values) = self.existing.ldap_for(support_group) {
                    for (column, value) in values {
                        if row.has_column(column) {
                            row.set(column.as_str(), value.as_str());
                        }
                    }
                }
            }
        }
    }

    /// Tag inside the depend-on brackets, e.g. `HS PL Prod`
    pub fn depend_on_tag(&self, ctx: &RowContext<'_>) -> String {
        let settings = self.settings;
        let countries = &settings.countries;
        let it_convention = matches!(settings.convention, Convention::It | Convention::CorpIt);

        if it_convention && countries.is_ds_only(ctx.country) {
            format!("DS {} Prod", ctx.country)
        } else if settings.global_prod {
            "Global Prod".to_string()
        } else if countries.is_receiver_keyed(ctx.country) {
            let hs = format!("HS {}", ctx.country);
            if contains_words(ctx.name, &hs) {
                format!("{} Prod", hs)
            } else {
                format!("DS {} Prod", ctx.country)
            }
        } else if !ctx.receiver.is_empty() {
            format!("{} Prod", ctx.receiver)
        } else if settings.convention.is_corp() && !settings.delivering_tag.is_empty() {
            format!("{} Prod", settings.delivering_tag)
        } else {
            format!("HS {} Prod", ctx.country)
        }
    }

    fn depend_on(&self, ctx: &RowContext<'_>) -> String {
        if let Some(prefix) = &self.settings.depend_on_prefix {
            return match ctx.app {
                Some(app) => format!("[{}] {}", prefix, pluralize_app_name(app)),
                None => format!("[{}]", prefix),
            };
        }
        match ctx.app {
            Some(app) => format!("[{}] {}", self.depend_on_tag(ctx), app),
            None => String::new(),
        }
    }
}
