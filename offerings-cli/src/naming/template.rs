//! Parent offering template parsing
//!
//! A parent offering looks like `[Parent HS PL IT] Software assistance`.
//! The bracketed tag is free text scanned token by token, so the parser
//! turns it into a typed [`ParentTemplate`] once and the naming branches
//! work on that instead of rescanning strings.
//!
//! Classification rules, in order, for each whitespace token of the tag:
//! - `SR` / `IM` -> service kind
//! - `HS` / `DS` -> division (first one wins)
//! - `IT`, `HR`, `Medical`, `Business Services` -> department (first one wins)
//! - any other two-letter uppercase token -> country (first one wins, later
//!   codes are ignored)
//! - everything else -> topic, in order

use once_cell::sync::Lazy;
use regex::Regex;

use super::convention::{Division, ServiceKind};

static PARENT_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[Parent\s+(.*?)\]").expect("parent tag regex"));

/// Marker token identifying receiving-party templates
pub const RECP_MARKER: &str = "RecP";

const STOP_WORDS: &[&str] = &["the", "a", "an", "and", "or", "for", "of", "in", "on", "to"];

/// Typed view of a parent offering string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentTemplate {
    /// Raw text between `[Parent ` and the first `]`
    pub content: String,
    /// Text after the first `]` of the whole string
    pub catalog: String,
    pub kind: Option<ServiceKind>,
    pub division: Option<Division>,
    pub country: Option<String>,
    pub department: Option<String>,
    /// Remaining tag tokens in their original order
    pub topic: Vec<String>,
}

fn is_country_code(token: &str) -> bool {
    token.len() == 2 && token.chars().all(|c| c.is_ascii_uppercase())
}

impl ParentTemplate {
    pub fn parse(parent_offering: &str) -> Self {
        let content = PARENT_TAG
            .captures(parent_offering)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();

        let catalog = parent_offering
            .split_once(']')
            .map(|(_, rest)| rest.trim().to_string())
            .unwrap_or_default();

        let mut template = ParentTemplate {
            content: content.clone(),
            catalog,
            ..Default::default()
        };

        let tokens: Vec<&str> = content.split_whitespace().collect();
        let mut i = 0;
        while i < tokens.len() {
            let token = tokens[i];

            if token == "Business" && tokens.get(i + 1) == Some(&"Services") {
                if template.department.is_none() {
                    template.department = Some("Business Services".to_string());
                }
                i += 2;
                continue;
            }

            if let Some(kind) = ServiceKind::parse(token) {
                template.kind.get_or_insert(kind);
            } else if let Some(division) = Division::parse(token) {
                template.division.get_or_insert(division);
            } else if matches!(token, "IT" | "HR" | "Medical") {
                if template.department.is_none() {
                    template.department = Some(token.to_string());
                }
            } else if is_country_code(token) {
                template.country.get_or_insert_with(|| token.to_string());
            } else {
                template.topic.push(token.to_string());
            }
            i += 1;
        }

        template
    }

    pub fn country(&self) -> &str {
        self.country.as_deref().unwrap_or("")
    }

    /// Whether the tag carries the `RecP` receiving-party marker
    pub fn has_recp(&self) -> bool {
        self.topic.iter().any(|t| t == RECP_MARKER)
    }

    /// Topic words without the `RecP` marker
    pub fn topic_words(&self) -> impl Iterator<Item = &str> {
        self.topic
            .iter()
            .map(|t| t.as_str())
            .filter(|t| *t != RECP_MARKER)
    }

    /// Whole topic phrase, e.g. `Security & Privacy`
    pub fn topic_phrase(&self) -> Option<String> {
        let words: Vec<&str> = self.topic_words().collect();
        if words.is_empty() {
            None
        } else {
            Some(words.join(" "))
        }
    }

    pub fn first_topic(&self) -> Option<&str> {
        self.topic_words().next()
    }

    pub fn last_topic(&self) -> Option<&str> {
        self.topic_words().last()
    }

    pub fn catalog_lower(&self) -> String {
        self.catalog.to_lowercase()
    }

    /// First catalog word that is not a stop word
    pub fn first_significant_word(&self) -> Option<&str> {
        self.catalog
            .split_whitespace()
            .find(|w| !STOP_WORDS.contains(&w.to_lowercase().as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_template() {
        let t = ParentTemplate::parse("[Parent HS PL IT] Software assistance");
        assert_eq!(t.content, "HS PL IT");
        assert_eq!(t.catalog, "Software assistance");
        assert_eq!(t.division, Some(Division::Hs));
        assert_eq!(t.country(), "PL");
        assert_eq!(t.department.as_deref(), Some("IT"));
        assert!(t.topic.is_empty());
    }

    #[test]
    fn test_topic_and_recp() {
        let t = ParentTemplate::parse("[Parent DS MD RecP Security & Privacy] Access request");
        assert_eq!(t.division, Some(Division::Ds));
        assert_eq!(t.country(), "MD");
        assert!(t.has_recp());
        assert_eq!(t.topic_phrase().as_deref(), Some("Security & Privacy"));
        assert_eq!(t.first_topic(), Some("Security"));
        assert_eq!(t.last_topic(), Some("Privacy"));
    }

    #[test]
    fn test_business_services_department() {
        let t = ParentTemplate::parse("[Parent HS PL Business Services] Invoices");
        assert_eq!(t.department.as_deref(), Some("Business Services"));
        assert!(t.topic.is_empty());
    }

    #[test]
    fn test_missing_tag() {
        let t = ParentTemplate::parse("Software assistance");
        assert_eq!(t.content, "");
        assert_eq!(t.catalog, "");
        assert_eq!(t.country, None);
    }

    #[test]
    fn test_catalog_without_parent_tag() {
        // Catalog text is taken after the first bracket even for non-Parent tags
        let t = ParentTemplate::parse("[SR HS PL IT] Software assistance");
        assert_eq!(t.content, "");
        assert_eq!(t.catalog, "Software assistance");
    }

    #[test]
    fn test_first_country_wins() {
        let t = ParentTemplate::parse("[Parent HS PL CORP DS DE] Hosting");
        assert_eq!(t.country(), "PL");
        assert_eq!(t.division, Some(Division::Hs));
        assert_eq!(t.topic, vec!["CORP"]);
    }

    #[test]
    fn test_first_significant_word() {
        let t = ParentTemplate::parse("[Parent HS PL] the Laptop configuration");
        assert_eq!(t.first_significant_word(), Some("Laptop"));
    }
}
