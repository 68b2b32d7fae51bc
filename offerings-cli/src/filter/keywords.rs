//! Keyword expressions
//!
//! A keyword field is free text typed by the user:
//! - empty: matches everything
//! - contains a comma: every fragment must occur (`sap, finance`)
//! - otherwise one fragment per line, any may occur
//!
//! Matching is a case-insensitive substring test on whitespace-collapsed text.

/// Parsed keyword expression
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KeywordExpr {
    /// No keywords given
    #[default]
    Any,
    /// Every fragment must be present
    All(Vec<String>),
    /// At least one fragment must be present
    AnyOf(Vec<String>),
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn fragments<'a>(parts: impl Iterator<Item = &'a str>) -> Vec<String> {
    parts
        .map(normalize)
        .filter(|f| !f.is_empty())
        .collect()
}

impl KeywordExpr {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return KeywordExpr::Any;
        }

        let expr = if raw.contains(',') {
            KeywordExpr::All(fragments(raw.split(',')))
        } else {
            KeywordExpr::AnyOf(fragments(raw.lines()))
        };

        // Only separators, e.g. ", ,"
        if expr.fragments().is_empty() {
            KeywordExpr::Any
        } else {
            expr
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, KeywordExpr::Any)
    }

    pub fn fragments(&self) -> &[String] {
        match self {
            KeywordExpr::Any => &[],
            KeywordExpr::All(f) | KeywordExpr::AnyOf(f) => f,
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        let value = normalize(value);
        match self {
            KeywordExpr::Any => true,
            KeywordExpr::All(fragments) => fragments.iter().all(|f| value.contains(f.as_str())),
            KeywordExpr::AnyOf(fragments) => fragments.iter().any(|f| value.contains(f.as_str())),
        }
    }
}

impl std::fmt::Display for KeywordExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeywordExpr::Any => write!(f, "<any>"),
            KeywordExpr::All(fragments) => write!(f, "{}", fragments.join(" AND ")),
            KeywordExpr::AnyOf(fragments) => write!(f, "{}", fragments.join(" OR ")),
        }
    }
}
