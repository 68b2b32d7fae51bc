//! Service kinds, divisions and naming-convention flavors

use serde::{Deserialize, Serialize};

/// Ticket type an offering is generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ServiceKind {
    /// Service request
    #[default]
    #[serde(rename = "SR", alias = "sr")]
    Sr,
    /// Incident
    #[serde(rename = "IM", alias = "im")]
    Im,
}

impl ServiceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Sr => "SR",
            ServiceKind::Im => "IM",
        }
    }

    /// Value written to the `Record view` column
    pub fn record_view(&self) -> &'static str {
        match self {
            ServiceKind::Sr => "Request Item",
            ServiceKind::Im => "Incident, Major Incident",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "SR" => Some(ServiceKind::Sr),
            "IM" => Some(ServiceKind::Im),
            _ => None,
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ServiceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceKind::parse(&s.trim().to_uppercase())
            .ok_or_else(|| format!("unknown service kind '{}', expected SR or IM", s))
    }
}

/// Business division delivering or receiving a service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Division {
    Hs,
    Ds,
}

impl Division {
    pub fn as_str(&self) -> &'static str {
        match self {
            Division::Hs => "HS",
            Division::Ds => "DS",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "HS" => Some(Division::Hs),
            "DS" => Some(Division::Ds),
            _ => None,
        }
    }

    /// Leading division of a tag such as `HS DE` or `DS PL`
    pub fn from_tag(tag: &str) -> Option<Self> {
        tag.split_whitespace().next().and_then(Division::parse)
    }
}

impl std::fmt::Display for Division {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Naming-convention flavor; exactly one is active per run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Convention {
    /// No flag selected
    #[default]
    Standard,
    It,
    Hr,
    Medical,
    /// DAK, rendered as the `Business Services` department
    Dak,
    Corp,
    CorpRecp,
    CorpIt,
    CorpDedicated,
}

impl Convention {
    /// CORP-family conventions carry delivering/receiving party tags
    pub fn is_corp(&self) -> bool {
        matches!(
            self,
            Convention::Corp | Convention::CorpRecp | Convention::CorpIt | Convention::CorpDedicated
        )
    }

    /// Department tag forced into the prefix by special-department conventions
    pub fn department(&self) -> Option<&'static str> {
        match self {
            Convention::It => Some("IT"),
            Convention::Hr => Some("HR"),
            Convention::Medical => Some("Medical"),
            Convention::Dak => Some("Business Services"),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Convention::Standard => "Standard",
            Convention::It => "IT",
            Convention::Hr => "HR",
            Convention::Medical => "Medical",
            Convention::Dak => "DAK (Business Services)",
            Convention::Corp => "CORP",
            Convention::CorpRecp => "CORP RecP",
            Convention::CorpIt => "CORP IT",
            Convention::CorpDedicated => "CORP Dedicated Services",
        }
    }
}

impl std::str::FromStr for Convention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace([' ', '_'], "-");
        match wanted.as_str() {
            "standard" | "none" => Ok(Convention::Standard),
            "it" => Ok(Convention::It),
            "hr" => Ok(Convention::Hr),
            "medical" => Ok(Convention::Medical),
            "dak" | "business-services" => Ok(Convention::Dak),
            "corp" => Ok(Convention::Corp),
            "corp-recp" | "recp" => Ok(Convention::CorpRecp),
            "corp-it" => Ok(Convention::CorpIt),
            "corp-dedicated" | "corp-dedicated-services" => Ok(Convention::CorpDedicated),
            _ => Err(format!("unknown naming convention '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("sr".parse::<ServiceKind>().unwrap(), ServiceKind::Sr);
        assert_eq!(" IM ".parse::<ServiceKind>().unwrap(), ServiceKind::Im);
        assert!("XX".parse::<ServiceKind>().is_err());
    }

    #[test]
    fn test_convention_parsing() {
        assert_eq!("CORP IT".parse::<Convention>().unwrap(), Convention::CorpIt);
        assert_eq!("corp_dedicated".parse::<Convention>().unwrap(), Convention::CorpDedicated);
        assert_eq!("DAK".parse::<Convention>().unwrap(), Convention::Dak);
        assert!("corporate".parse::<Convention>().is_err());
    }

    #[test]
    fn test_division_from_tag() {
        assert_eq!(Division::from_tag("DS DE"), Some(Division::Ds));
        assert_eq!(Division::from_tag("Finance"), None);
        assert_eq!(Division::from_tag(""), None);
    }

    #[test]
    fn test_corp_family() {
        assert!(Convention::CorpRecp.is_corp());
        assert!(!Convention::It.is_corp());
        assert_eq!(Convention::Dak.department(), Some("Business Services"));
    }
}
