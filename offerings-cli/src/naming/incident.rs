//! `incident solving` post-processing for generated names

use once_cell::sync::Lazy;
use regex::Regex;

static INCIDENT_SOLVING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bincident\s+solving\b").expect("incident regex"));

/// Make every `incident` token be followed directly by `solving`
///
/// Names already containing `incident solving`, or without any `incident`
/// token, are returned unchanged. Otherwise standalone `solving` tokens are
/// dropped and one is inserted after each `incident`, so words that sat
/// between the two (usually the application) move behind `solving`.
///
/// ```text
/// [IM HS PL IT] Software incident Outlook solving Prod Mon-Fri 9-17
/// [IM HS PL IT] Software incident solving Outlook Prod Mon-Fri 9-17
/// ```
pub fn ensure_incident_naming(name: &str) -> String {
    if INCIDENT_SOLVING.is_match(name) {
        return name.to_string();
    }

    let tokens: Vec<&str> = name.split_whitespace().collect();
    if !tokens.iter().any(|t| t.eq_ignore_ascii_case("incident")) {
        return name.to_string();
    }

    let mut out: Vec<&str> = Vec::with_capacity(tokens.len() + 1);
    for token in tokens {
        if token.eq_ignore_ascii_case("solving") {
            continue;
        }
        out.push(token);
        if token.eq_ignore_ascii_case("incident") {
            out.push("solving");
        }
    }

    out.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_solving_after_incident() {
        assert_eq!(
            ensure_incident_naming("[IM HS PL IT] Software incident Outlook solving Prod Mon-Fri 9-17"),
            "[IM HS PL IT] Software incident solving Outlook Prod Mon-Fri 9-17"
        );
    }

    #[test]
    fn test_already_correct_is_unchanged() {
        let name = "[IM DS MD IT] Software incident solving Prod Mon-Fri 8-16";
        assert_eq!(ensure_incident_naming(name), name);
    }

    #[test]
    fn test_no_incident_keeps_solving() {
        let name = "[IM HS PL IT] Software assistance Outlook solving Prod Mon-Fri 9-17";
        assert_eq!(ensure_incident_naming(name), name);
    }

    #[test]
    fn test_adds_missing_solving() {
        assert_eq!(
            ensure_incident_naming("[SR HS PL] Incident Outlook Prod 24/7"),
            "[SR HS PL] Incident solving Outlook Prod 24/7"
        );
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "[IM HS PL IT] Software incident Outlook solving Prod Mon-Fri 9-17",
            "[IM HS PL] incident incident solving x",
            "[IM HS PL] plain name",
            "solving incident",
        ];
        for input in inputs {
            let once = ensure_incident_naming(input);
            assert_eq!(ensure_incident_naming(&once), once, "input: {}", input);
        }
    }
}
