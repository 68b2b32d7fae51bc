//! Service commitment blocks
//!
//! A commitment block is newline-separated text, one line per commitment:
//!
//! ```text
//! [PL] SLA SR RSP Mon-Fri 9-17 P1-P4 4h
//! [PL] SLA SR RSL Mon-Fri 9-17 P1-P4 3d
//! [PL] OLA SR RSL Mon-Fri 9-17 P1-P4 3d
//! ```
//!
//! Blocks are built fresh, rewritten from an existing block (new schedule
//! and durations, same priorities), or taken from user-defined lines.
//! Nothing here fails: unrecognized lines pass through untouched.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::catalog::row::clean_value;
use crate::naming::ServiceKind;

pub const DEFAULT_PRIORITY: &str = "P1-P4";

static MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<head>.*?\b(?P<marker>RSP|RSL)\b)").expect("marker regex"));
static PRIORITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bP\d+(?:-P\d+)?\b").expect("priority regex"));
static PRIORITY_TAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<priority>\bP\d+(?:-P\d+)?\b)\s+.*$").expect("priority tail regex"));
static OLA: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bOLA\b").expect("ola regex"));
static LINE_COUNTRY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[(\w+)\]").expect("country regex"));

/// Response or resolution commitment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Metric {
    Rsp,
    Rsl,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Rsp => "RSP",
            Metric::Rsl => "RSL",
        }
    }
}

/// Handling of OLA lines when rewriting an existing block
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OlaPolicy {
    /// Keep whatever OLA lines the block has
    #[default]
    Preserve,
    /// Append an OLA RSL line to SR blocks that lack one
    EnsureForSr,
    /// Drop OLA lines for the listed countries
    SuppressFor(Vec<String>),
}

/// Schedule, priority and time of one user-defined commitment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitmentTerms {
    pub schedule: String,
    pub priority: String,
    pub time: String,
}

impl CommitmentTerms {
    fn is_complete(&self) -> bool {
        !self.schedule.trim().is_empty() && !self.priority.trim().is_empty() && !self.time.trim().is_empty()
    }
}

/// One explicit custom line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomLine {
    pub metric: Metric,
    #[serde(default = "default_priority")]
    pub priority: String,
    pub schedule: String,
    pub time: String,
}

fn default_priority() -> String {
    DEFAULT_PRIORITY.to_string()
}

/// User-defined commitments replacing the copied ones
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomCommitments {
    /// Bracket prefix of every line, e.g. `PL` or `DS PL Prod`
    pub country: String,
    pub rsp: Option<CommitmentTerms>,
    pub rsl: Option<CommitmentTerms>,
    /// Explicit lines; take precedence over `rsp`/`rsl` when present
    pub lines: Vec<CustomLine>,
}

/// Fresh block with `P1-P4` priorities; SR blocks carry an OLA line
pub fn commit_block(cc: &str, schedule: &str, rsp: &str, rsl: &str, kind: ServiceKind) -> String {
    let kind_str = kind.as_str();
    let mut lines = vec![
        format!("[{}] SLA {} RSP {} {} {}", cc, kind_str, schedule, DEFAULT_PRIORITY, rsp),
        format!("[{}] SLA {} RSL {} {} {}", cc, kind_str, schedule, DEFAULT_PRIORITY, rsl),
    ];
    if kind == ServiceKind::Sr {
        lines.push(format!("[{}] OLA {} RSL {} {} {}", cc, kind_str, schedule, DEFAULT_PRIORITY, rsl));
    }
    lines.join("\n")
}

fn priority_of(line: &str) -> &str {
    PRIORITY
        .find(line)
        .map(|m| m.as_str())
        .unwrap_or(DEFAULT_PRIORITY)
}

fn rewrite_line(line: &str, schedule: &str, rsp: &str, rsl: &str) -> String {
    if let Some(caps) = MARKER.captures(line) {
        let head = &caps["head"];
        let duration = match &caps["marker"] {
            "RSP" => rsp,
            _ => rsl,
        };
        let priority = priority_of(&line[head.len()..]);
        return format!("{} {} {} {}", head, schedule, priority, duration);
    }

    if OLA.is_match(line) {
        return PRIORITY_TAIL
            .replace(line, |caps: &regex::Captures| format!("{} {}", &caps["priority"], rsl))
            .into_owned();
    }

    line.to_string()
}

/// Rewrite an existing block with a new schedule and durations
///
/// Priorities are kept per line (default `P1-P4`). OLA lines take the
/// resolution duration. `policy` decides whether OLA lines are added or
/// dropped.
pub fn update_commitments(
    orig: &str,
    schedule: &str,
    rsp: &str,
    rsl: &str,
    kind: ServiceKind,
    country: &str,
    policy: &OlaPolicy,
) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut line_country: Option<String> = None;

    for line in orig.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line_country.is_none() {
            line_country = LINE_COUNTRY.captures(line).map(|c| c[1].to_string());
        }
        out.push(rewrite_line(line, schedule, rsp, rsl));
    }

    match policy {
        OlaPolicy::Preserve => {}
        OlaPolicy::EnsureForSr => {
            if kind == ServiceKind::Sr && !out.iter().any(|l| OLA.is_match(l)) {
                let cc = line_country.as_deref().unwrap_or(country);
                out.push(format!("[{}] OLA SR RSL {} {} {}", cc, schedule, DEFAULT_PRIORITY, rsl));
            }
        }
        OlaPolicy::SuppressFor(countries) => {
            if countries.iter().any(|c| c.eq_ignore_ascii_case(country)) {
                out.retain(|l| !OLA.is_match(l));
            }
        }
    }

    out.join("\n")
}

/// Block from user-selected RSP/RSL settings
///
/// Only complete settings produce a line. SR blocks with a resolution line
/// also get the matching OLA line.
pub fn custom_commit_block(
    cc: &str,
    kind: ServiceKind,
    rsp: Option<&CommitmentTerms>,
    rsl: Option<&CommitmentTerms>,
) -> String {
    let kind_str = kind.as_str();
    let mut lines = Vec::new();

    if let Some(terms) = rsp.filter(|s| s.is_complete()) {
        lines.push(format!("[{}] SLA {} RSP {} {} {}", cc, kind_str, terms.schedule, terms.priority, terms.time));
    }
    if let Some(terms) = rsl.filter(|s| s.is_complete()) {
        lines.push(format!("[{}] SLA {} RSL {} {} {}", cc, kind_str, terms.schedule, terms.priority, terms.time));
        if kind == ServiceKind::Sr {
            lines.push(format!("[{}] OLA {} RSL {} {} {}", cc, kind_str, terms.schedule, terms.priority, terms.time));
        }
    }

    lines.join("\n")
}

/// Block from explicit custom lines; incomplete lines are skipped
pub fn custom_lines_block(prefix: &str, kind: ServiceKind, lines: &[CustomLine]) -> String {
    let kind_str = kind.as_str();
    let mut out = Vec::new();

    for line in lines {
        if line.schedule.trim().is_empty() || line.time.trim().is_empty() {
            continue;
        }
        out.push(format!(
            "[{}] SLA {} {} {} {} {}",
            prefix,
            kind_str,
            line.metric.as_str(),
            line.schedule,
            line.priority,
            line.time
        ));
        if kind == ServiceKind::Sr && line.metric == Metric::Rsl {
            out.push(format!(
                "[{}] OLA {} RSL {} {} {}",
                prefix, kind_str, line.schedule, line.priority, line.time
            ));
        }
    }

    out.join("\n")
}

fn is_blank_block(value: &str) -> bool {
    let value = clean_value(value);
    value.is_empty() || value == "-"
}

/// Run-wide commitment settings applied to every generated row
#[derive(Debug, Clone, Default)]
pub struct CommitmentPlan {
    pub kind: ServiceKind,
    pub rsp: String,
    pub rsl: String,
    pub ola_policy: OlaPolicy,
    pub custom: Option<CustomCommitments>,
}

impl CommitmentPlan {
    fn fresh_or_update(&self, orig: &str, country: &str, schedule: &str) -> String {
        if is_blank_block(orig) {
            commit_block(country, schedule, &self.rsp, &self.rsl, self.kind)
        } else {
            update_commitments(
                clean_value(orig),
                schedule,
                &self.rsp,
                &self.rsl,
                self.kind,
                country,
                &self.ola_policy,
            )
        }
    }

    /// Commitments for one generated row
    ///
    /// Precedence: a schedule with no precedent always derives from the
    /// source block; level 2 rows without commitments stay empty; custom
    /// lines; custom RSP/RSL settings; otherwise fresh or rewritten.
    pub fn resolve(&self, orig: &str, country: &str, schedule: &str, missing_schedule: bool, lvl2: bool) -> String {
        if missing_schedule {
            return self.fresh_or_update(orig, country, schedule);
        }
        if lvl2 && is_blank_block(orig) {
            return String::new();
        }
        if let Some(custom) = &self.custom {
            let prefix = if custom.country.trim().is_empty() { country } else { custom.country.trim() };
            if !custom.lines.is_empty() {
                return custom_lines_block(prefix, self.kind, &custom.lines);
            }
            if custom.rsp.is_some() || custom.rsl.is_some() {
                return custom_commit_block(prefix, self.kind, custom.rsp.as_ref(), custom.rsl.as_ref());
            }
        }
        self.fresh_or_update(orig, country, schedule)
    }
}
