//! Candidate row selection

pub mod keywords;
pub mod lifecycle;

pub use keywords::KeywordExpr;
pub use lifecycle::lifecycle_ok;

use crate::catalog::columns;
use crate::catalog::row::{OfferingRow, clean_value};

/// Keyword filter over the parent and child name columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowFilter {
    pub parent: KeywordExpr,
    pub child: KeywordExpr,
    pub excluded: KeywordExpr,
}

impl RowFilter {
    pub fn new(parent: &str, child: &str, excluded: &str) -> Self {
        RowFilter {
            parent: KeywordExpr::parse(parent),
            child: KeywordExpr::parse(child),
            excluded: KeywordExpr::parse(excluded),
        }
    }

    /// Whether any keyword restricts the selection
    pub fn has_keywords(&self) -> bool {
        !self.parent.is_any() || !self.child.is_any()
    }

    /// Inclusion on both columns, then the exclusion veto on either
    pub fn matches(&self, parent_offering: &str, name: &str) -> bool {
        if !self.parent.matches(parent_offering) || !self.child.matches(name) {
            return false;
        }
        if self.excluded.is_any() {
            return true;
        }
        !(self.excluded.matches(parent_offering) || self.excluded.matches(name))
    }

    pub fn matches_row(&self, row: &OfferingRow) -> bool {
        self.matches(row.parent_offering(), row.name())
    }
}

/// Level 1 names must already be SR or IM offerings
fn has_ticket_prefix(name: &str) -> bool {
    let name = name.trim_start();
    name.starts_with("[SR ") || name.starts_with("[IM ")
}

/// Full candidate check for a source row of the given level
///
/// Level 1 rows additionally need an `[SR `/`[IM ` name prefix and
/// commitments other than `-`.
pub fn is_candidate(filter: &RowFilter, row: &OfferingRow, level: u8) -> bool {
    if !filter.matches_row(row) || !lifecycle_ok(row) {
        return false;
    }
    if level >= 2 {
        return true;
    }
    has_ticket_prefix(row.name()) && clean_value(row.get(columns::COMMITMENTS)) != "-"
}
