//! Lifecycle discard check

use crate::catalog::columns;
use crate::catalog::row::OfferingRow;

/// Stage/status values of offerings that are being phased out
pub const DISCARDED: &[&str] = &["retired", "retiring", "end of life", "end of support"];

fn is_discarded(value: &str) -> bool {
    DISCARDED.contains(&value.trim().to_lowercase().as_str())
}

/// Whether neither the lifecycle stage nor status is in the discard set
pub fn lifecycle_ok(row: &OfferingRow) -> bool {
    !is_discarded(row.get(columns::LIFECYCLE_STAGE)) && !is_discarded(row.get(columns::LIFECYCLE_STATUS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discarded_values() {
        let row = OfferingRow::from_pairs([(columns::LIFECYCLE_STATUS, " End of Life ")]);
        assert!(!lifecycle_ok(&row));

        let row = OfferingRow::from_pairs([(columns::LIFECYCLE_STAGE, "Retiring")]);
        assert!(!lifecycle_ok(&row));
    }

    #[test]
    fn test_active_values() {
        let row = OfferingRow::from_pairs([
            (columns::LIFECYCLE_STAGE, "Operational"),
            (columns::LIFECYCLE_STATUS, "In Use"),
        ]);
        assert!(lifecycle_ok(&row));
        assert!(lifecycle_ok(&OfferingRow::new()));
    }
}
