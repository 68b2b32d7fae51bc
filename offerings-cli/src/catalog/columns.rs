//! Catalog column names

pub const NAME: &str = "Name (Child Service Offering lvl 1)";
pub const PARENT_OFFERING: &str = "Parent Offering";
pub const PARENT: &str = "Parent";
pub const DEPEND_ON: &str = "Service Offerings | Depend On (Application Service)";
pub const COMMITMENTS: &str = "Service Commitments";
pub const DELIVERY_MANAGER: &str = "Delivery Manager";
pub const SUBSCRIBED_LOCATION: &str = "Subscribed by Location";
pub const PHASE: &str = "Phase";
pub const STATUS: &str = "Status";
pub const LIFECYCLE_STAGE: &str = "Life Cycle Stage";
pub const LIFECYCLE_STATUS: &str = "Life Cycle Status";
pub const SUPPORT_GROUP: &str = "Support group";
pub const MANAGED_BY: &str = "Managed by Group";
pub const SUBSCRIBED_COMPANY: &str = "Subscribed by Company";
pub const VISIBILITY_GROUP: &str = "Visibility group";
pub const BUSINESS_CRITICALITY: &str = "Business Criticality";
pub const RECORD_VIEW: &str = "Record view";
pub const APPROVAL_REQUIRED: &str = "Approval required";
pub const APPROVAL_GROUP: &str = "Approval group";
/// Record number; never copied to generated sheets
pub const NUMBER: &str = "Number";
/// LDAP column created for Germany sheets that lack one
pub const LDAP: &str = "LDAP";

/// Columns every loaded sheet is guaranteed to have (created empty if missing)
pub const REQUIRED: &[&str] = &[
    NAME,
    PARENT_OFFERING,
    DEPEND_ON,
    COMMITMENTS,
    DELIVERY_MANAGER,
    SUBSCRIBED_LOCATION,
    PHASE,
    STATUS,
    LIFECYCLE_STAGE,
    LIFECYCLE_STATUS,
    SUPPORT_GROUP,
    MANAGED_BY,
    SUBSCRIBED_COMPANY,
    VISIBILITY_GROUP,
    BUSINESS_CRITICALITY,
    RECORD_VIEW,
    APPROVAL_REQUIRED,
    APPROVAL_GROUP,
];

pub fn is_ldap(column: &str) -> bool {
    column.to_lowercase().contains("ldap")
}

pub fn is_alias(column: &str) -> bool {
    column.contains("Alias")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_classes() {
        assert!(is_ldap("LDAP"));
        assert!(is_ldap("Ldap domain"));
        assert!(!is_ldap("Support group"));
        assert!(is_alias("Alias - ENG"));
        assert!(!is_alias("alias lowercase"));
    }
}
