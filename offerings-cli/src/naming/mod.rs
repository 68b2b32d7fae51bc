//! Offering naming engine
//!
//! Pure functions: no I/O happens here. The generator feeds parent offering
//! templates and per-combination inputs in, and gets display names and
//! `Depend On` values out.

pub mod builder;
pub mod convention;
pub mod countries;
pub mod incident;
pub mod plural;
pub mod template;

pub use builder::{NameBuilder, NameRequest};
pub use convention::{Convention, Division, ServiceKind};
pub use countries::CountryTable;
pub use incident::ensure_incident_naming;
pub use plural::pluralize_app_name;
pub use template::ParentTemplate;
