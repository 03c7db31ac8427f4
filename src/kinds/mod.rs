//! Entity kinds served through connections, with their ordering tables.
//!
//! Each kind contributes three things and nothing more: its node type, an
//! `OrderField` enum naming the attributes it may be sorted on, and helper
//! constructors for its common base predicates (ownership scoping).

mod dkim_scan;
mod domain;
mod organization;
mod user;

pub use dkim_scan::{DkimScan, DkimScanOrder, DkimScanOrderField};
pub use domain::{ComplianceStatus, Domain, DomainOrder, DomainOrderField};
pub use organization::{Organization, OrganizationOrder, OrganizationOrderField};
pub use user::{User, UserOrder, UserOrderField};
