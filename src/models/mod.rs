//! Allotment domain models.
//!
//! Canonical, typed records produced by the normalizer and consumed by the
//! allocator and projector. Missing numeric values are modeled as `None`
//! rather than sentinel numbers.
//!
//! # Domain Mappings
//!
//! | u-allot | Admission | Generic matching |
//! |---------|-----------|------------------|
//! | Student | Applicant | Agent |
//! | Preference | Option entry | Ranked choice |
//! | College | Institution seat matrix | Capacitated resource |
//! | QuotaCategory | Reservation bucket | Capacity partition |
//! | Allocation | Allotment order | Assignment |
//! | ResultRow | Published result | Output record |
//! | OrderKey | Rank / option number | Sort key |

mod allocation;
mod category;
mod college;
mod order_key;
mod preference;
mod result;
mod student;

pub use allocation::Allocation;
pub use category::{CategorySet, QuotaCategory, DEFAULT_CATEGORIES};
pub use college::College;
pub use order_key::OrderKey;
pub use preference::Preference;
pub use result::ResultRow;
pub use student::Student;
