//! Bill records and content hashing.
//!
//! Provides:
//! - SHA-256 digests of bill file content
//! - Amount and date field parsing
//! - The per-submission bill record

pub mod fields;
pub mod hash;
pub mod record;

pub use fields::{parse_amount, parse_bill_date, DATE_FORMAT};
pub use hash::{hash_bytes, hash_file};
pub use record::{Bill, BillSummary};
