//! # Scholaris Core
//!
//! Core types, errors, and query primitives for the Scholaris API.
//!
//! This crate provides the foundational pieces shared by every layer of the
//! application:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`filter`]: Filter criteria parsing and record matching for list queries
//! - [`page`]: List query parameters and paginated response envelopes
//! - [`patch`]: JSON patch documents and their application to records
//! - [`password`]: Secure password hashing and verification
//! - [`serde`]: Query-string deserializers tolerant of empty values
//!
//! # Example
//!
//! ```ignore
//! use scholaris_core::errors::AppError;
//! use scholaris_core::filter::parse_filters;
//! use scholaris_core::page::{ListQuery, Page};
//!
//! let criteria = parse_filters(r#"[{"PropertyName":"Status","Operator":"Equal","Value":"Active"}]"#)?;
//! let query = ListQuery {
//!     criteria,
//!     ..ListQuery::default()
//! };
//! ```

pub mod errors;
pub mod filter;
pub mod page;
pub mod patch;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use filter::{FilterCriteria, FilterOperator, SortOrder, matches_record, matches_search};
pub use page::{ListQuery, Page, PageMeta};
pub use patch::{PatchDocument, PatchOperation};
pub use password::{hash_password, verify_password};
