//! Listing model shared by the jobboard store, service and browsing clients.
//!
//! Stored documents are turned into wire records by [`normalize`], and the
//! browsing filter runs over those records in [`filter`].

pub mod deadline;
pub mod document;
pub mod error;
pub mod filter;
pub mod listing;
pub mod normalize;
pub mod salary;

pub use deadline::{format_timestamp, parse_deadline};
pub use document::{DocumentId, DocumentValue, Fields, StoredDocument};
pub use error::ListingError;
pub use filter::{filter, Choice, FilterConfig};
pub use listing::{JobType, Listing, ListingStatus, Location};
pub use normalize::normalize;
pub use salary::{SalaryForm, SalaryRange};
