//! Data shapes exchanged with REST backends.
//!
//! These types carry no behaviour beyond convenience accessors; structural
//! invariants such as `total_pages` matching `total_items / page_size` are
//! the producer's responsibility and are never enforced on deserialization.

pub mod error;
pub mod pagination;
pub mod wrapper;

pub use error::ApiError;
pub use pagination::{PaginatedResponse, PaginationMeta};
pub use wrapper::ApiResponseWrapper;
