//! Admin-side helpers

pub mod chart;
pub mod pagination;
pub mod search;

pub use chart::{Bucket, Granularity, bucket_series, sample_labels};
pub use pagination::{PageItem, page_range};
pub use search::{Debouncer, FetchTicket, LatestFetch};
