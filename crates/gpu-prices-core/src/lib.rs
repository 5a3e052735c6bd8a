pub mod assist;
#[cfg(feature = "network")]
pub mod cache;
pub mod config;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod filter;
pub mod listing;
pub mod normalize;
pub mod payload;
pub mod provider;
#[cfg(feature = "network")]
pub mod scrape;
pub mod stats;
pub mod store;
#[cfg(feature = "network")]
pub mod update;

pub use error::{GpuError, NormalizeError};
pub use filter::{apply_filters, FilterState, SortDirection, SortKey};
pub use listing::{GpuListing, ListingRow};
pub use normalize::{normalize, NormalizePolicy, Normalizer};
pub use provider::{Provider, PROVIDERS};
