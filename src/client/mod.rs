//! HTTP client and CMS page scraping

pub mod http;
pub mod links;

pub use http::{build_client, Fetcher};
pub use links::{find_release_link, find_tabular_order_link, ReleaseLink};
