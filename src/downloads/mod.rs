//! Downloads with progress reporting

pub mod downloader;

pub use downloader::Downloader;
