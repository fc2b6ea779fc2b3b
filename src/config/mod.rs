//! Configuration

#[allow(clippy::module_inception)]
mod config;

pub use config::{Config, CONFIG_ENV, DEFAULT_CMS_URL};
