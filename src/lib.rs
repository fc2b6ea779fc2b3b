//! icdsync library interface
//!
//! Fetches the latest ICD-10-CM tabular order codes from the CMS website,
//! formats them for import and packs the results into zip archives.
//!
//! # Module Organization
//!
//! - [`cli`] - Option registry and token resolution
//! - [`codes`] - Order file parsing and output rendering
//! - [`job`] - The lazy fetch, extract, generate and archive pipeline
//! - [`signals`] - Interrupt handling (was_interrupted, set_interrupted)
//! - [`errors`] - Error types (IcdError, Result)
//! - [`status`] - Exit status codes (ExitStatus)
//! - [`core`] - Main execution logic

pub mod archive;
pub mod cli;
pub mod client;
pub mod codes;
pub mod config;
pub mod context;
pub mod core;
pub mod downloads;
pub mod errors;
pub mod fs;
pub mod job;
pub mod logging;
pub mod signals;
pub mod status;
pub mod utils;
