//! Exit status codes for the CLI
//!
//! Each pipeline stage that can fail has its own code so scheduled jobs can
//! tell a CMS outage apart from a changed page layout:
//! - 0: Success
//! - 1: Any other error (HTTP client setup, IO, archive writing)
//! - 2-7: A specific retrieval or extraction stage failed
//! - 130: User interrupted (Ctrl+C, standard SIGINT exit code)

use std::process::{ExitCode, Termination};

use crate::errors::{IcdError, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    Success = 0,
    Error = 1,
    /// The CMS landing page could not be retrieved
    CmsFetchFailed = 2,
    /// The ICD-10 release page could not be retrieved
    Icd10FetchFailed = 3,
    /// No tabular order link on the ICD-10 release page
    ZipLinkNotFound = 4,
    /// No ICD-10 CM link on the CMS landing page
    Icd10LinkNotFound = 5,
    /// The tabular order zip could not be downloaded
    ZipFetchFailed = 6,
    /// The order file was not inside the zip
    ExtractFailed = 7,
    /// User interrupted (Ctrl+C) - standard SIGINT code
    Interrupted = 130,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

impl Termination for ExitStatus {
    fn report(self) -> ExitCode {
        ExitCode::from(self as u8)
    }
}

impl From<&IcdError> for ExitStatus {
    fn from(err: &IcdError) -> Self {
        match err {
            IcdError::Fetch { resource: Resource::CmsPage, .. } => ExitStatus::CmsFetchFailed,
            IcdError::Fetch { resource: Resource::Icd10Page, .. } => ExitStatus::Icd10FetchFailed,
            IcdError::Fetch { resource: Resource::ZipFile, .. } => ExitStatus::ZipFetchFailed,
            IcdError::NotFound(Resource::ZipLink) => ExitStatus::ZipLinkNotFound,
            IcdError::NotFound(Resource::Icd10Link) => ExitStatus::Icd10LinkNotFound,
            IcdError::MissingMember(_) => ExitStatus::ExtractFailed,
            IcdError::Interrupted => ExitStatus::Interrupted,
            _ => ExitStatus::Error,
        }
    }
}
