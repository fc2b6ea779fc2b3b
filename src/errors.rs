//! Error types for icdsync

use std::fmt;
use thiserror::Error;

/// Remote resources the pipeline retrieves or scrapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// The CMS ICD-10 landing page
    CmsPage,
    /// The page for the most recent ICD-10 CM release
    Icd10Page,
    /// The link to the most recent ICD-10 CM release
    Icd10Link,
    /// The link to the tabular order zip file
    ZipLink,
    /// The tabular order zip file itself
    ZipFile,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::CmsPage => "CMS website",
            Resource::Icd10Page => "latest ICD-10 page",
            Resource::Icd10Link => "latest ICD-10 url",
            Resource::ZipLink => "link for tabular order zip file",
            Resource::ZipFile => "zip file",
        };
        f.write_str(name)
    }
}

/// Main error type for icdsync
#[derive(Error, Debug)]
pub enum IcdError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Failed to get {resource}: {source}")]
    Fetch {
        resource: Resource,
        #[source]
        source: reqwest::Error,
    },

    #[error("Could not locate {0}")]
    NotFound(Resource),

    #[error("Unable to extract {0} from zip")]
    MissingMember(String),

    #[error("Task error: {0}")]
    Task(String),

    #[error("Interrupted by user")]
    Interrupted,
}

impl IcdError {
    /// Wrap a request failure with the resource that was being retrieved
    pub fn fetch(resource: Resource, source: reqwest::Error) -> Self {
        IcdError::Fetch { resource, source }
    }
}

impl From<tokio::task::JoinError> for IcdError {
    fn from(err: tokio::task::JoinError) -> Self {
        IcdError::Task(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IcdError>;
