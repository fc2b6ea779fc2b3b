//! In-memory download with progress and cancellation

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::header::CONTENT_LENGTH;
use reqwest::Response;
use std::time::Duration;

use crate::errors::{IcdError, Resource, Result};
use crate::signals::was_interrupted;

/// Initial buffer size when the server sends no Content-Length
const DEFAULT_CAPACITY: usize = 3 * 1024 * 1024;

/// Poll interval for Ctrl+C while waiting on the network
const CANCEL_CHECK_INTERVAL: Duration = Duration::from_millis(100);

/// Collects a response body into memory, optionally drawing a progress bar
#[derive(Debug)]
pub struct Downloader {
    show_progress: bool,
    progress: Option<ProgressBar>,
}

impl Downloader {
    pub fn new(show_progress: bool) -> Self {
        Self {
            show_progress,
            progress: None,
        }
    }

    fn init_progress(&mut self, total_size: Option<u64>) {
        if !self.show_progress {
            return;
        }
        let pb = match total_size {
            Some(total) => {
                let pb = ProgressBar::new(total);
                if let Ok(style) = ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                {
                    pb.set_style(style.progress_chars("#>-"));
                }
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {bytes} downloaded") {
                    pb.set_style(style);
                }
                pb
            }
        };
        self.progress = Some(pb);
    }

    /// Read the whole body of `response`
    pub async fn download(&mut self, response: Response, resource: Resource) -> Result<Vec<u8>> {
        let result = self.read_body(response, resource).await;
        if let Some(ref pb) = self.progress {
            match &result {
                Ok(_) => pb.finish_with_message("Download complete"),
                Err(e) => pb.abandon_with_message(format!("Download failed: {}", e)),
            }
        }
        result
    }

    async fn read_body(&mut self, mut response: Response, resource: Resource) -> Result<Vec<u8>> {
        let total_size: Option<u64> = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok());
        self.init_progress(total_size);

        let capacity = total_size
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(DEFAULT_CAPACITY);
        let mut body = Vec::with_capacity(capacity);

        loop {
            let chunk = tokio::select! {
                biased;

                _ = tokio::time::sleep(CANCEL_CHECK_INTERVAL), if was_interrupted() => {
                    return Err(IcdError::Interrupted);
                }

                result = response.chunk() => {
                    result.map_err(|e| IcdError::fetch(resource, e))?
                }
            };

            let Some(chunk) = chunk else {
                break;
            };
            if was_interrupted() {
                return Err(IcdError::Interrupted);
            }

            body.extend_from_slice(&chunk);
            if let Some(ref pb) = self.progress {
                pb.inc(chunk.len() as u64);
            }
        }

        body.shrink_to_fit();
        Ok(body)
    }
}
