//! The update job
//!
//! A [`Job`] holds whatever inputs the command line supplied and pulls the
//! rest on demand. Each stage only runs when the stage after it has nothing
//! to work from, so a local order file skips every network request and a
//! set of `.go` files skips parsing too.

use std::path::{Path, PathBuf};

use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::archive;
use crate::cli::ResolvedArguments;
use crate::client::{find_release_link, find_tabular_order_link, Fetcher};
use crate::codes::{generate, FixedWidthParser, OutputKind, RenderedOutput, Timestamp};
use crate::config::Config;
use crate::downloads::Downloader;
use crate::errors::{IcdError, Resource, Result};
use crate::fs;
use crate::signals::check_interrupted;
use crate::utils::{resolve_link, split_base_url, url_file_name};

/// Pipeline state for one run
#[derive(Debug, Clone, Default)]
pub struct Job {
    /// Directory the archives (and a downloaded zip) are written to
    pub dest: PathBuf,
    /// `scheme://host[:port]` that relative links are joined to
    pub cms_base: String,
    pub cms_path: String,
    pub icd10_url: Option<String>,
    pub zip_url: Option<String>,
    pub zip_data: Option<Vec<u8>>,
    pub order_data: Option<Vec<u8>>,
    pub rendered: Option<RenderedOutput>,
    pub year: Option<String>,
}

impl Job {
    /// Start from configuration alone
    pub fn new(config: &Config) -> Self {
        let (cms_base, cms_path) = split_base_url(&config.cms_url).unwrap_or_else(|| {
            warn!(url = %config.cms_url, "Configured CMS url is not an absolute http(s) url");
            (config.cms_url.clone(), String::new())
        });
        Self {
            dest: config.dest_path.clone(),
            cms_base,
            cms_path,
            ..Default::default()
        }
    }

    /// Interpret resolved command line options on top of `config`
    pub fn from_args(args: &ResolvedArguments<'_>, config: &Config) -> Self {
        let mut job = Self::new(config);

        if let Some(year) = args.value("year").filter(|y| !y.is_empty()) {
            job.year = Some(year.to_string());
        }

        let mut path_zip = None;
        if let Some(path) = args.value("path").filter(|p| !p.is_empty()) {
            let path = PathBuf::from(path);
            if path.is_dir() {
                job.dest = path;
            } else {
                job.dest = path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| config.dest_path.clone());
                if !args.found("zip-file") && fs::has_extension(&path, "zip") {
                    path_zip = Some(path);
                }
            }
        }

        let cms_given = match args.value("cms-url") {
            Some(url) => match split_base_url(url) {
                Some((base, rel)) => {
                    job.cms_base = base;
                    job.cms_path = rel;
                    true
                }
                None => {
                    warn!(url, "Ignoring CMS url, it is not an absolute http(s) url");
                    false
                }
            },
            None => false,
        };
        job.icd10_url = job.site_url(args.value("icd10-url"), cms_given, "ICD-10");
        job.zip_url = job.site_url(args.value("zip-url"), cms_given, "zip");

        let zip_path = args.value("zip-file").map(PathBuf::from).or(path_zip);
        if let Some(path) = zip_path {
            job.load_zip(&path);
        }

        if let Some(path) = args.value("order-file") {
            job.load_order(Path::new(path));
        }

        if args.found("decimal-file") || args.found("non-decimal-file") || args.found("combined-file") {
            job.load_outputs(
                args.value("non-decimal-file").unwrap_or_default(),
                args.value("decimal-file").unwrap_or_default(),
                args.value("combined-file").unwrap_or_default(),
            );
        }

        job
    }

    /// Accept a page url, adopting its base unless it conflicts with `--cms-url`
    fn site_url(&mut self, url: Option<&str>, cms_given: bool, what: &str) -> Option<String> {
        let url = url?;
        let Some((base, _)) = split_base_url(url) else {
            warn!(url, "Ignoring {} url, it is not an absolute http(s) url", what);
            return None;
        };
        if cms_given {
            if !base.eq_ignore_ascii_case(&self.cms_base) {
                warn!(url, cms = %self.cms_base, "Ignoring {} url, it is not on the CMS site", what);
                return None;
            }
        } else {
            self.cms_base = base;
        }
        Some(url.to_string())
    }

    fn load_zip(&mut self, path: &Path) {
        match fs::load_if(path, "zip") {
            Some(Ok(data)) => {
                debug!(path = %path.display(), bytes = data.len(), "Loaded zip file");
                self.zip_data = Some(data);
                self.default_year(fs::year_prefix(&fs::file_name(path)));
            }
            Some(Err(e)) => warn!(path = %path.display(), "Unable to read zip file: {}", e),
            None => warn!(path = %path.display(), "Ignoring zip file, it is not an existing .zip file"),
        }
    }

    fn load_order(&mut self, path: &Path) {
        match fs::load_if(path, "txt") {
            Some(Ok(data)) => {
                debug!(path = %path.display(), bytes = data.len(), "Loaded order file");
                self.order_data = Some(data);
                self.default_year(fs::year_before_suffix(&fs::file_name(path), ".txt"));
            }
            Some(Err(e)) => warn!(path = %path.display(), "Unable to read order file: {}", e),
            None => warn!(path = %path.display(), "Ignoring order file, it is not an existing .txt file"),
        }
    }

    /// Load previously generated outputs; all three are required
    fn load_outputs(&mut self, non_decimal: &str, decimal: &str, combined: &str) {
        let paths = [Path::new(non_decimal), Path::new(decimal), Path::new(combined)];
        let mut contents = Vec::with_capacity(paths.len());
        for path in paths {
            match fs::load_if(path, "go") {
                Some(Ok(data)) => contents.push(String::from_utf8_lossy(&data).into_owned()),
                Some(Err(e)) => {
                    warn!(path = %path.display(), "Ignoring formatted files, unable to read: {}", e);
                    return;
                }
                None => {
                    warn!("Ignoring formatted files, the decimal, non-decimal and combined files must all be existing .go files");
                    return;
                }
            }
        }

        if self.year.is_none() {
            let years: Vec<Option<String>> = paths
                .iter()
                .map(|p| fs::year_before_suffix(&fs::file_name(p), ".go"))
                .collect();
            match years.first() {
                Some(Some(year)) if years.iter().all(|y| y.as_ref() == Some(year)) => {
                    self.year = Some(year.clone());
                }
                _ => {
                    warn!("Ignoring formatted files, their names do not agree on a year");
                    return;
                }
            }
        }

        let mut contents = contents.into_iter();
        self.rendered = Some(RenderedOutput {
            non_decimal: contents.next().unwrap_or_default(),
            decimal: contents.next().unwrap_or_default(),
            combined: contents.next().unwrap_or_default(),
        });
    }

    fn default_year(&mut self, year: Option<String>) {
        if self.year.is_none() {
            self.year = year;
        }
    }

    fn year(&self) -> &str {
        self.year.as_deref().unwrap_or_default()
    }

    /// Produce the three archives, fetching only what is missing
    pub async fn work(&mut self, fetcher: &Fetcher, config: &Config, show_progress: bool) -> Result<Vec<PathBuf>> {
        if self.rendered.is_none() {
            if self.order_data.is_none() {
                if self.zip_data.is_none() {
                    if self.zip_url.is_none() {
                        if self.icd10_url.is_none() {
                            self.find_icd10_url(fetcher).await?;
                            check_interrupted()?;
                        }
                        self.find_zip_url(fetcher).await?;
                        check_interrupted()?;
                    }
                    self.download_zip(fetcher, show_progress).await?;
                    check_interrupted()?;
                }
                self.extract_order()?;
                check_interrupted()?;
            }
            self.generate(config).await?;
            check_interrupted()?;
        }
        self.write_archives(&config.file_name_base).await
    }

    async fn find_icd10_url(&mut self, fetcher: &Fetcher) -> Result<()> {
        let url = format!("{}{}", self.cms_base, self.cms_path);
        info!(url = %url, "Getting latest ICD-10 url from CMS website");
        let page = fetcher.get_text(&url, Resource::CmsPage).await?;
        let link = find_release_link(&page).ok_or(IcdError::NotFound(Resource::Icd10Link))?;
        debug!(href = %link.href, year = %link.year, "Found ICD-10 release link");
        self.default_year(fs::year_prefix(&link.year));
        self.icd10_url = Some(resolve_link(&self.cms_base, &link.href));
        Ok(())
    }

    async fn find_zip_url(&mut self, fetcher: &Fetcher) -> Result<()> {
        let url = self.icd10_url.clone().ok_or(IcdError::NotFound(Resource::Icd10Link))?;
        info!(url = %url, "Getting link for tabular order zip file");
        let page = fetcher.get_text(&url, Resource::Icd10Page).await?;
        let href = find_tabular_order_link(&page).ok_or(IcdError::NotFound(Resource::ZipLink))?;
        self.zip_url = Some(resolve_link(&self.cms_base, &href));
        Ok(())
    }

    async fn download_zip(&mut self, fetcher: &Fetcher, show_progress: bool) -> Result<()> {
        let url = self.zip_url.clone().ok_or(IcdError::NotFound(Resource::ZipLink))?;
        info!(url = %url, "Downloading tabular order zip file");
        let response = fetcher.get(&url, Resource::ZipFile).await?;
        let data = Downloader::new(show_progress).download(response, Resource::ZipFile).await?;

        if let Some(name) = url_file_name(&url) {
            self.default_year(fs::year_prefix(&name));
            tokio::fs::create_dir_all(&self.dest).await?;
            let path = self.dest.join(fs::sanitize_filename(&name));
            tokio::fs::write(&path, &data).await?;
            info!(path = %path.display(), "Saved zip file");
        }
        self.zip_data = Some(data);
        Ok(())
    }

    fn extract_order(&mut self) -> Result<()> {
        let member = format!("icd10cm_order_{}.txt", self.year());
        let zip = self.zip_data.as_deref().ok_or_else(|| IcdError::MissingMember(member.clone()))?;
        info!(member = %member, "Extracting order file");
        let data = archive::extract_member(zip, &member).map_err(|e| {
            warn!("Unable to read zip file: {}", e);
            IcdError::MissingMember(member.clone())
        })?;
        self.order_data = Some(data.ok_or(IcdError::MissingMember(member))?);
        Ok(())
    }

    async fn generate(&mut self, config: &Config) -> Result<()> {
        let data = self.order_data.take().unwrap_or_default();
        let parser = FixedWidthParser::new(config.layout.clone());
        let year = self.year().to_string();
        let stamp = Timestamp::now(config.day_index_offset);
        info!(year = %year, "Generating formatted files");

        let rendered = tokio::task::spawn_blocking(move || generate(&parser.parse(&data), &year, &stamp)).await?;
        self.rendered = Some(rendered);
        Ok(())
    }

    /// Compress and write the three outputs concurrently
    async fn write_archives(&mut self, base: &str) -> Result<Vec<PathBuf>> {
        let rendered = self.rendered.take().unwrap_or_default();
        tokio::fs::create_dir_all(&self.dest).await?;

        let mut tasks = JoinSet::new();
        for (kind, content) in rendered.into_entries() {
            let stem = fs::output_stem(kind, base, self.year());
            let path = self.dest.join(format!("{}.zip", stem));
            tasks.spawn(async move {
                let data = archive::build_archive_async(format!("{}.go", stem), content).await?;
                tokio::fs::write(&path, data).await?;
                Ok::<_, IcdError>((kind, path))
            });
        }

        let mut written = Vec::with_capacity(OutputKind::ALL.len());
        while let Some(result) = tasks.join_next().await {
            let (kind, path) = result??;
            info!(path = %path.display(), "Wrote {} archive", kind.label());
            written.push((kind, path));
        }
        written.sort_by_key(|(kind, _)| OutputKind::ALL.iter().position(|k| k == kind));
        Ok(written.into_iter().map(|(_, path)| path).collect())
    }
}
