//! Collects images for a single search query.
//!
//! # Example usage
//!
//! ```no_run
//! use dermis_collector::{CollectOutcome, Config, ImageCollector};
//!
//! async fn collect_acne() {
//!     let config = Config::default();
//!
//!     let mut collector = ImageCollector::new("Acne vulgaris", &config).unwrap();
//!
//!     // Saves up to 20 images into `images/Acne vulgaris`
//!     match collector.collect(20).await.unwrap() {
//!         CollectOutcome::AlreadyEnough { present } => println!("{} files already there", present),
//!         CollectOutcome::Complete { downloaded } | CollectOutcome::Exhausted { downloaded } => {
//!             println!("{} new files", downloaded)
//!         }
//!     }
//! }
//! ```
use std::path::{Path, PathBuf};
use std::time::Duration;

use ahash::AHashSet;
use colored::Colorize;
use log::debug;
use reqwest::Client;
use tokio::fs;

use crate::client;
use crate::config::Config;
use crate::progress_bars::CollectProgress;
use crate::search::{candidate_urls, fetch_page};

pub use self::error::{CollectorError, DownloadError};

mod download;
pub mod error;
pub mod filename;
pub mod format;

/// How a collection run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectOutcome {
    /// The destination already held at least the requested number of files, nothing was requested.
    AlreadyEnough { present: usize },
    /// The target was reached.
    Complete { downloaded: usize },
    /// Every result page was walked without reaching the target.
    Exhausted { downloaded: usize },
}

impl CollectOutcome {
    /// Number of images saved during the run.
    pub fn downloaded(&self) -> usize {
        match self {
            CollectOutcome::AlreadyEnough { .. } => 0,
            CollectOutcome::Complete { downloaded } | CollectOutcome::Exhausted { downloaded } => {
                *downloaded
            }
        }
    }
}

/// Downloads images found for one query into its own directory.
///
/// Both url sets only live for the duration of one [`collect`](ImageCollector::collect) call and
/// never overlap: an url is either saved or known to be broken.
pub struct ImageCollector {
    query: String,
    directory: PathBuf,
    search_url: String,
    timeout: Duration,
    client: Client,
    download_client: Client,
    downloaded_urls: AHashSet<String>,
    bad_urls: AHashSet<String>,
    progress: Option<CollectProgress>,
}

impl ImageCollector {
    /// Sets up a collector saving into `<output_dir>/<query>`.
    pub fn new(query: &str, config: &Config) -> Result<Self, CollectorError> {
        let client = client!();
        let download_client = client!(config.download_timeout());

        Ok(Self {
            query: query.to_string(),
            directory: query_directory(&config.output_dir, query),
            search_url: config.search_url.clone(),
            timeout: config.download_timeout(),
            client,
            download_client,
            downloaded_urls: AHashSet::new(),
            bad_urls: AHashSet::new(),
            progress: None,
        })
    }

    #[inline]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[inline]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Saves images until `imagenum` of them were downloaded during this run or every result
    /// page was tried.
    ///
    /// A directory already holding `imagenum` entries or more is left alone without any request.
    /// Only entries are counted, not whether they are valid images.
    pub async fn collect(&mut self, imagenum: usize) -> Result<CollectOutcome, CollectorError> {
        fs::create_dir_all(&self.directory)
            .await
            .map_err(|source| CollectorError::DirCreationError {
                path: self.directory.display().to_string(),
                source,
            })?;

        let present = self.count_present().await?;
        if present >= imagenum {
            println!(
                "{} {}",
                format!("{}:", self.query).bold().blue(),
                "there are already enough images.".bold().green()
            );
            return Ok(CollectOutcome::AlreadyEnough { present });
        }

        self.downloaded_urls.clear();
        self.bad_urls.clear();
        self.progress = Some(CollectProgress::initialize(imagenum as u64, &self.query));

        let result = self.walk_pages(imagenum).await;

        if let Some(progress) = self.progress.take() {
            progress.finish();
        }

        let outcome = result?;
        match outcome {
            CollectOutcome::Complete { downloaded } => println!(
                "{} {}",
                downloaded.to_string().bold().blue(),
                "images downloaded.".bold()
            ),
            CollectOutcome::Exhausted { downloaded } => println!(
                "{} {} {}",
                "I'm sorry! I did my best:".bold().yellow(),
                downloaded.to_string().bold().blue(),
                "images.".bold().yellow()
            ),
            CollectOutcome::AlreadyEnough { .. } => {}
        }

        Ok(outcome)
    }

    async fn walk_pages(&mut self, imagenum: usize) -> Result<CollectOutcome, CollectorError> {
        for page_url in candidate_urls(&self.search_url, &self.query) {
            self.say(format!("\n{}", page_url.dimmed()));

            let image_urls = fetch_page(&self.client, &page_url).await?;

            for url in image_urls {
                if !self.downloaded_urls.contains(&url) && !self.bad_urls.contains(&url) {
                    if self.download_image(&url).await {
                        if let Some(progress) = &self.progress {
                            progress.inc();
                        }
                        self.downloaded_urls.insert(url);
                    } else {
                        self.bad_urls.insert(url);
                    }
                }

                if self.downloaded_urls.len() >= imagenum {
                    return Ok(CollectOutcome::Complete {
                        downloaded: self.downloaded_urls.len(),
                    });
                }
            }
        }

        debug!(
            "{}: {} urls failed to download",
            self.query,
            self.bad_urls.len()
        );

        Ok(CollectOutcome::Exhausted {
            downloaded: self.downloaded_urls.len(),
        })
    }

    async fn count_present(&self) -> Result<usize, CollectorError> {
        let read_err = |source| CollectorError::DirReadError {
            path: self.directory.display().to_string(),
            source,
        };

        let mut entries = fs::read_dir(&self.directory).await.map_err(read_err)?;
        let mut count = 0;
        while entries.next_entry().await.map_err(read_err)?.is_some() {
            count += 1;
        }

        debug!("{} entries in {}", count, self.directory.display());
        Ok(count)
    }

    /// Prints a console line, through the progress bar while a run is active.
    fn say<S: AsRef<str>>(&self, line: S) {
        match &self.progress {
            Some(progress) => progress.println(line),
            None => println!("{}", line.as_ref()),
        }
    }
}

/// Destination directory for `query`. Slashes would nest directories, so they become `&`.
pub fn query_directory(output_dir: &Path, query: &str) -> PathBuf {
    output_dir.join(query.replace('/', "&"))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn slashes_do_not_nest() {
        assert_eq!(
            query_directory(Path::new("images"), "Lichen planus/ruber"),
            PathBuf::from("images/Lichen planus&ruber")
        );
    }

    #[test]
    fn outcome_counts() {
        assert_eq!(CollectOutcome::AlreadyEnough { present: 9 }.downloaded(), 0);
        assert_eq!(CollectOutcome::Complete { downloaded: 5 }.downloaded(), 5);
        assert_eq!(CollectOutcome::Exhausted { downloaded: 2 }.downloaded(), 2);
    }
}
