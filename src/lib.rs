//! # Dermis Collector
//!
//! dermis_collector is a CLI utility that builds an image dataset of skin diseases: it walks the
//! alphabetical diagnosis index of [dermis.net](http://www.dermis.net) and saves search engine
//! images for every diagnosis it finds, one directory per diagnosis.
//!
//! Everything runs one request at a time.
pub mod cli;
pub mod collector;
pub mod config;
pub mod dermis;
mod macros;
mod progress_bars;
pub mod search;
pub mod user_agent;


pub use config::Config;

// Export the collector and its building blocks
pub use collector::filename::filename_for;
pub use collector::format::ImageFormat;
pub use collector::{CollectOutcome, CollectorError, DownloadError, ImageCollector};

pub use dermis::{diagnosis_from_text, CrawlError, DiagnosisCrawler};

pub use search::{candidate_urls, search_url, ExtractorError, SearchFilter};
