//! Diagnosis crawler for the [dermis.net](http://www.dermis.net) alphabetical index.
//!
//! Every letter of the alphabet has a listing page. Each diagnosis found there is handed to an
//! [`ImageCollector`](crate::ImageCollector), one after another.
use std::path::Path;

use colored::Colorize;
use log::debug;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use thiserror::Error;
use tokio::fs::create_dir_all;

use crate::{client, CollectorError, Config, ImageCollector};

/// Listing page of the diagnoses starting with `{letter}`.
pub const LISTING_URL: &str = "http://www.dermis.net/dermisroot/en/list/{letter}/search.htm";

pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

static DIAGNOSIS_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("#ctl00_Main_pnlSearchControl .list")
        .expect("BUG: hardcoded diagnosis selector is invalid")
});

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Failed to fetch diagnosis listing: {0}")]
    ConnectionError(#[from] reqwest::Error),

    #[error("Listing page for '{letter}' is not valid UTF-8")]
    InvalidEncoding { letter: char },

    #[error("Failed to create output directory {path}: {message}")]
    DirCreationError { path: String, message: String },

    #[error(transparent)]
    CollectorError(#[from] CollectorError),
}

/// Cuts a diagnosis label at its first parenthesis.
///
/// ```
/// # use dermis_collector::diagnosis_from_text;
/// assert_eq!(diagnosis_from_text("Acne (common)"), "Acne");
/// assert_eq!(diagnosis_from_text("Rosacea"), "Rosacea");
/// ```
pub fn diagnosis_from_text(text: &str) -> &str {
    let name = match text.find('(') {
        Some(idx) => &text[..idx],
        None => text,
    };
    name.trim()
}

/// Diagnosis names on a listing page, in page order. Empty labels are dropped.
pub fn diagnoses_from_html(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(&DIAGNOSIS_SELECTOR)
        .map(|elem| elem.text().collect::<String>())
        .filter_map(|text| {
            let name = diagnosis_from_text(&text);
            if name.is_empty() {
                debug!("Skipping empty diagnosis label {:?}", text);
                None
            } else {
                Some(name.to_string())
            }
        })
        .collect()
}

pub struct DiagnosisCrawler {
    config: Config,
    client: Client,
}

impl DiagnosisCrawler {
    pub fn new(config: Config) -> Result<Self, CrawlError> {
        let client = client!();
        Ok(Self { config, client })
    }

    #[inline]
    pub fn listing_url(&self, letter: char) -> String {
        self.config
            .listing_url
            .replace("{letter}", &letter.to_string())
    }

    /// Fetches the listing page for `letter` and returns the diagnoses on it.
    pub async fn fetch_diagnoses(&self, letter: char) -> Result<Vec<String>, CrawlError> {
        let url = self.listing_url(letter);
        debug!("Fetching listing {}", url);

        let bytes = self.client.get(&url).send().await?.bytes().await?;
        let html = std::str::from_utf8(&bytes).map_err(|_| CrawlError::InvalidEncoding { letter })?;

        let diagnoses = diagnoses_from_html(html);
        debug!("{} diagnoses under '{}'", diagnoses.len(), letter);
        Ok(diagnoses)
    }

    /// Collects `imagenum` images for every diagnosis of every letter.
    ///
    /// Any listing or search page failure aborts the whole crawl; failed image downloads don't.
    /// Returns the number of images saved during this crawl.
    pub async fn collect_all(&self, imagenum: usize) -> Result<usize, CrawlError> {
        ensure_dir(&self.config.output_dir).await?;

        let mut total = 0;
        for letter in ALPHABET.chars() {
            for diagnosis in self.fetch_diagnoses(letter).await? {
                let mut collector = ImageCollector::new(&diagnosis, &self.config)?;
                total += collector.collect(imagenum).await?.downloaded();
            }
        }

        println!("{}", "All images were successfully collected.".bold().green());
        Ok(total)
    }
}

async fn ensure_dir(path: &Path) -> Result<(), CrawlError> {
    create_dir_all(path)
        .await
        .map_err(|err| CrawlError::DirCreationError {
            path: path.display().to_string(),
            message: err.to_string(),
        })
}

#[cfg(test)]
mod test {
    use mockito::Server;

    use super::*;

    const LISTING: &str = r#"<html><body>
        <div id="ctl00_Main_pnlSearchControl">
            <a class="list" href="/dermisroot/en/1/diagnose.htm">Acne (common)</a>
            <a class="list" href="/dermisroot/en/2/diagnose.htm">Acrodermatitis <b>continua</b> (Hallopeau)</a>
            <a class="list" href="/dermisroot/en/3/diagnose.htm">  Actinic keratosis  </a>
            <a class="list" href="/dermisroot/en/4/diagnose.htm">(unnamed)</a>
        </div>
        <a class="list" href="/elsewhere.htm">Outside the panel</a>
    </body></html>"#;

    #[test]
    fn trims_at_parenthesis() {
        assert_eq!(diagnosis_from_text("Acne (common)"), "Acne");
        assert_eq!(diagnosis_from_text("Acne(common)"), "Acne");
        assert_eq!(diagnosis_from_text("Lupus (SLE) (systemic)"), "Lupus");
    }

    #[test]
    fn missing_parenthesis_keeps_name() {
        assert_eq!(diagnosis_from_text("Psoriasis vulgaris"), "Psoriasis vulgaris");
    }

    #[test]
    fn extracts_only_panel_entries() {
        assert_eq!(
            diagnoses_from_html(LISTING),
            vec!["Acne", "Acrodermatitis continua", "Actinic keratosis"]
        );
    }

    #[tokio::test]
    async fn fetches_listing_for_letter() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/dermisroot/en/list/a/search.htm")
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body(LISTING)
            .create_async()
            .await;

        let config = Config {
            listing_url: format!("{}/dermisroot/en/list/{{letter}}/search.htm", server.url()),
            ..Config::default()
        };
        let crawler = DiagnosisCrawler::new(config).unwrap();

        let diagnoses = crawler.fetch_diagnoses('a').await.unwrap();

        mock.assert_async().await;
        assert_eq!(diagnoses.len(), 3);
        assert_eq!(diagnoses[0], "Acne");
    }

    #[tokio::test]
    async fn unreachable_listing_is_fatal() {
        let config = Config {
            listing_url: "http://127.0.0.1:9/{letter}.htm".to_string(),
            ..Config::default()
        };
        let crawler = DiagnosisCrawler::new(config).unwrap();

        assert!(matches!(
            crawler.fetch_diagnoses('b').await,
            Err(CrawlError::ConnectionError(_))
        ));
    }
}
