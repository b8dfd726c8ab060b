//! Image search requests.
//!
//! # Candidate urls
//!
//! Every collection run walks at most `1 + SearchFilter::ALL.len()` result pages for the
//! exact phrase being searched: an unfiltered one first, followed by one page per
//! [`SearchFilter`] in declared order. Each filter tends to surface a different set of
//! images, which is what lets a single query reach a few hundred unique files.
use std::fmt::{Display, Formatter};

use log::debug;
use reqwest::{header::USER_AGENT, Client};

use crate::user_agent::random_user_agent;

pub use self::error::ExtractorError;
pub use self::page::image_urls_from_response;

mod error;
pub mod page;

/// Default ajax endpoint for image searches.
pub const SEARCH_URL: &str = "https://www.google.com.ua/search";

/// Result filters sent through the `tbs` query parameter.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SearchFilter {
    Photo,
    Face,
    Clipart,
    Lineart,
    PastDay,
    PastWeek,
    Animated,
    Color,
    Gray,
    Transparent,
}

impl SearchFilter {
    /// All filters, in the order they are tried.
    pub const ALL: [SearchFilter; 10] = [
        SearchFilter::Photo,
        SearchFilter::Face,
        SearchFilter::Clipart,
        SearchFilter::Lineart,
        SearchFilter::PastDay,
        SearchFilter::PastWeek,
        SearchFilter::Animated,
        SearchFilter::Color,
        SearchFilter::Gray,
        SearchFilter::Transparent,
    ];

    #[inline]
    pub const fn token(&self) -> &'static str {
        match self {
            SearchFilter::Photo => "itp:photo",
            SearchFilter::Face => "itp:face",
            SearchFilter::Clipart => "itp:clipart",
            SearchFilter::Lineart => "itp:lineart",
            SearchFilter::PastDay => "qdr:d",
            SearchFilter::PastWeek => "qdr:w",
            SearchFilter::Animated => "itp:animated",
            SearchFilter::Color => "ic:color",
            SearchFilter::Gray => "ic:gray",
            SearchFilter::Transparent => "ic:trans",
        }
    }
}

impl Display for SearchFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Builds the exact phrase search url for `query`, optionally narrowed by `filter`.
///
/// ```
/// # use dermis_collector::{search_url, SearchFilter};
/// assert_eq!(
///     search_url("https://www.google.com.ua/search", "acne vulgaris", Some(SearchFilter::Gray)),
///     "https://www.google.com.ua/search?async=_id:rg_s,_pms:qs&q=%22acne%20vulgaris%22&start=0&asearch=ichunk&tbm=isch&tbs=ic:gray"
/// );
/// ```
pub fn search_url(endpoint: &str, query: &str, filter: Option<SearchFilter>) -> String {
    let mut url = format!(
        "{}?async=_id:rg_s,_pms:qs&q=%22{}%22&start=0&asearch=ichunk&tbm=isch",
        endpoint,
        urlencoding::encode(query)
    );

    if let Some(filter) = filter {
        url.push_str("&tbs=");
        url.push_str(filter.token());
    }

    url
}

/// Ordered list of pages to walk for `query`: the unfiltered search, then every filter.
pub fn candidate_urls(endpoint: &str, query: &str) -> Vec<String> {
    let mut urls = Vec::with_capacity(SearchFilter::ALL.len() + 1);
    urls.push(search_url(endpoint, query, None));
    urls.extend(
        SearchFilter::ALL
            .iter()
            .map(|filter| search_url(endpoint, query, Some(*filter))),
    );
    urls
}

/// Requests a result page posing as a random desktop browser and returns the image urls in it.
///
/// Page requests have no timeout.
pub async fn fetch_page(client: &Client, url: &str) -> Result<Vec<String>, ExtractorError> {
    let ua = random_user_agent();
    debug!("Fetching search page {} as {}", url, ua);

    let bytes = client
        .get(url)
        .header(USER_AGENT, ua)
        .send()
        .await?
        .bytes()
        .await?;

    let body = std::str::from_utf8(&bytes).map_err(|_| ExtractorError::InvalidEncoding)?;

    let urls = image_urls_from_response(body)?;
    debug!("{} image urls found", urls.len());
    Ok(urls)
}
