//! Parsing of the image search ajax response.
//!
//! The endpoint answers with a JSON array whose second element is itself an array holding
//! an HTML fragment at index 1. Every result inside that fragment carries a hidden
//! `.rg_meta` element whose text is a JSON object describing the image; the `ou` field is
//! the URL of the original file.
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;

use super::error::ExtractorError;

static META_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".rg_meta").expect("BUG: hardcoded CSS selector '.rg_meta' is invalid")
});

#[derive(Debug, Deserialize)]
struct ImageMeta {
    #[serde(rename = "ou")]
    original_url: Option<String>,
}

/// Pulls the embedded HTML fragment out of the raw ajax body.
pub fn fragment_from_response(body: &str) -> Result<String, ExtractorError> {
    let json: Value = serde_json::from_str(body)?;

    json.get(1)
        .and_then(|chunk| chunk.get(1))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(ExtractorError::InvalidServerResponse)
}

/// Extracts the original image URLs from an HTML fragment, in document order.
pub fn image_urls_from_fragment(fragment: &str) -> Result<Vec<String>, ExtractorError> {
    let html = Html::parse_fragment(fragment);

    html.select(&META_SELECTOR)
        .map(|meta| {
            let raw = meta.text().collect::<String>();
            let meta: ImageMeta = serde_json::from_str(&raw)?;
            meta.original_url.ok_or(ExtractorError::MissingImageUrl)
        })
        .collect()
}

/// Full pipeline from raw response body to image URLs.
pub fn image_urls_from_response(body: &str) -> Result<Vec<String>, ExtractorError> {
    let fragment = fragment_from_response(body)?;
    image_urls_from_fragment(&fragment)
}

#[cfg(test)]
pub(crate) fn fake_response(urls: &[&str]) -> String {
    let fragment: String = urls
        .iter()
        .enumerate()
        .map(|(idx, url)| {
            let meta = serde_json::json!({ "id": format!("img{}", idx), "ou": url, "ity": "jpg" });
            format!(
                r#"<div class="rg_di"><a href="/imgres?imgurl={url}"><img src="data:,"></a><div class="rg_meta">{}</div></div>"#,
                meta
            )
        })
        .collect();

    serde_json::json!(["rg_s", ["rg_s", fragment]]).to_string()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn extracts_urls_in_order() {
        let body = fake_response(&[
            "https://example.com/a.jpg",
            "https://example.org/b.png",
            "http://example.net/c",
        ]);

        let urls = image_urls_from_response(&body).unwrap();

        assert_eq!(
            urls,
            vec![
                "https://example.com/a.jpg",
                "https://example.org/b.png",
                "http://example.net/c"
            ]
        );
    }

    #[test]
    fn entities_in_meta_are_decoded() {
        let fragment = r#"<div class="rg_meta">{&quot;ou&quot;:&quot;https://example.com/x.jpg?a=1&amp;b=2&quot;}</div>"#;

        let urls = image_urls_from_fragment(fragment).unwrap();

        assert_eq!(urls, vec!["https://example.com/x.jpg?a=1&b=2"]);
    }

    #[test]
    fn empty_fragment_has_no_urls() {
        let body = serde_json::json!(["rg_s", ["rg_s", "<div>nothing here</div>"]]).to_string();

        assert!(image_urls_from_response(&body).unwrap().is_empty());
    }

    #[test]
    fn rejects_unexpected_layout() {
        let body = serde_json::json!(["rg_s"]).to_string();

        assert!(matches!(
            image_urls_from_response(&body),
            Err(ExtractorError::InvalidServerResponse)
        ));
    }

    #[test]
    fn rejects_non_json() {
        assert!(matches!(
            image_urls_from_response("<html></html>"),
            Err(ExtractorError::JsonSerializeFail(_))
        ));
    }

    #[test]
    fn rejects_meta_without_url() {
        let fragment = r#"<div class="rg_meta">{"id":"abc"}</div>"#;

        assert!(matches!(
            image_urls_from_fragment(fragment),
            Err(ExtractorError::MissingImageUrl)
        ));
    }
}
