use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("Search engine returned an invalid response")]
    InvalidServerResponse,

    #[error("Search page is not valid UTF-8")]
    InvalidEncoding,

    #[error("Image metadata block has no original url")]
    MissingImageUrl,

    #[error("Failed to parse search response: {0}")]
    JsonSerializeFail(#[from] serde_json::Error),

    #[error("Connection Error")]
    ConnectionError(#[from] reqwest::Error),
}
