use std::{io, time::Duration};

use reqwest::StatusCode;
use thiserror::Error;

use crate::search::ExtractorError;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("Failed to connect to download URL: {source}")]
    ConnectionFail {
        #[from]
        source: reqwest::Error,
    },

    #[error("No response within {0:?}")]
    TimedOut(Duration),

    #[error("Image source returned status {0}")]
    BadStatus(StatusCode),

    #[error("Unsupported or missing content type: {message:?}")]
    UnknownMimeType { message: String },

    #[error("Error while fetching chunk: {message}")]
    ChunkDownloadFail { message: String },

    #[error("Failed to access file: {source}")]
    FileIOError {
        #[from]
        source: io::Error,
    },
}

impl DownloadError {
    /// Short explanation printed next to the failed URL.
    pub fn reason(&self) -> &'static str {
        match self {
            DownloadError::ConnectionFail { .. } | DownloadError::TimedOut(_) => {
                "Download failed because of connection error."
            }
            DownloadError::BadStatus(_) => "Download failed because of unknown reasons.",
            DownloadError::UnknownMimeType { .. } => {
                "Download was cancelled because something is wrong about data type."
            }
            DownloadError::ChunkDownloadFail { .. } => {
                "Download was interrupted due to a connection error."
            }
            DownloadError::FileIOError { .. } => "Download failed while writing the file.",
        }
    }
}

#[allow(clippy::enum_variant_names)]
#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("Failed to prepare destination directory {path}: {source}")]
    DirCreationError { path: String, source: io::Error },

    #[error("Failed to read destination directory {path}: {source}")]
    DirReadError { path: String, source: io::Error },

    #[error("Failed to build http client: {0}")]
    ClientError(#[from] reqwest::Error),

    #[error(transparent)]
    ExtractorError(#[from] ExtractorError),
}
