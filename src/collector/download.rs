use std::{path::Path, time::Duration};

use bytesize::ByteSize;
use colored::Colorize;
use futures::StreamExt;
use log::{debug, warn};
use reqwest::{header::CONTENT_TYPE, Response, StatusCode};
use tokio::{
    fs::{self, File},
    io::{AsyncWriteExt, BufWriter},
    time::timeout,
};

use super::{error::DownloadError, filename::filename_for, format::ImageFormat, ImageCollector};

/// Successful download states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DownloadStatus {
    Saved,
    AlreadyPresent,
}

impl ImageCollector {
    /// Downloads a single image into the query directory.
    ///
    /// Returns `false` on any failure (connection, status other than 200, unsupported content
    /// type, interrupted transfer). Failures are printed, never retried.
    ///
    /// The timeout bounds connecting, waiting for the response and every wait between two
    /// body chunks, not the whole transfer.
    pub async fn download_image(&self, url: &str) -> bool {
        self.say(format!("{} {}", format!("{}:", self.query).bold(), url));

        match self.fetch_image(url).await {
            Ok(DownloadStatus::Saved) => true,
            Ok(DownloadStatus::AlreadyPresent) => {
                self.say(format!("{}", "This file is already present.".green()));
                true
            }
            Err(error) => {
                warn!("{}: {}", url, error);
                self.say(format!("{}", error.reason().red()));
                false
            }
        }
    }

    pub(crate) async fn fetch_image(&self, url: &str) -> Result<DownloadStatus, DownloadError> {
        debug!("Fetching {}", url);
        let res = timeout(self.timeout, self.download_client.get(url).send())
            .await
            .map_err(|_| DownloadError::TimedOut(self.timeout))??;

        if res.status() != StatusCode::OK {
            return Err(DownloadError::BadStatus(res.status()));
        }

        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        let format: ImageFormat = content_type.parse()?;

        let output = self.directory.join(filename_for(url, format));

        if let Some(size) = res.content_length() {
            debug!("Remote file is {}", ByteSize::b(size).to_string_as(true));

            if let Ok(meta) = fs::metadata(&output).await {
                if meta.is_file() && meta.len() == size {
                    debug!("{} has the same size, skipping", output.display());
                    return Ok(DownloadStatus::AlreadyPresent);
                }
            }
        }

        if let Err(error) = save_response(res, &output, self.timeout).await {
            debug!("Removing partial file {}", output.display());
            let _ = fs::remove_file(&output).await;
            return Err(error);
        }

        Ok(DownloadStatus::Saved)
    }
}

async fn save_response(
    res: Response,
    output: &Path,
    chunk_timeout: Duration,
) -> Result<(), DownloadError> {
    debug!("Creating {:?}", output);
    let file = File::create(output).await?;
    let mut bw = BufWriter::new(file);

    // Download the file chunk by chunk.
    let mut stream = res.bytes_stream();
    loop {
        let item = match timeout(chunk_timeout, stream.next()).await {
            Ok(Some(item)) => item,
            Ok(None) => break,
            Err(_) => {
                return Err(DownloadError::ChunkDownloadFail {
                    message: format!("no data for {:?}", chunk_timeout),
                })
            }
        };

        let mut chunk = match item {
            Ok(chunk) => chunk,
            Err(e) => {
                return Err(DownloadError::ChunkDownloadFail {
                    message: e.to_string(),
                })
            }
        };

        bw.write_all_buf(&mut chunk).await?;
    }

    bw.flush().await?;
    Ok(())
}
