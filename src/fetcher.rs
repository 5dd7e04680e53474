//! Archive fetcher: downloads a package archive into the scratch area
//!
//! The transfer is synchronous; progress is surfaced through a caller-supplied
//! observer so the orchestrator can render it without the fetcher knowing
//! about terminals.

use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::Package;
use crate::error::{GpmError, Result};
use crate::progress::ProgressEvent;
use crate::scratch::ScratchArea;

const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Downloads package archives over HTTP(S)
pub struct Fetcher {
    client: reqwest::blocking::Client,
}

impl Fetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GpmError::IoError {
                message: format!("Failed to initialize HTTP client: {e}"),
            })?;

        Ok(Self { client })
    }

    /// Download `package`'s archive to `<scratch>/<slug><basename(url)>` and
    /// return the staged path. Emits monotonically non-decreasing progress
    /// events, ending with 100. No archive validation happens here; the
    /// installer's open step is responsible for that.
    pub fn fetch(
        &self,
        package: &Package,
        scratch: &ScratchArea,
        observer: &mut dyn FnMut(ProgressEvent),
    ) -> Result<PathBuf> {
        let mut response = self
            .client
            .get(&package.download)
            .send()
            .map_err(|e| GpmError::DownloadFailed {
                url: package.download.clone(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(GpmError::DownloadFailed {
                url: package.download.clone(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        let total = response.content_length();
        let staged = scratch
            .ensure()?
            .join(format!("{}{}", package.slug, url_basename(&package.download)));

        let mut file = File::create(&staged)?;
        let mut received: u64 = 0;
        let mut last_percent: u8 = 0;
        let mut chunk = [0u8; READ_CHUNK_SIZE];

        observer(ProgressEvent { percent: 0 });
        loop {
            let n = response
                .read(&mut chunk)
                .map_err(|e| GpmError::DownloadFailed {
                    url: package.download.clone(),
                    reason: e.to_string(),
                })?;
            if n == 0 {
                break;
            }
            file.write_all(&chunk[..n])?;
            received += n as u64;

            if let Some(total) = total.filter(|t| *t > 0) {
                let percent = ((received.min(total) * 100) / total) as u8;
                if percent > last_percent {
                    last_percent = percent;
                    observer(ProgressEvent { percent });
                }
            }
        }

        if last_percent < 100 {
            observer(ProgressEvent { percent: 100 });
        }

        Ok(staged)
    }
}

/// Last path segment of a download URL, with any query string stripped
fn url_basename(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().unwrap_or(path)
}
