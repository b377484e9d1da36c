use crate::error::LogoError;
use futures_util::StreamExt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Downloads the remote font into the local cache file.
pub struct FontFetcher {
    client: reqwest::Client,
    url: String,
}

impl FontFetcher {
    pub fn new(url: String) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches the font to `dest`, returning the number of bytes written.
    ///
    /// The body is streamed into a `.part` sibling and renamed into place
    /// once complete, so `dest` only ever holds a whole file.
    pub async fn fetch_to(&self, dest: &Path) -> Result<u64, LogoError> {
        log::debug!("GET {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LogoError::DownloadStatus { status });
        }

        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let part_path = part_path(dest);
        match Self::write_body(response, &part_path).await {
            Ok(written) => {
                tokio::fs::rename(&part_path, dest).await?;
                Ok(written)
            }
            Err(e) => {
                let _ = tokio::fs::remove_file(&part_path).await;
                Err(e)
            }
        }
    }

    async fn write_body(response: reqwest::Response, path: &Path) -> Result<u64, LogoError> {
        let mut file = tokio::fs::File::create(path).await?;
        let mut stream = response.bytes_stream();
        let mut written = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
            log::trace!("{} bytes written to {}", written, path.display());
        }

        file.flush().await?;
        Ok(written)
    }
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}
