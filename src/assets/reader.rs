//! Byte readers for local and remote frame sequences.
//!
//! A sequence lives either in a directory on disk or behind an HTTP base
//! URL; both hand out raw bytes for a relative resource path. Enum dispatch
//! keeps the loader free of trait objects.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::errors::{ObjbookError, Result};

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Local directory reader.
pub struct FileReader {
    root: PathBuf,
}

impl FileReader {
    /// Roots the reader at `path`, or at its parent when `path` is a file.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let root = if path.is_file() {
            path.parent().unwrap_or(Path::new(".")).to_path_buf()
        } else {
            path.to_path_buf()
        };
        Self { root }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn read_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        let path = self.root.join(uri);
        let data = tokio::fs::read(&path).await?;
        Ok(data)
    }
}

/// HTTP reader rooted at a base URL.
pub struct HttpReader {
    root_url: reqwest::Url,
    client: reqwest::Client,
}

impl HttpReader {
    pub fn new(url_str: &str) -> Result<Self> {
        let url = reqwest::Url::parse(url_str)?;
        // Relative joins drop the last segment unless the base ends in '/'.
        let root_url = if url.path().ends_with('/') {
            url
        } else {
            let mut u = url.clone();
            if let Ok(mut segments) = u.path_segments_mut() {
                segments.push("");
            }
            u
        };

        Ok(Self {
            root_url,
            client: reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?,
        })
    }

    #[inline]
    #[must_use]
    pub fn root_url(&self) -> &reqwest::Url {
        &self.root_url
    }

    pub async fn read_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        let url = self.root_url.join(uri)?;
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(ObjbookError::HttpResponseError {
                status: resp.status().as_u16(),
            });
        }
        let bytes = resp.bytes().await?;
        Ok(bytes.to_vec())
    }
}

/// Reader for the configured base path, local or remote.
#[derive(Clone)]
pub enum AssetReader {
    File(Arc<FileReader>),
    Http(Arc<HttpReader>),
}

impl AssetReader {
    /// Picks the reader flavor from the source string: `http://` and
    /// `https://` bases go over the network, everything else is a local
    /// directory.
    pub fn from_source(source: &str) -> Result<Self> {
        if source.starts_with("http://") || source.starts_with("https://") {
            Ok(Self::Http(Arc::new(HttpReader::new(source)?)))
        } else {
            Ok(Self::File(Arc::new(FileReader::new(source))))
        }
    }

    /// Reads the raw bytes of a resource relative to the base.
    pub async fn read_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        match self {
            Self::File(r) => r.read_bytes(uri).await,
            Self::Http(r) => r.read_bytes(uri).await,
        }
    }

    /// Reads a resource as text, replacing invalid UTF-8.
    pub async fn read_text(&self, uri: &str) -> Result<String> {
        let bytes = self.read_bytes(uri).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
