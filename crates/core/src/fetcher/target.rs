use std::path::{Path, PathBuf};

use super::FetchError;

/// Last `/`-separated segment of `url`, or the whole string if it has none.
pub fn derive_filename(url: &str) -> &str {
    match url.rfind('/') {
        Some(pos) => &url[pos + 1..],
        None => url,
    }
}

/// A candidate URL paired with the local file it will be written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub url: String,
    pub path: PathBuf,
}

impl DownloadTarget {
    /// Resolve the local path for `url` inside `destination`.
    ///
    /// Names that would not land inside `destination` (empty, `.`, `..`, or
    /// containing a platform path separator) are rejected.
    pub fn new(url: &str, destination: &Path) -> Result<Self, FetchError> {
        let name = derive_filename(url);
        if name.is_empty() || name == "." || name == ".." || name.contains(std::path::MAIN_SEPARATOR)
        {
            return Err(FetchError::InvalidTarget {
                url: url.to_string(),
            });
        }

        Ok(Self {
            url: url.to_string(),
            path: destination.join(name),
        })
    }

    pub fn file_name(&self) -> &str {
        derive_filename(&self.url)
    }
}

/// Make sure the download folder exists, creating it and any parents.
pub async fn prepare_destination(destination: &Path) -> Result<(), FetchError> {
    tokio::fs::create_dir_all(destination)
        .await
        .map_err(|source| FetchError::Io {
            path: destination.to_path_buf(),
            source,
        })
}
