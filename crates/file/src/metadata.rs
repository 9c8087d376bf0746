//! Source metadata: name, parent, size and access time for a location.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use url::{Position, Url};

use crate::{http, FetchError};

/// Metadata describing the content behind a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceMetadata {
    /// Trailing name segment of the location.
    pub file_name: String,
    /// Everything before the name segment (directory or URL prefix).
    pub parent: String,
    /// Content size in whole KiB, rounded down.
    pub size_kib: u64,
    /// Last access time (local) or server `Date` header (remote),
    /// ISO-8601, UTC.
    pub accessed: String,
}

pub(crate) fn local_metadata(path: &Path) -> Result<SourceMetadata, FetchError> {
    let stat = std::fs::metadata(path)?;

    let accessed = stat
        .accessed()
        .map(|time| DateTime::<Utc>::from(time).format("%Y-%m-%dT%H:%M:%S").to_string())
        .unwrap_or_default();

    Ok(SourceMetadata {
        file_name: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        parent: path
            .parent()
            .map(|parent| parent.display().to_string())
            .unwrap_or_default(),
        size_kib: stat.len() >> 10,
        accessed,
    })
}

pub(crate) fn remote_metadata(url: &str) -> Result<SourceMetadata, FetchError> {
    let parsed =
        Url::parse(url).map_err(|_| FetchError::UnresolvedProtocol(url.to_string()))?;

    let (parent_path, file_name) = match parsed.path().rsplit_once('/') {
        Some((parent, name)) => (parent.to_string(), name.to_string()),
        None => (String::new(), parsed.path().to_string()),
    };
    let parent = format!("{}{parent_path}", &parsed[..Position::BeforePath]);

    let response = http::get_response(url)?;

    let accessed = response
        .headers()
        .get(reqwest::header::DATE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    // Content-Length when the server sends one, body length otherwise.
    let size = match response.content_length() {
        Some(length) => length,
        None => {
            let body = response.bytes().map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;
            body.len() as u64
        }
    };

    Ok(SourceMetadata {
        file_name,
        parent,
        size_kib: size >> 10,
        accessed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_local_metadata() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(&[0u8; 3 * 1024]).unwrap();
        temp_file.flush().unwrap();

        let meta = local_metadata(temp_file.path()).unwrap();

        assert_eq!(meta.size_kib, 3);
        assert_eq!(
            meta.file_name,
            temp_file.path().file_name().unwrap().to_str().unwrap()
        );
        assert_eq!(
            meta.parent,
            temp_file.path().parent().unwrap().display().to_string()
        );
        // ISO-8601: YYYY-MM-DDTHH:MM:SS
        assert_eq!(meta.accessed.len(), 19);
        assert_eq!(&meta.accessed[10..11], "T");
    }

    #[test]
    fn test_local_metadata_not_found() {
        let result = local_metadata(Path::new("/nonexistent/file.txt"));
        assert!(matches!(result, Err(FetchError::Io(_))));
    }
}
