//! Location abstraction for reading content from the local filesystem or
//! HTTP/HTTPS.
//!
//! A [`Location`] wraps an opaque string and classifies it into a
//! [`Protocol`] on demand:
//!
//! - `http://` / `https://` URLs are **Remote**
//! - `file://`-prefixed strings, or strings naming an existing path, are
//!   **Local**
//! - everything else is **Unknown**
//!
//! Classification is pure and uncached; every call re-probes the
//! filesystem, so callers needing efficiency should cache the result.
//!
//! # Example
//!
//! ```ignore
//! use rowscan_file::{Fetched, Location};
//!
//! let location = Location::new("/data/rows.csv");
//! match location.fetch()? {
//!     Fetched::Bytes(bytes) => process(bytes),
//!     Fetched::UnknownProtocol => eprintln!("cannot resolve"),
//! }
//! ```

mod error;
mod http;
mod local;
mod metadata;
mod temp;

use std::io::{Cursor, Read};
use std::path::Path;

use serde::Serialize;
use url::Url;

pub use error::FetchError;
pub use local::walk_files;
pub use metadata::SourceMetadata;
pub use temp::safe_temp_path;

/// Default buffer size for streaming reads (1MB)
pub const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// Transport protocol inferred for a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// Neither heuristic matched.
    Unknown,
    /// Local filesystem path.
    Local,
    /// HTTP or HTTPS URL.
    Remote,
}

/// Result of fetching a location's content.
///
/// An unresolvable protocol is a recoverable condition for downstream type
/// inference, so it surfaces as a sentinel rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    /// Full content, owned by the caller.
    Bytes(Vec<u8>),
    /// The location matched no known protocol.
    UnknownProtocol,
}

/// An opaque content location: a local path (absolute or relative) or an
/// `http(s)` URL. Classified, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    raw: String,
}

impl Location {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Classify this location. First match wins: URL with an HTTP-family
    /// scheme, then `file://` marker or an existing local path, then
    /// [`Protocol::Unknown`].
    pub fn protocol(&self) -> Protocol {
        if let Ok(parsed) = Url::parse(&self.raw) {
            if matches!(parsed.scheme(), "http" | "https") {
                return Protocol::Remote;
            }
        }

        if self.raw.starts_with("file://") || self.local_path().exists() {
            return Protocol::Local;
        }

        Protocol::Unknown
    }

    /// The location as a filesystem path, with any `file://` marker
    /// stripped. Only meaningful for [`Protocol::Local`] locations.
    pub fn local_path(&self) -> &Path {
        Path::new(self.raw.strip_prefix("file://").unwrap_or(&self.raw))
    }

    /// Whether this location is a directory on the local filesystem.
    pub fn is_local_dir(&self) -> bool {
        self.protocol() == Protocol::Local && self.local_path().is_dir()
    }

    /// Trailing name segment: the file name of a path, or the last path
    /// segment of a URL.
    pub fn file_name(&self) -> String {
        if let Ok(parsed) = Url::parse(&self.raw) {
            if matches!(parsed.scheme(), "http" | "https") {
                return parsed
                    .path_segments()
                    .and_then(|mut segments| segments.next_back())
                    .unwrap_or_default()
                    .to_string();
            }
        }

        self.local_path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Fetch the full content behind this location.
    ///
    /// Exactly one fetch strategy is used per classification; fetch never
    /// partially succeeds. Local filesystem errors and remote transport
    /// failures are typed; an unknown protocol is the
    /// [`Fetched::UnknownProtocol`] sentinel.
    pub fn fetch(&self) -> Result<Fetched, FetchError> {
        match self.protocol() {
            Protocol::Local => {
                let bytes = local::read_file(self.local_path())?;
                tracing::debug!("read {} bytes from: {}", bytes.len(), self.raw);
                Ok(Fetched::Bytes(bytes))
            }
            Protocol::Remote => Ok(Fetched::Bytes(http::get_bytes(&self.raw)?)),
            Protocol::Unknown => Ok(Fetched::UnknownProtocol),
        }
    }

    /// Open this location for streaming reads.
    ///
    /// Local files are streamed through a real file handle, released when
    /// the reader is dropped. Remote bodies are fetched whole and served
    /// from a cursor. Streaming consumers cannot branch on a sentinel, so
    /// an unknown protocol is a typed error here.
    pub fn open_reader(&self, buffer_size: usize) -> Result<Box<dyn Read + Send>, FetchError> {
        match self.protocol() {
            Protocol::Local => Ok(local::open_file(self.local_path(), buffer_size)?),
            Protocol::Remote => {
                let bytes = http::get_bytes(&self.raw)?;
                Ok(Box::new(Cursor::new(bytes)))
            }
            Protocol::Unknown => Err(FetchError::UnresolvedProtocol(self.raw.clone())),
        }
    }

    /// Metadata for the content behind this location: name, parent,
    /// size in KiB and access time.
    pub fn metadata(&self) -> Result<SourceMetadata, FetchError> {
        match self.protocol() {
            Protocol::Local => metadata::local_metadata(self.local_path()),
            Protocol::Remote => metadata::remote_metadata(&self.raw),
            Protocol::Unknown => Err(FetchError::UnresolvedProtocol(self.raw.clone())),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
