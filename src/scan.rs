//! Scan dispatcher: one entry point turning a location into a lazy
//! sequence of rows, lines or paths.

use std::path::PathBuf;

use tracing::debug;

use crate::error::ScanError;
use crate::filetype::infer_type;
use crate::scanners::{self, ScanStream};
use rowscan_file::{walk_files, Location, DEFAULT_BUFFER_SIZE};

/// One discovered item. Callers treat the sequence uniformly and
/// distinguish by shape when they need to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanItem {
    /// Ordered field sequence from a CSV-bearing source.
    Row(Vec<String>),
    /// Text line from a compressed container.
    Line(String),
    /// Absolute path of a file discovered under a directory.
    Path(PathBuf),
}

/// Knobs for a scan call.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// CSV delimiter (default: `,`)
    pub delimiter: u8,
    /// Buffer size for streaming reads (default: 1MB)
    pub buffer_size: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

/// Lazy sequence of discovered items. Single-pass and non-restartable:
/// a failed or abandoned scan is re-invoked from scratch. Dropping it
/// releases the underlying handle.
pub struct Scan {
    inner: ScanStream,
}

impl Iterator for Scan {
    type Item = Result<ScanItem, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// Scan a location with default configuration.
pub fn scan(location: &str) -> Result<Scan, ScanError> {
    scan_with_config(location, &ScanConfig::default())
}

/// Scan a location: directories enumerate their files, everything else is
/// type-inferred and handed to the matching scanner.
///
/// A directory is a structural condition, not a type, so the check comes
/// before inference. Otherwise the inferred tag selects the scanner; a tag
/// without one fails with [`ScanError::ScanNotPossible`] before anything
/// is yielded. One scan call never mixes fetch strategies.
pub fn scan_with_config(location: &str, config: &ScanConfig) -> Result<Scan, ScanError> {
    let location = Location::new(location);

    if location.is_local_dir() {
        debug!("location is a directory, walking: {location}");
        let inner: ScanStream = Box::new(
            walk_files(location.local_path())
                .map(|result| result.map(ScanItem::Path).map_err(ScanError::Io)),
        );
        return Ok(Scan { inner });
    }

    let tag = infer_type(&location)?;

    let scanner = scanners::for_tag(tag).ok_or_else(|| ScanError::ScanNotPossible {
        tag,
        location: location.as_str().to_string(),
    })?;
    debug_assert_eq!(scanner.tag(), tag);
    debug!("scanning {location} as {tag}");

    Ok(Scan {
        inner: scanner.scan(&location, config)?,
    })
}
