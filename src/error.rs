//! Scan-level failure taxonomy.

use crate::filetype::FileTypeTag;
use rowscan_file::FetchError;

/// Errors produced while inferring a type or scanning a location.
///
/// Every variant is fatal for the scan call that raised it; a failed scan
/// is restarted from the beginning by the caller. Failures surface at the
/// pull where the affected item would have been produced.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Content type could not be determined by content or by name, or the
    /// location's protocol could not be resolved at all.
    #[error("could not determine a supported file type for: {0}")]
    TypeNotSupported(String),

    /// A type was determined but no scanner exists for it.
    #[error("no scanner available for {tag} content at: {location}")]
    ScanNotPossible {
        tag: FileTypeTag,
        location: String,
    },

    /// The underlying CSV grammar rejected a record.
    #[error("CSV parsing failed for: {location}")]
    Csv {
        location: String,
        #[source]
        source: csv::Error,
    },

    /// The zip archive could not be opened or a member could not be read.
    #[error("zip archive error for: {location}")]
    Zip {
        location: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// Fetching the location's content failed (transport, HTTP status,
    /// unresolved protocol).
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Filesystem error, passed through untouched.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
