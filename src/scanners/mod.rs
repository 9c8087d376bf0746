//! Codec-aware scanners: one lazy line/record producer per supported
//! container, selected by [`FileTypeTag`].
//!
//! Every scanner opens one location and produces a finite, single-pass
//! sequence; once exhausted it cannot be replayed without re-invoking the
//! scanner. Handles are acquired on first use and released when the
//! sequence is dropped.

mod csv;
mod lines;
mod zip;

use crate::error::ScanError;
use crate::filetype::FileTypeTag;
use crate::scan::{ScanConfig, ScanItem};
use rowscan_file::Location;

pub use self::csv::CsvScanner;
pub use self::lines::{Bzip2Scanner, GzipScanner, XzScanner};
pub use self::zip::ZipScanner;

/// Lazy sequence of scan items, pulled one at a time.
pub type ScanStream = Box<dyn Iterator<Item = Result<ScanItem, ScanError>> + Send>;

/// A scanner turns one location into a lazy sequence of text rows.
pub trait Scanner {
    /// The tag this scanner was selected for.
    fn tag(&self) -> FileTypeTag;

    /// Open the location and produce its item stream.
    fn scan(&self, location: &Location, config: &ScanConfig) -> Result<ScanStream, ScanError>;
}

/// Map a tag to its scanner. `None` for tags with no scanner, which the
/// dispatcher turns into [`ScanError::ScanNotPossible`].
pub fn for_tag(tag: FileTypeTag) -> Option<Box<dyn Scanner>> {
    match tag {
        FileTypeTag::Csv | FileTypeTag::Plain => Some(Box::new(CsvScanner::new(tag))),
        FileTypeTag::Gzip => Some(Box::new(GzipScanner)),
        FileTypeTag::Zip => Some(Box::new(ZipScanner)),
        FileTypeTag::Bzip2 => Some(Box::new(Bzip2Scanner)),
        FileTypeTag::Xz => Some(Box::new(XzScanner)),
        FileTypeTag::Unsupported => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_tag_declares_matching_tag() {
        for tag in [
            FileTypeTag::Csv,
            FileTypeTag::Plain,
            FileTypeTag::Gzip,
            FileTypeTag::Zip,
            FileTypeTag::Bzip2,
            FileTypeTag::Xz,
        ] {
            let scanner = for_tag(tag).unwrap();
            assert_eq!(scanner.tag(), tag);
        }
    }

    #[test]
    fn test_for_tag_unsupported_has_no_scanner() {
        assert!(for_tag(FileTypeTag::Unsupported).is_none());
    }
}
