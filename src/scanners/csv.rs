//! Scanner for plain and CSV-formatted text content.

use std::io::Cursor;

use crate::error::ScanError;
use crate::filetype::FileTypeTag;
use crate::scan::{ScanConfig, ScanItem};
use crate::scanners::{ScanStream, Scanner};
use rowscan_file::{Fetched, Location};

/// Fetches the full content, decodes it as text and parses each line as a
/// comma-delimited record. Plain text rides the same grammar and comes out
/// as single-field records.
///
/// Unlike the compressed scanners, content is materialized up front;
/// record parsing stays lazy over the buffer.
pub struct CsvScanner {
    tag: FileTypeTag,
}

impl CsvScanner {
    pub fn new(tag: FileTypeTag) -> Self {
        Self { tag }
    }
}

impl Scanner for CsvScanner {
    fn tag(&self) -> FileTypeTag {
        self.tag
    }

    fn scan(&self, location: &Location, config: &ScanConfig) -> Result<ScanStream, ScanError> {
        let bytes = match location.fetch()? {
            Fetched::Bytes(bytes) => bytes,
            Fetched::UnknownProtocol => {
                return Err(ScanError::TypeNotSupported(location.as_str().to_string()))
            }
        };

        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(config.delimiter)
            .from_reader(Cursor::new(bytes));

        let location = location.as_str().to_string();

        Ok(Box::new(reader.into_records().map(move |result| {
            result
                .map(|record| ScanItem::Row(record.iter().map(str::to_string).collect()))
                .map_err(|source| ScanError::Csv {
                    location: location.clone(),
                    source,
                })
        })))
    }
}
