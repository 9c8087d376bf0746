//! Scanner for zip archives.

use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Cursor};

use zip::ZipArchive;

use crate::error::ScanError;
use crate::filetype::FileTypeTag;
use crate::scan::{ScanConfig, ScanItem};
use crate::scanners::{ScanStream, Scanner};
use rowscan_file::{Fetched, Location};

/// Enumerates every member of the archive in listing order and yields each
/// contained line, decoded and newline-stripped.
///
/// Members are visited lazily; the member currently being read has its
/// lines buffered because the archive reader borrows the archive for the
/// duration of one member. The decompressed archive as a whole is never
/// materialized.
pub struct ZipScanner;

impl Scanner for ZipScanner {
    fn tag(&self) -> FileTypeTag {
        FileTypeTag::Zip
    }

    fn scan(&self, location: &Location, _config: &ScanConfig) -> Result<ScanStream, ScanError> {
        let bytes = match location.fetch()? {
            Fetched::Bytes(bytes) => bytes,
            Fetched::UnknownProtocol => {
                return Err(ScanError::TypeNotSupported(location.as_str().to_string()))
            }
        };

        let location = location.as_str().to_string();
        let archive =
            ZipArchive::new(Cursor::new(bytes)).map_err(|source| ScanError::Zip {
                location: location.clone(),
                source,
            })?;

        Ok(Box::new(ZipLines {
            archive,
            next_member: 0,
            pending: VecDeque::new(),
            location,
            failed: false,
        }))
    }
}

struct ZipLines {
    archive: ZipArchive<Cursor<Vec<u8>>>,
    next_member: usize,
    pending: VecDeque<String>,
    location: String,
    failed: bool,
}

impl Iterator for ZipLines {
    type Item = Result<ScanItem, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.failed {
                return None;
            }

            if let Some(line) = self.pending.pop_front() {
                return Some(Ok(ScanItem::Line(line)));
            }

            if self.next_member >= self.archive.len() {
                return None;
            }

            let index = self.next_member;
            self.next_member += 1;

            let member = match self.archive.by_index(index) {
                Ok(member) => member,
                Err(source) => {
                    self.failed = true;
                    return Some(Err(ScanError::Zip {
                        location: self.location.clone(),
                        source,
                    }));
                }
            };

            if member.is_dir() {
                continue;
            }

            tracing::debug!("reading zip member: {}", member.name());

            for line in BufReader::new(member).lines() {
                match line {
                    Ok(line) => self.pending.push_back(line),
                    Err(source) => {
                        self.failed = true;
                        return Some(Err(ScanError::Io(source)));
                    }
                }
            }
        }
    }
}
