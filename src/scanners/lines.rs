//! Scanners for single-stream compression envelopes: gzip, bzip2 and xz.
//!
//! Each wraps the location's streaming reader in the matching decoder and
//! yields decompressed lines with the trailing newline stripped. Nothing is
//! materialized; decompression happens inside each pull, and the underlying
//! handle is released when the sequence is dropped.

use std::io::{BufRead, BufReader, Read};

use bzip2::read::BzDecoder;
use flate2::read::MultiGzDecoder;
use xz2::read::XzDecoder;

use crate::error::ScanError;
use crate::filetype::FileTypeTag;
use crate::scan::{ScanConfig, ScanItem};
use crate::scanners::{ScanStream, Scanner};
use rowscan_file::Location;

fn line_stream<R: Read + Send + 'static>(reader: R) -> ScanStream {
    Box::new(BufReader::new(reader).lines().map(|result| {
        result
            .map(ScanItem::Line)
            .map_err(ScanError::Io)
    }))
}

pub struct GzipScanner;

impl Scanner for GzipScanner {
    fn tag(&self) -> FileTypeTag {
        FileTypeTag::Gzip
    }

    fn scan(&self, location: &Location, config: &ScanConfig) -> Result<ScanStream, ScanError> {
        let reader = location.open_reader(config.buffer_size)?;
        // gzip files may hold several concatenated members; decode them all
        Ok(line_stream(MultiGzDecoder::new(reader)))
    }
}

pub struct Bzip2Scanner;

impl Scanner for Bzip2Scanner {
    fn tag(&self) -> FileTypeTag {
        FileTypeTag::Bzip2
    }

    fn scan(&self, location: &Location, config: &ScanConfig) -> Result<ScanStream, ScanError> {
        let reader = location.open_reader(config.buffer_size)?;
        Ok(line_stream(BzDecoder::new(reader)))
    }
}

pub struct XzScanner;

impl Scanner for XzScanner {
    fn tag(&self) -> FileTypeTag {
        FileTypeTag::Xz
    }

    fn scan(&self, location: &Location, config: &ScanConfig) -> Result<ScanStream, ScanError> {
        let reader = location.open_reader(config.buffer_size)?;
        Ok(line_stream(XzDecoder::new(reader)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const LINES: [&str; 3] = ["name,age", "alice,30", "bob,25"];

    fn collect(scanner: &dyn Scanner, path: &std::path::Path) -> Vec<ScanItem> {
        let location = Location::new(path.to_str().unwrap());
        scanner
            .scan(&location, &ScanConfig::default())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    fn expected() -> Vec<ScanItem> {
        LINES.iter().map(|l| ScanItem::Line(l.to_string())).collect()
    }

    #[test]
    fn test_gzip_lines_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rows.csv.gz");
        let mut encoder = flate2::write::GzEncoder::new(
            std::fs::File::create(&path).unwrap(),
            flate2::Compression::default(),
        );
        encoder.write_all(LINES.join("\n").as_bytes()).unwrap();
        encoder.write_all(b"\n").unwrap();
        encoder.finish().unwrap();

        assert_eq!(collect(&GzipScanner, &path), expected());
    }

    #[test]
    fn test_gzip_concatenated_members() {
        // two independent gzip streams back to back are one valid file
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rows.csv.gz");
        let file = std::fs::File::create(&path).unwrap();

        let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        encoder.write_all(b"one\n").unwrap();
        let file = encoder.finish().unwrap();

        let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        encoder.write_all(b"two\n").unwrap();
        encoder.finish().unwrap();

        assert_eq!(
            collect(&GzipScanner, &path),
            vec![
                ScanItem::Line("one".to_string()),
                ScanItem::Line("two".to_string()),
            ]
        );
    }

    #[test]
    fn test_bzip2_lines_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rows.csv.bz2");
        let mut encoder = bzip2::write::BzEncoder::new(
            std::fs::File::create(&path).unwrap(),
            bzip2::Compression::best(),
        );
        encoder.write_all(LINES.join("\n").as_bytes()).unwrap();
        encoder.write_all(b"\n").unwrap();
        encoder.finish().unwrap();

        assert_eq!(collect(&Bzip2Scanner, &path), expected());
    }

    #[test]
    fn test_xz_lines_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rows.csv.xz");
        let mut encoder =
            xz2::write::XzEncoder::new(std::fs::File::create(&path).unwrap(), 6);
        encoder.write_all(LINES.join("\n").as_bytes()).unwrap();
        encoder.write_all(b"\n").unwrap();
        encoder.finish().unwrap();

        assert_eq!(collect(&XzScanner, &path), expected());
    }

    #[test]
    fn test_no_trailing_newlines_in_items() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rows.gz");
        let mut encoder = flate2::write::GzEncoder::new(
            std::fs::File::create(&path).unwrap(),
            flate2::Compression::default(),
        );
        encoder.write_all(b"one\ntwo\n").unwrap();
        encoder.finish().unwrap();

        for item in collect(&GzipScanner, &path) {
            match item {
                ScanItem::Line(line) => assert!(!line.ends_with('\n')),
                other => panic!("unexpected item: {other:?}"),
            }
        }
    }
}
