//! Content-type inference for locations.
//!
//! Detection is content-first: fetched bytes run through a magic-number
//! classifier (most specific signature first), then a UTF-8 text probe that
//! separates CSV from plain text. Only when content yields nothing does the
//! trailing name segment get a say, through an extension-based media-type
//! guess mapped onto the same tag vocabulary.

use serde::Serialize;
use tracing::debug;

use crate::error::ScanError;
use rowscan_file::{Fetched, Location};

const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const BZIP2_MAGIC: &[u8] = b"BZh";
const XZ_MAGIC: &[u8] = &[0xfd, 0x37, 0x7a, 0x58, 0x5a, 0x00];

/// Inferred content/container type of a location.
///
/// Derived deterministically from content bytes or, failing that, from the
/// location's name extension. Both inference paths share this one
/// vocabulary; the media-type rendering is derived from it via
/// [`FileTypeTag::media_type`], never the other way around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileTypeTag {
    Csv,
    Plain,
    Gzip,
    Zip,
    Bzip2,
    Xz,
    Unsupported,
}

impl FileTypeTag {
    /// The standard media-type string for this tag.
    pub fn media_type(&self) -> &'static str {
        match self {
            FileTypeTag::Csv => "text/csv",
            FileTypeTag::Plain => "text/plain",
            FileTypeTag::Gzip => "application/gzip",
            FileTypeTag::Zip => "application/zip",
            FileTypeTag::Bzip2 => "application/x-bzip2",
            FileTypeTag::Xz => "application/x-xz",
            FileTypeTag::Unsupported => "application/octet-stream",
        }
    }
}

impl std::fmt::Display for FileTypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FileTypeTag::Csv => "CSV",
            FileTypeTag::Plain => "plain",
            FileTypeTag::Gzip => "gzip",
            FileTypeTag::Zip => "zip",
            FileTypeTag::Bzip2 => "bzip2",
            FileTypeTag::Xz => "xz",
            FileTypeTag::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}

/// Infer the file type of a location. Bytes are fetched internally.
///
/// An unresolvable protocol cannot be typed and fails with
/// [`ScanError::TypeNotSupported`], as does content that neither the
/// byte classifier nor the extension guess can place.
pub fn infer_type(location: &Location) -> Result<FileTypeTag, ScanError> {
    let not_supported = || ScanError::TypeNotSupported(location.as_str().to_string());

    let bytes = match location.fetch()? {
        Fetched::Bytes(bytes) => bytes,
        Fetched::UnknownProtocol => return Err(not_supported()),
    };

    if let Some(tag) = classify_bytes(&bytes) {
        debug!("classified {location} as {tag} from content");
        return Ok(tag);
    }

    let name = location.file_name();
    match guess_from_name(&name) {
        Some(tag) => {
            debug!("classified {location} as {tag} from name: {name}");
            Ok(tag)
        }
        None => Err(not_supported()),
    }
}

/// Infer the file type of a location, rendered as a media-type string.
pub fn infer_media_type(location: &Location) -> Result<&'static str, ScanError> {
    infer_type(location).map(|tag| tag.media_type())
}

/// Classify content bytes by magic number, falling back to a text probe.
/// Returns `None` when the bytes match no known signature and are not
/// valid text.
pub fn classify_bytes(bytes: &[u8]) -> Option<FileTypeTag> {
    // most specific signature first
    if bytes.starts_with(XZ_MAGIC) {
        return Some(FileTypeTag::Xz);
    }
    if bytes.starts_with(ZIP_MAGIC) {
        return Some(FileTypeTag::Zip);
    }
    if bytes.starts_with(BZIP2_MAGIC) {
        return Some(FileTypeTag::Bzip2);
    }
    if bytes.starts_with(GZIP_MAGIC) {
        return Some(FileTypeTag::Gzip);
    }

    classify_text(bytes)
}

fn classify_text(bytes: &[u8]) -> Option<FileTypeTag> {
    let text = std::str::from_utf8(bytes).ok()?;
    if text.contains('\0') {
        return None;
    }

    match text.lines().find(|line| !line.trim().is_empty()) {
        Some(line) if looks_like_csv(line) => Some(FileTypeTag::Csv),
        _ => Some(FileTypeTag::Plain),
    }
}

/// A text line counts as CSV when the grammar parses it into more than one
/// field. Single-column content stays plain.
fn looks_like_csv(line: &str) -> bool {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(line.as_bytes());

    matches!(reader.records().next(), Some(Ok(record)) if record.len() >= 2)
}

/// Extension-based guess over a trailing name segment, mapped onto the tag
/// vocabulary.
///
/// A name whose extension maps to a media type with no scanner (a PDF, a
/// `.bin` blob) is recognized as [`FileTypeTag::Unsupported`] — the type
/// *was* determined, there is just nothing to scan it with. Only a name
/// with no recognizable extension at all yields `None`.
pub fn guess_from_name(name: &str) -> Option<FileTypeTag> {
    let mime = mime_guess::from_path(name).first()?;

    Some(match mime.essence_str() {
        "text/csv" => FileTypeTag::Csv,
        "text/plain" => FileTypeTag::Plain,
        "application/gzip" | "application/x-gzip" => FileTypeTag::Gzip,
        "application/zip" => FileTypeTag::Zip,
        "application/x-bzip" | "application/x-bzip2" => FileTypeTag::Bzip2,
        "application/x-xz" => FileTypeTag::Xz,
        _ => FileTypeTag::Unsupported,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_classify_magic_numbers() {
        assert_eq!(
            classify_bytes(&[0x1f, 0x8b, 0x08, 0x00]),
            Some(FileTypeTag::Gzip)
        );
        assert_eq!(classify_bytes(b"PK\x03\x04rest"), Some(FileTypeTag::Zip));
        assert_eq!(classify_bytes(b"BZh91AY"), Some(FileTypeTag::Bzip2));
        assert_eq!(
            classify_bytes(&[0xfd, 0x37, 0x7a, 0x58, 0x5a, 0x00, 0x00]),
            Some(FileTypeTag::Xz)
        );
    }

    #[test]
    fn test_classify_csv_text() {
        assert_eq!(classify_bytes(b"name,age\nalice,30\n"), Some(FileTypeTag::Csv));
    }

    #[test]
    fn test_classify_plain_text() {
        assert_eq!(
            classify_bytes(b"just a line\nanother line\n"),
            Some(FileTypeTag::Plain)
        );
    }

    #[test]
    fn test_classify_empty_is_plain() {
        assert_eq!(classify_bytes(b""), Some(FileTypeTag::Plain));
    }

    #[test]
    fn test_classify_binary_is_none() {
        assert_eq!(classify_bytes(&[0x00, 0xff, 0xfe, 0x00, 0x80]), None);
    }

    #[test]
    fn test_guess_from_name() {
        assert_eq!(guess_from_name("rows.csv"), Some(FileTypeTag::Csv));
        assert_eq!(guess_from_name("notes.txt"), Some(FileTypeTag::Plain));
        assert_eq!(guess_from_name("rows.csv.gz"), Some(FileTypeTag::Gzip));
        assert_eq!(guess_from_name("archive.zip"), Some(FileTypeTag::Zip));
        assert_eq!(guess_from_name("rows.csv.bz2"), Some(FileTypeTag::Bzip2));
        assert_eq!(guess_from_name("rows.csv.xz"), Some(FileTypeTag::Xz));
        assert_eq!(guess_from_name("blob.bin"), Some(FileTypeTag::Unsupported));
        assert_eq!(guess_from_name("doc.pdf"), Some(FileTypeTag::Unsupported));
        assert_eq!(guess_from_name(""), None);
        assert_eq!(guess_from_name("no-extension"), None);
    }

    #[test]
    fn test_media_type_matches_guess_vocabulary() {
        for (name, tag) in [
            ("a.csv", FileTypeTag::Csv),
            ("a.txt", FileTypeTag::Plain),
            ("a.zip", FileTypeTag::Zip),
            ("a.xz", FileTypeTag::Xz),
        ] {
            assert_eq!(guess_from_name(name), Some(tag));
            assert_eq!(guess_from_name(name).map(|t| t.media_type()), Some(tag.media_type()));
        }
    }

    #[test]
    fn test_infer_type_from_content() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"name,age\nalice,30\n").unwrap();
        temp_file.flush().unwrap();

        let location = Location::new(temp_file.path().to_str().unwrap());
        assert_eq!(infer_type(&location).unwrap(), FileTypeTag::Csv);
        assert_eq!(infer_media_type(&location).unwrap(), "text/csv");
    }

    #[test]
    fn test_infer_type_unknown_protocol() {
        let location = Location::new("nowhere-in-particular");
        assert!(matches!(
            infer_type(&location),
            Err(ScanError::TypeNotSupported(_))
        ));
    }

    #[test]
    fn test_infer_type_binary_with_known_inert_extension() {
        let mut temp_file = NamedTempFile::with_suffix(".bin").unwrap();
        temp_file.write_all(&[0x00, 0x92, 0xff, 0x07, 0x80]).unwrap();
        temp_file.flush().unwrap();

        let location = Location::new(temp_file.path().to_str().unwrap());
        assert_eq!(infer_type(&location).unwrap(), FileTypeTag::Unsupported);
    }

    #[test]
    fn test_infer_type_unrecognized_content_and_name() {
        let mut temp_file = NamedTempFile::with_suffix(".mystery-ext").unwrap();
        temp_file.write_all(&[0x00, 0x92, 0xff, 0x07, 0x80]).unwrap();
        temp_file.flush().unwrap();

        let location = Location::new(temp_file.path().to_str().unwrap());
        assert!(matches!(
            infer_type(&location),
            Err(ScanError::TypeNotSupported(_))
        ));
    }
}
