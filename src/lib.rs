//! rowscan
//!
//! A uniform content-discovery and streaming layer: point it at a location
//! — a local file, a directory, or an `http(s)` URL — and get back one
//! lazily-produced sequence of discovered items.
//!
//! # How a scan resolves
//!
//! 1. the location's transport protocol is classified (local, remote,
//!    unknown);
//! 2. the content's type is inferred, magic bytes first, extension as a
//!    fallback;
//! 3. the matching scanner produces the item stream: CSV records for
//!    CSV-bearing sources, decompressed text lines for gzip/bzip2/xz/zip
//!    containers, or file paths when the location is a directory.
//!
//! # Example
//!
//! ```ignore
//! use rowscan::{progress, scan, ScanItem};
//!
//! for item in progress(scan("people.csv")?, false) {
//!     match item? {
//!         ScanItem::Row(fields) => println!("{fields:?}"),
//!         ScanItem::Line(line) => println!("{line}"),
//!         ScanItem::Path(path) => println!("{}", path.display()),
//!     }
//! }
//! ```
//!
//! Everything is synchronous and single-pass: I/O happens inside each
//! pull, and a dropped sequence releases its handle.

mod error;
pub mod filetype;
mod progress;
mod scan;
pub mod scanners;

pub use error::ScanError;
pub use filetype::{infer_media_type, infer_type, FileTypeTag};
pub use progress::{
    progress, progress_with_sink, ConsoleSink, Progress, ProgressSink, ProgressUpdate,
    TICK_GLYPHS,
};
pub use scan::{scan, scan_with_config, Scan, ScanConfig, ScanItem};

// Re-export location types for convenience
pub use rowscan_file::{
    safe_temp_path, Fetched, FetchError, Location, Protocol, SourceMetadata,
    DEFAULT_BUFFER_SIZE,
};
