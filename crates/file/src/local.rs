//! Local filesystem reads and directory traversal.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Read a local file's full contents. Filesystem errors (not found,
/// permission denied) propagate untouched.
pub(crate) fn read_file(path: &Path) -> io::Result<Vec<u8>> {
    std::fs::read(path)
}

/// Open a local file for buffered streaming reads.
pub(crate) fn open_file(path: &Path, buffer_size: usize) -> io::Result<Box<dyn Read + Send>> {
    let file = File::open(path)?;
    Ok(Box::new(BufReader::with_capacity(buffer_size, file)))
}

/// Recursively enumerate every file under `root`, yielding absolute paths.
///
/// Order is the underlying filesystem traversal order, not sorted.
/// Subdirectory entries themselves are skipped; only files are yielded.
pub fn walk_files(root: &Path) -> impl Iterator<Item = io::Result<PathBuf>> {
    tracing::debug!("walking directory tree: {}", root.display());

    WalkDir::new(root).into_iter().filter_map(|entry| match entry {
        Ok(entry) => {
            if entry.file_type().is_file() {
                Some(Ok(absolute(entry.path())))
            } else {
                None
            }
        }
        Err(err) => Some(Err(io::Error::from(err))),
    })
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
