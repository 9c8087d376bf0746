//! Unique temp file paths.

use std::io;
use std::path::PathBuf;

use uuid::Uuid;

/// Produce a unique path under the system temp directory.
///
/// With `file_name` the path is deterministic; without, a UUID v4 name is
/// generated. A file already present at the path is removed first, so the
/// returned path is always free to create.
pub fn safe_temp_path(file_name: Option<&str>) -> io::Result<PathBuf> {
    let temp_dir = std::env::temp_dir();

    let path = match file_name {
        Some(name) => temp_dir.join(name),
        None => temp_dir.join(Uuid::new_v4().to_string()),
    };

    if path.exists() {
        std::fs::remove_file(&path)?;
    }

    Ok(path)
}
