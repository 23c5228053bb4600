use glob::{glob, Pattern};
use log::warn;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Collect `*.xml` files directly under `annotations_dir`, sorted by path
/// so crop numbering is the same on every platform.
pub fn list_annotation_files(annotations_dir: &Path) -> Result<Vec<PathBuf>> {
    if !annotations_dir.is_dir() {
        return Err(Error::MissingAnnotationDir(annotations_dir.to_path_buf()));
    }

    let pattern = format!(
        "{}/*.xml",
        Pattern::escape(&annotations_dir.to_string_lossy())
    );
    let mut files: Vec<PathBuf> = glob(&pattern)?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Unreadable entry in {}: {}", annotations_dir.display(), e);
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// True when both paths exist and resolve to the same file or directory.
pub fn is_same_location(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
