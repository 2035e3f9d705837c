//! Reading and writing the files of a task.
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::error::Error;

/// Lists the files of `dir` with a `.svg` extension, in any case, sorted by name.
///
/// Only the immediate children of `dir` are listed, and they're matched by name alone.
///
/// # Errors
///
/// If `dir` doesn't exist, or can't be read.
pub fn read_svgs(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let entries = fs::read_dir(dir).map_err(|source| match source.kind() {
        ErrorKind::NotFound => Error::DirectoryNotFound(dir.to_path_buf()),
        _ => Error::ReadFailure {
            path: dir.to_path_buf(),
            source,
        },
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::ReadFailure {
            path: dir.to_path_buf(),
            source,
        })?;
        if is_svg(&entry.file_name().to_string_lossy()) {
            paths.push(entry.path());
        }
    }
    paths.sort();
    Ok(paths)
}

fn is_svg(name: &str) -> bool {
    name.to_lowercase().ends_with(".svg")
}

/// Returns the file name of a listed path.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Reads a file as UTF-8 text.
///
/// # Errors
///
/// If the file can't be read, or isn't UTF-8.
pub fn read(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::ReadFailure {
        path: path.to_path_buf(),
        source,
    })
}

/// Creates a directory and its parents, if they don't already exist.
///
/// # Errors
///
/// If the directory can't be created.
pub fn create_dir_all(path: &Path) -> Result<(), Error> {
    fs::create_dir_all(path).map_err(|source| Error::WriteFailure {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `contents` to a file, replacing it if it exists.
///
/// # Errors
///
/// If the file can't be written.
pub fn write(path: &Path, contents: &str) -> Result<(), Error> {
    log::debug!("writing {}", path.display());
    fs::write(path, contents).map_err(|source| Error::WriteFailure {
        path: path.to_path_buf(),
        source,
    })
}

#[test]
fn svg_names() {
    assert!(is_svg("a.svg"));
    assert!(is_svg("B.SVG"));
    assert!(is_svg("c.Svg"));
    assert!(is_svg(".svg"));
    assert!(!is_svg("d.svgz"));
    assert!(!is_svg("e.png"));
    assert!(!is_svg("svg"));
}
