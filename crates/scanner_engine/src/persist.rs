use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("{} has no file name", .0.display())]
    NoFileName(PathBuf),
    #[error("{} exists but is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("cannot create {}: {source}", dir.display())]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Replaces `path` with `contents`, creating missing parent directories.
///
/// The bytes are staged in a sibling temp file and renamed over `path`, so a
/// crash mid-write leaves the previous file intact.
pub fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), PersistError> {
    if path.file_name().is_none() {
        return Err(PersistError::NoFileName(path.to_path_buf()));
    }
    let dir = ensure_parent_dir(path)?;
    let write_err = |source: io::Error| PersistError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut staged = NamedTempFile::new_in(&dir).map_err(write_err)?;
    staged.write_all(contents).map_err(write_err)?;
    staged.as_file().sync_all().map_err(write_err)?;
    staged.persist(path).map_err(|err| write_err(err.error))?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<PathBuf, PersistError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if dir.is_dir() {
        return Ok(dir);
    }
    if dir.exists() {
        return Err(PersistError::NotADirectory(dir));
    }
    fs::create_dir_all(&dir).map_err(|source| PersistError::CreateDir {
        dir: dir.clone(),
        source,
    })?;
    Ok(dir)
}
