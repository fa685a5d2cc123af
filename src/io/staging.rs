//! Staging: moving run files between their storage location and the local
//! working directory of a module run.
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::io::paths::{file_only, full_path, join_path};
use crate::types::FileSystem;

/// Transfers files and folders for a module run.
///
/// With `mock` set, implementations compute and return the destination paths
/// without touching any storage.
pub trait Stager {
    /// Download `paths` into `dest_dir`; returns the local path of each.
    fn download_files(
        &self,
        paths: &[String],
        dest_dir: &str,
        scheme: FileSystem,
        mock: bool,
    ) -> Result<Vec<String>>;

    /// Download a folder into `dest_dir`. When `path` names a file, its whole
    /// containing folder is downloaded and the file's local path returned.
    fn download_folder(
        &self,
        path: &str,
        dest_dir: &str,
        scheme: FileSystem,
        mock: bool,
    ) -> Result<String>;

    /// Upload the contents of `local_dir` to `remote_dir`.
    fn upload_folder(
        &self,
        local_dir: &str,
        remote_dir: &str,
        scheme: FileSystem,
        mock: bool,
    ) -> Result<String>;
}

/// Stager for the local filesystem. Remote schemes are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStager;

impl LocalStager {
    pub fn new() -> Self {
        Self
    }

    fn require_local(scheme: FileSystem, path: &str) -> Result<()> {
        match scheme {
            FileSystem::Local => Ok(()),
            other => Err(Error::UnsupportedFileSystem {
                scheme: other.to_string(),
                path: path.to_string(),
            }),
        }
    }
}

/// Copy the entries of `from` into `to`, recursing into subfolders.
fn copy_dir_contents(from: &Path, to: &Path) -> Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_contents(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

impl Stager for LocalStager {
    fn download_files(
        &self,
        paths: &[String],
        dest_dir: &str,
        scheme: FileSystem,
        mock: bool,
    ) -> Result<Vec<String>> {
        info!("Downloading file(s) {:?} to {}", paths, dest_dir);
        let local: Vec<String> = paths
            .iter()
            .map(|p| full_path(dest_dir, file_only(p)))
            .collect();
        if mock {
            return Ok(local);
        }
        for (src, dest) in paths.iter().zip(&local) {
            Self::require_local(scheme, src)?;
            fs::create_dir_all(dest_dir)?;
            fs::copy(src, dest)?;
        }
        Ok(local)
    }

    fn download_folder(
        &self,
        path: &str,
        dest_dir: &str,
        scheme: FileSystem,
        mock: bool,
    ) -> Result<String> {
        info!("Downloading folder {} to {}", path, dest_dir);
        if mock {
            return Ok(dest_dir.to_string());
        }
        Self::require_local(scheme, path)?;

        let name = file_only(path);
        let (folder, staged) = if name.contains('.') {
            let folder = &path[..path.len() - name.len()];
            (folder, join_path(dest_dir, name))
        } else {
            (path, dest_dir.to_string())
        };
        let folder = if folder.is_empty() { "." } else { folder };
        copy_dir_contents(Path::new(folder), Path::new(dest_dir))?;
        Ok(staged)
    }

    fn upload_folder(
        &self,
        local_dir: &str,
        remote_dir: &str,
        scheme: FileSystem,
        mock: bool,
    ) -> Result<String> {
        info!("Uploading folder {} to {}", local_dir, remote_dir);
        if mock {
            return Ok(remote_dir.to_string());
        }
        Self::require_local(scheme, remote_dir)?;
        copy_dir_contents(Path::new(local_dir), Path::new(remote_dir))?;
        Ok(remote_dir.to_string())
    }
}
