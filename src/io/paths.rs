//! String path helpers. Paths here may be local (`/data/x.bam`) or remote
//! URIs (`s3://bucket/x.bam`), so they are handled as `/`-separated strings
//! rather than `std::path::Path`.
use crate::types::FileSystem;

/// File types made of two extensions that must be kept together.
const COMPOUND_FILE_TYPES: [&str; 1] = ["FASTQ.GZ"];

/// Join `file` onto `dir` with exactly one `/` between them. An absolute
/// `file` replaces `dir`, as in POSIX path joining.
pub fn join_path(dir: &str, file: &str) -> String {
    if dir.is_empty() || file.starts_with('/') {
        file.to_string()
    } else if dir.ends_with('/') {
        format!("{dir}{file}")
    } else {
        format!("{dir}/{file}")
    }
}

/// Full path of `file` under `root`, unless `file` already contains `root`.
pub fn full_path(root: &str, file: &str) -> String {
    if file.contains(root) {
        file.to_string()
    } else {
        join_path(root, file)
    }
}

pub fn full_paths(root: &str, files: &[String]) -> Vec<String> {
    files.iter().map(|f| full_path(root, f)).collect()
}

/// Last component of a path; empty for paths ending in `/`.
pub fn file_only(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Folder part of a path, always ending in `/`. A path whose last component
/// has no extension is taken to be a folder already.
pub fn file_folder(path: &str) -> String {
    if file_only(path).contains('.') {
        match path.rfind('/') {
            Some(idx) => format!("{}/", &path[..idx]),
            None => String::new(),
        }
    } else {
        format!("{}/", path.trim_end_matches('/'))
    }
}

/// File type (extension) of the first path, e.g. `fastq`, `fastq.gz`.
/// Empty when the path has no extension, as for folders.
pub fn infer_file_type<S: AsRef<str>>(paths: &[S]) -> String {
    let Some(first) = paths.first() else {
        return String::new();
    };
    let name = file_only(first.as_ref());
    let upper = name.to_ascii_uppercase();
    let mut parts = name.rsplit('.');
    let (Some(ext), Some(_)) = (parts.next(), name.find('.')) else {
        return String::new();
    };
    let is_compound = COMPOUND_FILE_TYPES
        .iter()
        .any(|combo| upper.ends_with(&format!(".{combo}")));
    match (is_compound, parts.next()) {
        (true, Some(inner)) => format!("{inner}.{ext}"),
        _ => ext.to_string(),
    }
}

/// Storage scheme a path lives on.
pub fn infer_file_system(path: &str) -> FileSystem {
    if path.starts_with("s3:/")
        || (path.contains("amazon") && path.contains("aws") && path.contains("s3"))
    {
        FileSystem::S3
    } else {
        FileSystem::Local
    }
}
