use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use uuid::Uuid;

/// Create a uniquely named working directory under `base` so that several
/// module runs on one machine do not share files.
///
/// Falls back to `base` itself when the subdirectory cannot be created; runs
/// are then no longer isolated from each other.
pub fn generate_working_dir(base: &Path) -> PathBuf {
    let working_dir = base.join(Uuid::new_v4().to_string());
    match fs::create_dir(&working_dir) {
        Ok(()) => {
            info!("Created working directory {:?}", working_dir);
            working_dir
        }
        Err(e) => {
            warn!(
                "Could not create {:?} ({}); sharing base directory {:?}",
                working_dir, e, base
            );
            base.to_path_buf()
        }
    }
}
