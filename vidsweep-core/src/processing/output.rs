//! Destination path selection with collision avoidance.
//!
//! Candidates are checked against the file system at call time and the first
//! free one wins: `name.ext`, then `name-1.ext`, `name-2.ext`, and so on.
//! Nothing is reserved, so two processes resolving into the same directory
//! can pick the same name.

use crate::config::TranscodeConfig;

use std::fs;
use std::path::{Path, PathBuf};

/// Marker appended to in-place outputs until they replace their source.
pub const IN_PLACE_TEMP_MARKER: &str = "TEMP";

/// Where a transcode of `base_name` should be written.
///
/// In dedicated-output mode this is `{output_root}/{base_name}.{container}`;
/// in place it is the transient `{directory}/{base_name}-TEMP.{container}`.
/// Either gets a numeric suffix on collision.
pub fn resolve_destination(directory: &Path, base_name: &str, config: &TranscodeConfig) -> PathBuf {
    if config.in_place() {
        let stem = format!("{base_name}-{IN_PLACE_TEMP_MARKER}");
        first_available(directory, &stem, config.container())
    } else {
        first_available(config.output_dir(), base_name, config.container())
    }
}

/// Where a plain copy of an already compliant file should go.
///
/// Copies keep the source's own extension rather than the target container.
pub fn resolve_copy_destination(output_root: &Path, base_name: &str, extension: &str) -> PathBuf {
    first_available(output_root, base_name, extension)
}

/// Final name of an in-place transcode once the temporary output is swapped in.
///
/// Not collision-checked: an existing file of this exact name is replaced.
pub fn in_place_final_path(directory: &Path, base_name: &str, container: &str) -> PathBuf {
    directory.join(file_name(base_name, None, container))
}

/// True if anything, including a dangling symlink, sits at `path`.
pub fn is_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// First of `stem.ext`, `stem-1.ext`, `stem-2.ext`, ... that is not occupied.
pub fn first_available(directory: &Path, stem: &str, extension: &str) -> PathBuf {
    let candidate = directory.join(file_name(stem, None, extension));
    if !is_occupied(&candidate) {
        return candidate;
    }

    let mut counter: u64 = 1;
    loop {
        let candidate = directory.join(file_name(stem, Some(counter), extension));
        if !is_occupied(&candidate) {
            log::debug!(
                "{} already exists; using {}",
                directory.join(file_name(stem, None, extension)).display(),
                candidate.display()
            );
            return candidate;
        }
        counter += 1;
    }
}

fn file_name(stem: &str, counter: Option<u64>, extension: &str) -> String {
    let stem = match counter {
        Some(n) => format!("{stem}-{n}"),
        None => stem.to_string(),
    };
    if extension.is_empty() {
        stem
    } else {
        format!("{stem}.{extension}")
    }
}
