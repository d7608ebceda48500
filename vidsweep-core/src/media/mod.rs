//! Per-file data carried through the engine.
//!
//! A [`FileTask`] describes one discovered file. The probe fills in a
//! [`CodecProfile`] for it, and the necessity engine derives a
//! [`StreamActionPlan`] from that profile.

pub mod info;

pub use info::{CodecProfile, StreamAction, StreamActionPlan};

use std::path::{Path, PathBuf};

/// One discovered file, split into the pieces the engine works with.
///
/// Created once per file and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    directory: PathBuf,
    base_name: String,
    extension: String,
    source_path: PathBuf,
}

impl FileTask {
    /// Builds a task for `file_name` inside `directory`.
    ///
    /// The extension is the text after the last `.`, lowercased. A name
    /// without any dot keeps the whole name as its base name and gets an
    /// empty extension.
    pub fn new(directory: impl Into<PathBuf>, file_name: &str) -> Self {
        let directory = directory.into();
        let (base_name, extension) = split_file_name(file_name);
        let source_path = directory.join(file_name);
        Self {
            directory,
            base_name,
            extension,
            source_path,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File name without its final extension (`"my.movie"` for `my.movie.mkv`).
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Lowercased extension without the dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }
}

/// Splits `name.ext` into `("name", "ext")`, lowercasing the extension.
pub fn split_file_name(file_name: &str) -> (String, String) {
    match file_name.rsplit_once('.') {
        Some((base, extension)) => (base.to_string(), extension.to_lowercase()),
        None => (file_name.to_string(), String::new()),
    }
}
