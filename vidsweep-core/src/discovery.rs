//! File discovery module for finding files to examine.
//!
//! [`PathCatalog`] walks the input root and yields each directory together
//! with the names of the files directly inside it. The output directory is
//! kept out of the walk so that files produced by an earlier run are not
//! picked up again.
//!
//! The exclusion test is a plain substring check: any directory whose path
//! text contains the output root's path text is pruned along with everything
//! beneath it. That also prunes unrelated directories that merely share the
//! text (an output root of `out` prunes `input/outtakes`), which is the
//! behavior existing setups rely on.

use crate::config::TranscodeConfig;
use crate::error::CoreError;

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, FilterEntry, WalkDir};

/// A directory and the files found directly inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub directory: PathBuf,
    pub file_names: Vec<String>,
}

type DirFilter = Box<dyn FnMut(&DirEntry) -> bool>;

/// Lazy, single-pass walk over the directories of an input tree.
///
/// Directories are visited depth-first in file-name order. Unreadable
/// entries are logged and skipped; the walk itself never fails.
///
/// # Examples
///
/// ```rust,no_run
/// use vidsweep_core::discovery::PathCatalog;
/// use std::path::Path;
///
/// for entry in PathCatalog::new(Path::new("./input"), true, Path::new("./output")) {
///     println!("{}: {} file(s)", entry.directory.display(), entry.file_names.len());
/// }
/// ```
pub struct PathCatalog {
    walker: FilterEntry<walkdir::IntoIter, DirFilter>,
}

impl PathCatalog {
    /// Starts a walk at `root`.
    ///
    /// With `recursive` unset only `root` itself is yielded.
    pub fn new(root: &Path, recursive: bool, output_root: &Path) -> Self {
        let max_depth = if recursive { usize::MAX } else { 0 };
        let excluded = output_root.to_string_lossy().into_owned();

        // The root may be a symlink to a directory; walkdir reports its own
        // type for depth 0, so the link is followed here.
        let filter: DirFilter = Box::new(move |entry: &DirEntry| {
            let is_dir = if entry.depth() == 0 {
                entry.path().is_dir()
            } else {
                entry.file_type().is_dir()
            };
            is_dir && !is_excluded(entry.path(), &excluded)
        });

        let walker = WalkDir::new(root)
            .min_depth(0)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(filter);

        Self { walker }
    }

    /// Starts the walk described by a configuration's input root, recursion
    /// flag, and output root.
    pub fn for_config(config: &TranscodeConfig) -> Self {
        Self::new(config.input_dir(), config.recursive(), config.output_dir())
    }
}

impl Iterator for PathCatalog {
    type Item = CatalogEntry;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("Skipping unreadable directory entry: {}", CoreError::from(err));
                    continue;
                }
            };

            let directory = entry.into_path();
            match list_files(&directory) {
                Ok(file_names) => {
                    log::debug!(
                        "Catalogued {} file(s) in {}",
                        file_names.len(),
                        directory.display()
                    );
                    return Some(CatalogEntry {
                        directory,
                        file_names,
                    });
                }
                Err(err) => {
                    log::warn!("Failed to list {}: {err}", directory.display());
                }
            }
        }
    }
}

/// Substring containment test used to keep the output tree out of the walk.
fn is_excluded(path: &Path, excluded: &str) -> bool {
    !excluded.is_empty() && path.to_string_lossy().contains(excluded)
}

/// Names of the non-directory entries directly inside `directory`, sorted.
fn list_files(directory: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        if entry.path().is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => {
                log::warn!(
                    "Skipping file with non UTF-8 name in {}: {:?}",
                    directory.display(),
                    raw
                );
            }
        }
    }
    names.sort();
    Ok(names)
}
