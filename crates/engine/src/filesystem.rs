use crate::config::{SuffixSet, WalkOptions};
use crate::error::{EngineError, Result};
use ignore::{DirEntry, WalkBuilder};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What the walk found at one position in the tree.
#[derive(Debug)]
pub enum WalkItem {
    /// A regular file whose name ends with an accepted suffix.
    Candidate(PathBuf),
    /// A regular file rejected by the suffix set.
    Skipped(PathBuf),
    /// An entry below the root that could not be listed.
    Error(ignore::Error),
}

/// Check that `root` is a traversable directory and return its absolute form.
///
/// Symlinks are not resolved, so banner paths keep the spelling the caller used.
///
/// # Errors
/// Returns [`EngineError::Traversal`] when the root is missing, is not a
/// directory, or cannot be listed.
pub fn validate_root(root: &Path) -> Result<PathBuf> {
    let traversal = |source: io::Error| EngineError::Traversal {
        root: root.to_path_buf(),
        source,
    };

    if root.to_string_lossy().contains('\0') {
        return Err(traversal(io::Error::new(
            io::ErrorKind::InvalidInput,
            "path contains null bytes",
        )));
    }

    let absolute = std::path::absolute(root).map_err(traversal)?;
    let meta = fs::metadata(&absolute).map_err(traversal)?;
    if !meta.is_dir() {
        return Err(traversal(io::Error::new(
            io::ErrorKind::NotADirectory,
            "not a directory",
        )));
    }

    // metadata() succeeds on directories we may not list.
    fs::read_dir(&absolute).map_err(traversal)?;

    Ok(absolute)
}

/// Sequential recursive walk below `root`.
///
/// Siblings are visited in file-name order so repeated runs over an unchanged
/// tree produce identical output. Directories are never yielded.
///
/// # Errors
/// Returns [`EngineError::Config`] if an exclude glob is invalid.
pub fn walk<'a>(
    root: &Path,
    options: &WalkOptions,
    suffixes: &'a SuffixSet,
) -> Result<impl Iterator<Item = WalkItem> + use<'a>> {
    let mut builder = WalkBuilder::new(root);

    builder
        .standard_filters(false)
        .hidden(!options.hidden)
        .git_ignore(options.git_ignore)
        .require_git(false)
        .follow_links(options.follow_links)
        .max_depth(options.max_depth)
        .sort_by_file_name(|a, b| a.cmp(b));

    // Exclude globs use the `!` prefix convention of ignore overrides.
    if !options.exclude.is_empty() {
        let mut ov_builder = ignore::overrides::OverrideBuilder::new(root);
        for pattern in &options.exclude {
            ov_builder.add(&format!("!{pattern}")).map_err(|e| {
                EngineError::Config(format!("Invalid exclude pattern '{pattern}': {e}"))
            })?;
        }
        let overrides = ov_builder
            .build()
            .map_err(|e| EngineError::Config(format!("Invalid exclude patterns: {e}")))?;
        builder.overrides(overrides);
    }

    Ok(builder
        .build()
        .filter_map(move |entry| classify(entry, suffixes)))
}

fn classify(
    entry: std::result::Result<DirEntry, ignore::Error>,
    suffixes: &SuffixSet,
) -> Option<WalkItem> {
    let entry = match entry {
        Ok(entry) => entry,
        Err(err) => return Some(WalkItem::Error(err)),
    };

    if !is_file_like(&entry) {
        return None;
    }

    let path = entry.into_path();
    let matched = path.file_name().is_some_and(|name| suffixes.matches_os(name));
    Some(if matched {
        WalkItem::Candidate(path)
    } else {
        WalkItem::Skipped(path)
    })
}

/// Regular files, plus unfollowed symlinks that resolve to a regular file.
///
/// Links to FIFOs, sockets or devices are dropped since reading them may
/// block. Dangling links are kept so that reading them reports a failure.
fn is_file_like(entry: &DirEntry) -> bool {
    match entry.file_type() {
        Some(ft) if ft.is_file() => true,
        Some(ft) if ft.is_symlink() => match fs::metadata(entry.path()) {
            Ok(meta) => meta.is_file(),
            Err(_) => true,
        },
        _ => false,
    }
}

/// Best-effort path for a walk error, falling back to `root`.
#[must_use]
pub fn walk_error_path(err: &ignore::Error, root: &Path) -> PathBuf {
    fn find(err: &ignore::Error) -> Option<&Path> {
        match err {
            ignore::Error::WithPath { path, .. } => Some(path.as_path()),
            ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
                find(err)
            }
            ignore::Error::Loop { child, .. } => Some(child.as_path()),
            _ => None,
        }
    }
    find(err).map_or_else(|| root.to_path_buf(), Path::to_path_buf)
}
