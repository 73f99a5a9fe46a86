//! Corpus enumeration
//!
//! Turns configured corpus entries into the ordered list of files the strategies
//! process. An entry is a file path, a directory (all files below it, sorted), or a glob
//! pattern (matching files, sorted). Plain paths are kept even when they do not exist so
//! that the strategies can report them as failed files.

use anyhow::{Context, Result};
use globset::{Glob, GlobMatcher};
use ignore::WalkBuilder;
use std::path::{Component, Path, PathBuf};

/// Resolve corpus entries into files, preserving entry order
pub fn resolve(entries: &[String], follow_symlinks: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in entries {
        if is_glob(entry) {
            let matched = expand_glob(entry, follow_symlinks)?;
            if matched.is_empty() {
                tracing::warn!("Pattern '{}' matched no files", entry);
            }
            files.extend(matched);
            continue;
        }

        let path = PathBuf::from(entry);
        if path.is_dir() {
            files.extend(walk_files(&path, follow_symlinks, None));
        } else {
            files.push(path);
        }
    }

    tracing::debug!("Corpus resolved to {} files", files.len());
    Ok(files)
}

fn is_glob(entry: &str) -> bool {
    entry.contains(['*', '?', '[', '{'])
}

fn expand_glob(pattern: &str, follow_symlinks: bool) -> Result<Vec<PathBuf>> {
    let matcher = Glob::new(pattern)
        .with_context(|| format!("Invalid glob pattern '{pattern}'"))?
        .compile_matcher();
    Ok(walk_files(&glob_root(pattern), follow_symlinks, Some(&matcher)))
}

/// Deepest directory of the pattern that contains no glob syntax
fn glob_root(pattern: &str) -> PathBuf {
    let mut root = PathBuf::new();
    for component in Path::new(pattern).components() {
        if let Component::Normal(part) = component
            && is_glob(&part.to_string_lossy())
        {
            break;
        }
        root.push(component);
    }
    if root.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        root
    }
}

fn walk_files(root: &Path, follow_symlinks: bool, matcher: Option<&GlobMatcher>) -> Vec<PathBuf> {
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(follow_symlinks)
        .build();

    let mut files: Vec<PathBuf> = walker
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Walk error under {}: {}", root.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(|entry| strip_dot_prefix(entry.into_path()))
        .filter(|path| matcher.is_none_or(|m| m.is_match(path)))
        .collect();

    files.sort();
    files
}

/// `./a/b` → `a/b`, so relative globs like `a/*.txt` match walked paths
fn strip_dot_prefix(path: PathBuf) -> PathBuf {
    match path.strip_prefix(".") {
        Ok(stripped) if !stripped.as_os_str().is_empty() => stripped.to_path_buf(),
        _ => path,
    }
}
