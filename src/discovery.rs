//! Markdown file discovery.
//!
//! Inputs may be files, directories or glob patterns:
//! - Files are taken as given, whatever their extension
//! - Directories are walked recursively for `.md` and `.markdown` files,
//!   skipping hidden entries such as `.git`
//! - Patterns containing `*`, `?`, `[` or `{` are matched with globset against
//!   every file beneath their literal prefix
//!
//! Exclude globs apply to everything. The result is sorted and de-duplicated.

use crate::error::{MdschemaError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// File extensions treated as Markdown when walking directories.
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Resolve `inputs` to a sorted, de-duplicated list of files.
pub fn find_markdown_files(inputs: &[PathBuf], excludes: &[String]) -> Result<Vec<PathBuf>> {
    let excluded = build_globset(excludes, "--exclude")?;
    let mut files = BTreeSet::new();

    for input in inputs {
        let text = input.to_string_lossy();
        if is_glob(&text) {
            let pattern = build_globset(&[text.to_string()], "path")?;
            let base = literal_prefix(input);
            let mut found = Vec::new();
            walk(&base, &mut found)?;
            files.extend(
                found
                    .into_iter()
                    .map(|p| normalize_path(&p))
                    .filter(|p| pattern.is_match(p)),
            );
        } else if input.is_dir() {
            let mut found = Vec::new();
            walk(input, &mut found)?;
            files.extend(
                found
                    .into_iter()
                    .filter(|p| is_markdown(p))
                    .map(|p| normalize_path(&p)),
            );
        } else if input.is_file() {
            files.insert(normalize_path(input));
        } else {
            return Err(MdschemaError::UserError(format!(
                "path not found: '{}'",
                input.display()
            )));
        }
    }

    let files: Vec<PathBuf> = files
        .into_iter()
        .filter(|p| !excluded.is_match(p))
        .map(PathBuf::from)
        .collect();
    debug!(count = files.len(), "discovered files");
    Ok(files)
}

/// Whether `path` has a Markdown extension (case-insensitive).
pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|m| m.eq_ignore_ascii_case(ext))
        })
}

fn is_glob(text: &str) -> bool {
    text.contains(['*', '?', '[', '{'])
}

/// Leading path components that contain no glob metacharacters.
fn literal_prefix(pattern: &Path) -> PathBuf {
    let prefix: PathBuf = pattern
        .components()
        .take_while(|c| !is_glob(&c.as_os_str().to_string_lossy()))
        .collect();
    if prefix.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        prefix
    }
}

/// Forward slashes, no leading `./`.
fn normalize_path(path: &Path) -> String {
    let normalized: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    normalized.to_string_lossy().replace('\\', "/")
}

/// Collect every non-hidden file beneath `dir`.
fn walk(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }

    let entries = fs::read_dir(dir).map_err(|e| {
        MdschemaError::IoError(format!(
            "failed to read directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| {
            MdschemaError::IoError(format!(
                "failed to read entry in '{}': {}",
                dir.display(),
                e
            ))
        })?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.path();
        if path.is_dir() {
            walk(&path, out)?;
        } else {
            out.push(path);
        }
    }

    Ok(())
}

fn build_globset(patterns: &[String], field_name: &str) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    for pattern in patterns {
        let normalized = normalize_path(Path::new(pattern));
        let glob = Glob::new(&normalized).map_err(|e| {
            MdschemaError::UserError(format!(
                "invalid glob pattern in {}: '{}' - {}",
                field_name, pattern, e
            ))
        })?;
        builder.add(glob);
    }

    builder.build().map_err(|e| {
        MdschemaError::UserError(format!("failed to compile {} globs: {}", field_name, e))
    })
}
