//! Page path handling.
//!
//! Pages are addressed by a slash-separated prefix relative to the
//! repository root (`notes/todo`). On disk every page is a markdown file,
//! so the prefix is normalized to end in `.md` before it is read or written.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use unicode_normalization::UnicodeNormalization;

/// File extension carried by every page.
pub const MD_EXTENSION: &str = ".md";

/// Reasons why a page prefix can not be accepted as a path in the wiki.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PagePathError {
    EmptyPath,
    AbsolutePath,
    TrailingSlash,
    DuplicateSlash,
    ContainsNull,
    RelativeSegment,
    DotGit,
}

impl fmt::Display for PagePathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            PagePathError::EmptyPath => "page path is empty",
            PagePathError::AbsolutePath => "page path must be relative to the repository",
            PagePathError::TrailingSlash => "page path ends with '/'",
            PagePathError::DuplicateSlash => "page path contains '//'",
            PagePathError::ContainsNull => "page path contains a NUL byte",
            PagePathError::RelativeSegment => "page path contains a '.' or '..' segment",
            PagePathError::DotGit => "page path points into the .git directory",
        };
        f.write_str(reason)
    }
}

impl std::error::Error for PagePathError {}

/// Validate a page prefix and return its repository-relative markdown path.
///
/// The prefix is NFC-normalized first so that the same title typed on
/// different platforms maps to the same file. `.md` is appended unless the
/// prefix already ends with it.
pub fn ensure_md_path(prefix: &str) -> Result<String, PagePathError> {
    let normalized: String = prefix.nfc().collect();
    check_path(&normalized)?;

    if normalized.ends_with(MD_EXTENSION) {
        Ok(normalized)
    } else {
        Ok(format!("{}{}", normalized, MD_EXTENSION))
    }
}

/// Resolve a page prefix to an absolute path under `repo`.
pub fn resolve(repo: &Path, prefix: &str) -> Result<PathBuf, PagePathError> {
    Ok(repo.join(ensure_md_path(prefix)?))
}

/// Create every missing parent directory of `file`.
pub fn ensure_dir_exists(file: &Path) -> io::Result<()> {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Report whether anything exists at `path`.
///
/// Unlike `Path::exists`, permission errors are surfaced instead of being
/// reported as absence.
pub fn exists(path: &Path) -> io::Result<bool> {
    match fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

fn check_path(path: &str) -> Result<(), PagePathError> {
    if path.is_empty() {
        Err(PagePathError::EmptyPath)
    } else if path.starts_with('/') || path.starts_with('\\') {
        Err(PagePathError::AbsolutePath)
    } else if path.ends_with('/') {
        Err(PagePathError::TrailingSlash)
    } else {
        for segment in path.split('/') {
            match check_segment(segment) {
                Err(PagePathError::EmptyPath) => Err(PagePathError::DuplicateSlash),
                x => x,
            }?;
        }
        Ok(())
    }
}

fn check_segment(segment: &str) -> Result<(), PagePathError> {
    if segment.is_empty() {
        Err(PagePathError::EmptyPath)
    } else if segment.contains('\0') {
        Err(PagePathError::ContainsNull)
    } else if segment == "." || segment == ".." {
        Err(PagePathError::RelativeSegment)
    } else if segment.eq_ignore_ascii_case(".git") {
        Err(PagePathError::DotGit)
    } else {
        Ok(())
    }
}
