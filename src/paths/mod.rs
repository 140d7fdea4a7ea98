//! Path helpers for header lines.
//!
//! Find Results buffers repeat the same long directory prefix on every
//! header. These helpers compute that shared prefix so the noisy part can be
//! folded away or stripped for display.

use std::path::{Component, Path, PathBuf};

/// Removes a prefix from a path if it exists.
///
/// If `path` does not start with `prefix` (component-wise), the original path
/// is returned unchanged.
///
/// # Examples
///
/// ```
/// use std::path::{Component, Path, PathBuf};
/// use better_find_buffer::paths::remove_path_prefix;
///
/// let path = Path::new("/home/user/projects/myrepo/src/main.rs");
/// let result = remove_path_prefix(path, "/home/user/projects/myrepo");
/// assert_eq!(result, PathBuf::from("src/main.rs"));
///
/// let unchanged = remove_path_prefix(path, "/tmp");
/// assert_eq!(unchanged, path);
/// ```
pub fn remove_path_prefix<P: AsRef<Path>, Q: AsRef<Path>>(path: P, prefix: Q) -> PathBuf {
    let path = path.as_ref();
    path.strip_prefix(prefix.as_ref())
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Returns the deepest directory shared by every path, or `None` when the
/// paths share nothing beyond an empty prefix.
///
/// Only whole directories count: the file name of a path is never part of
/// the prefix, so a single path yields its parent directory.
///
/// # Arguments
///
/// * `paths` - Header paths in any order
///
/// # Returns
///
/// The common directory, or `None` for an empty input, disjoint paths, or
/// paths that only share the filesystem root.
pub fn common_dir_prefix<I, P>(paths: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut common: Option<PathBuf> = None;

    for path in paths {
        let path = path.as_ref();
        if let Some(candidate) = common.as_mut() {
            // Shrink until this path lives under the candidate
            while !path.starts_with(&*candidate) || path == candidate.as_path() {
                if !candidate.pop() {
                    break;
                }
            }
        } else {
            common = Some(path.parent().unwrap_or(Path::new("")).to_path_buf());
        }
    }

    // A bare root is not worth collapsing
    common.filter(|prefix| prefix.components().any(|c| matches!(c, Component::Normal(_))))
}

/// Byte length of `prefix` as it appears at the start of `path`, including
/// the separator that follows it.
///
/// Returns `None` when `path` does not start with `prefix` or when nothing
/// would remain after stripping.
pub fn prefix_len_in(path: &str, prefix: &Path) -> Option<usize> {
    let prefix = prefix.to_str()?;
    if prefix.is_empty() || !path.starts_with(prefix) {
        return None;
    }

    let rest = &path[prefix.len()..];
    let separator = rest
        .chars()
        .next()
        .filter(|c| std::path::is_separator(*c))
        .map_or(0, char::len_utf8);

    // A prefix that ends mid-component is not a directory boundary
    if separator == 0 && !prefix.ends_with(std::path::is_separator) {
        return None;
    }

    let len = prefix.len() + separator;
    (len < path.len()).then_some(len)
}
