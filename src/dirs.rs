use regex::Regex;
use std::path::Path;
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::fs::{require_dir, FileSystem};

/// Anchors `pattern` at the start of the name without requiring it to
/// consume the whole name, so `abc` accepts `abcdef`.
fn prefix_regex(pattern: &str) -> Result<Regex> {
    Ok(Regex::new(&format!("^(?:{})", pattern))?)
}

/// Names of the immediate subdirectories of `parent` that are not listed
/// in `excluded`, optionally limited to names matching `pattern` from
/// their first character. Order follows the directory listing.
pub fn invert_dir_list<F, S>(
    fs: &F,
    parent: &Path,
    excluded: &[S],
    pattern: Option<&str>,
) -> Result<Vec<String>>
where
    F: FileSystem + ?Sized,
    S: AsRef<str>,
{
    require_dir(fs, parent)?;
    let matcher = match pattern {
        Some(pattern) if !pattern.is_empty() => Some(prefix_regex(pattern)?),
        _ => None,
    };

    let mut output = Vec::new();
    for entry in fs.read_dir(parent)? {
        if !fs.is_dir(&entry) {
            continue;
        }
        let name = match entry.file_name().map(|name| name.to_str()) {
            Some(Some(name)) => name.to_string(),
            Some(None) => {
                warn!("Skipping non-UTF-8 directory name {}", entry.display());
                continue;
            }
            None => continue,
        };
        if excluded.iter().any(|ex| ex.as_ref() == name) {
            trace!("Excluding {}", name);
            continue;
        }
        if let Some(matcher) = &matcher {
            if !matcher.is_match(&name) {
                continue;
            }
        }
        output.push(name);
    }

    debug!(
        "{} directories under {} outside the exclusion list",
        output.len(),
        parent.display()
    );
    Ok(output)
}
