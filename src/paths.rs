use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::platform;

/// Rewrites a forward-slash path in the host's native form. Leading
/// slashes are dropped, so the result is always relative. The filesystem
/// is not consulted.
pub fn convert_unix_path_to_os_path(path: &str) -> Result<PathBuf> {
    let stripped = path.trim_start_matches('/');
    if stripped.is_empty() {
        return Err(Error::invalid(format!(
            "path has no segments to convert: {:?}",
            path
        )));
    }
    Ok(platform::join_segments(stripped.split('/')))
}
