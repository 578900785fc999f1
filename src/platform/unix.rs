use std::fs::Permissions;
use std::os::unix::fs::PermissionsExt;

/// r-x for owner, group and others.
pub const LOCKED_DIR_BITS: u32 = 0o555;
/// rwx for owner, r-x for group and others.
pub const UNLOCKED_DIR_BITS: u32 = 0o755;

const PERMISSION_MASK: u32 = 0o777;

/// Replaces the rwx bits and keeps setuid/setgid/sticky as they were.
pub fn dir_permissions(current: Permissions, locked: bool) -> Permissions {
    let bits = if locked {
        LOCKED_DIR_BITS
    } else {
        UNLOCKED_DIR_BITS
    };
    Permissions::from_mode((current.mode() & !PERMISSION_MASK) | bits)
}
