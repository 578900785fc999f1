use std::fs::Permissions;

// The read-only attribute is the closest native equivalent; ACLs are left alone.
pub fn dir_permissions(mut current: Permissions, locked: bool) -> Permissions {
    current.set_readonly(locked);
    current
}
