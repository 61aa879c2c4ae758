//! Default values for mergerfs-fsck.
//!
//! This module centralizes the attribute names and other constants shared by
//! the library and the binary, ensuring consistency and avoiding duplication.

/// Extended attribute listing every branch path behind a logical path.
///
/// The value is a NUL-separated list of absolute paths, in branch priority
/// order.
pub const ALLPATHS_XATTR: &str = "user.mergerfs.allpaths";

/// Extended attribute whose presence identifies a path inside a mergerfs
/// mount. Only ever checked on the starting directory.
pub const FULLPATH_XATTR: &str = "user.mergerfs.fullpath";

/// Environment variable that supplies a default for `--fix`.
pub const FIX_ENV: &str = "MERGERFS_FSCK_FIX";

/// Log level used when neither `--log-level` nor `RUST_LOG` is given.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Mask selecting the permission bits (including setuid, setgid and sticky)
/// of an `st_mode` value.
pub const PERMISSION_BITS: u32 = 0o7777;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_names_live_in_user_namespace() {
        assert!(ALLPATHS_XATTR.starts_with("user.mergerfs."));
        assert!(FULLPATH_XATTR.starts_with("user.mergerfs."));
        assert_ne!(ALLPATHS_XATTR, FULLPATH_XATTR);
    }

    #[test]
    fn test_permission_mask_strips_file_type() {
        assert_eq!(0o100644 & PERMISSION_BITS, 0o644);
        assert_eq!(0o041777 & PERMISSION_BITS, 0o1777);
    }
}
