//! I/O error helpers.
//!
//! Turns raw `io::Error`s from renames into typed [`MoveError`]s and enriches
//! the rest with an actionable hint plus the OS code.
//!
//! Usage:
//!   // in functions returning Result<_, MoveError>
//!   platform::rename_noreplace(src, dest).map_err(|e| rename_error(e, src, dest))?;
//!
//!   // in functions returning io::Result<_>
//!   File::open(p).map_err(io_error_with_help_io("open file", p))?;

use std::io;
use std::path::Path;

use crate::errors::MoveError;

/// Format a human-friendly message with op/path plus platform-aware hints.
pub(crate) fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str("; permission denied, check ownership and write permissions.");
                }
                libc::EXDEV => {
                    msg.push_str("; cross-filesystem, atomic rename not possible.");
                }
                libc::EBUSY => {
                    msg.push_str("; resource busy, ensure no other process holds the file.");
                }
                libc::ENOENT => {
                    msg.push_str("; path not found, it may have been moved by another program.");
                }
                libc::EEXIST | libc::ENOTEMPTY => {
                    msg.push_str("; already exists, remove or rename the target first.");
                }
                libc::ENOSPC => {
                    msg.push_str("; insufficient space on device.");
                }
                libc::EROFS => {
                    msg.push_str("; read-only filesystem, cannot write here.");
                }
                libc::ENAMETOOLONG => {
                    msg.push_str("; filename or path too long.");
                }
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            match code {
                5 => msg.push_str("; access denied, check permissions."), // ERROR_ACCESS_DENIED
                17 => msg.push_str("; not same device, cross-filesystem move."), // ERROR_NOT_SAME_DEVICE
                32 => msg.push_str("; sharing violation, file is in use."), // ERROR_SHARING_VIOLATION
                2 | 3 => msg.push_str("; path not found."), // FILE/PATH NOT FOUND
                80 | 183 => msg.push_str("; already exists, remove or rename the target first."), // FILE_EXISTS / ALREADY_EXISTS
                19 => msg.push_str("; write protected media."), // ERROR_WRITE_PROTECT
                _ => {}
            }
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => {
                msg.push_str("; permission denied, check ownership and write permissions.");
            }
            io::ErrorKind::NotFound => {
                msg.push_str("; path not found, it may have been moved by another program.");
            }
            io::ErrorKind::AlreadyExists => {
                msg.push_str("; already exists, remove or rename the target first.");
            }
            _ => {}
        }
    }

    msg
}

/// EXDEV on Unix, ERROR_NOT_SAME_DEVICE on Windows.
fn is_cross_device(e: &io::Error) -> bool {
    match e.raw_os_error() {
        #[cfg(unix)]
        Some(code) => code == libc::EXDEV,
        #[cfg(windows)]
        Some(code) => code == 17,
        #[cfg(not(any(unix, windows)))]
        Some(_) => false,
        None => false,
    }
}

/// Map a failed rename of `src` -> `dest` onto the [`MoveError`] taxonomy.
pub(crate) fn rename_error(e: io::Error, src: &Path, dest: &Path) -> MoveError {
    if e.kind() == io::ErrorKind::AlreadyExists {
        return MoveError::DestinationExists(dest.to_path_buf());
    }
    if is_cross_device(&e) {
        return MoveError::CrossDevice {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
        };
    }
    if e.kind() == io::ErrorKind::PermissionDenied {
        return MoveError::PermissionDenied {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
        };
    }
    let op = format!("rename to '{}' from", dest.display());
    MoveError::Io {
        message: build_message(&op, src, &e),
        source: e,
    }
}

/// Adapter for io::Result code: enrich the message but keep the original ErrorKind.
pub fn io_error_with_help_io<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), build_message(op, path, &e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_exists_maps_to_destination_exists() {
        let err = rename_error(
            io::Error::from(io::ErrorKind::AlreadyExists),
            Path::new("/src/a.png"),
            Path::new("/left/a.png"),
        );
        assert!(matches!(err, MoveError::DestinationExists(p) if p == Path::new("/left/a.png")));
    }

    #[cfg(unix)]
    #[test]
    fn exdev_maps_to_cross_device() {
        let err = rename_error(
            io::Error::from_raw_os_error(libc::EXDEV),
            Path::new("/src/a.png"),
            Path::new("/mnt/other/a.png"),
        );
        assert_eq!(err.kind(), "cross_device");
    }

    #[cfg(unix)]
    #[test]
    fn eacces_maps_to_permission_denied() {
        let err = rename_error(
            io::Error::from_raw_os_error(libc::EACCES),
            Path::new("/src/a.png"),
            Path::new("/left/a.png"),
        );
        assert_eq!(err.kind(), "permission_denied");
    }

    #[cfg(unix)]
    #[test]
    fn other_errors_carry_hint_and_os_code() {
        let err = rename_error(
            io::Error::from_raw_os_error(libc::EROFS),
            Path::new("/src/a.png"),
            Path::new("/left/a.png"),
        );
        let msg = err.to_string();
        assert!(msg.contains("read-only filesystem"), "msg was: {msg}");
        assert!(msg.contains("os code"), "msg was: {msg}");
    }

    #[test]
    fn io_adapter_keeps_kind() {
        let p = Path::new("/nonexistent/path/for/test");
        let f = io_error_with_help_io("open", p);
        let err = f(io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("path not found"));
    }
}
