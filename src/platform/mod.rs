//! Platform-specific helpers.
//! This module hides OS differences (Unix/Windows) behind a uniform API so
//! the rest of the codebase can remain platform-agnostic.

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use unix::{open_log_file_secure_append, rename_noreplace, write_config_secure_new_0600};

#[cfg(windows)]
pub use windows::{open_log_file_secure_append, rename_noreplace, write_config_secure_new_0600};
