//! Filesystem operations: scanning the source directory and moving images.

mod helpers;
mod mover;
mod scan;

pub use helpers::io_error_with_help_io;
pub use mover::{DryRunMover, FileMover, RenameMover, destination_for};
pub use scan::{IMAGE_EXTENSIONS, is_image_name, scan_images};
