//! Moving images in and out of the destination directories.
//! Every move is a single no-clobber rename: it either happens completely or
//! leaves the source untouched. There is no copy fallback.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::errors::MoveError;
use crate::platform::rename_noreplace;
use crate::shutdown;

use super::helpers::rename_error;

/// The move primitive the triage engine drives.
pub trait FileMover {
    /// Move `src` into `dest_dir`, keeping its file name. Returns the new path.
    fn move_to(&self, src: &Path, dest_dir: &Path) -> Result<PathBuf, MoveError>;

    /// Put a previously moved file back at `src_path`.
    fn move_back(&self, dest_path: &Path, src_path: &Path) -> Result<(), MoveError>;
}

/// `dest_dir/basename(src)`.
pub fn destination_for(src: &Path, dest_dir: &Path) -> Result<PathBuf, MoveError> {
    let file_name = src
        .file_name()
        .ok_or_else(|| MoveError::MissingFileName(src.to_path_buf()))?;
    Ok(dest_dir.join(file_name))
}

/// Persist a rename by syncing its directory. Windows has no directory handle
/// to sync, so this is a no-op there.
fn sync_dir(dir: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        std::fs::File::open(dir)?.sync_all()
    }
    #[cfg(not(unix))]
    {
        let _ = dir;
        Ok(())
    }
}

/// Real mover backed by an atomic rename.
#[derive(Debug, Default, Clone, Copy)]
pub struct RenameMover;

impl RenameMover {
    fn rename(&self, src: &Path, dest: &Path) -> Result<(), MoveError> {
        if shutdown::is_requested() {
            return Err(MoveError::Interrupted(src.to_path_buf()));
        }
        rename_noreplace(src, dest).map_err(|e| rename_error(e, src, dest))?;

        if let Some(parent) = dest.parent()
            && let Err(e) = sync_dir(parent)
        {
            debug!(dir = %parent.display(), error = %e, "fsync after rename failed");
        }
        Ok(())
    }
}

impl FileMover for RenameMover {
    fn move_to(&self, src: &Path, dest_dir: &Path) -> Result<PathBuf, MoveError> {
        let dest = destination_for(src, dest_dir)?;
        match self.rename(src, &dest) {
            Ok(()) => {
                info!(src = %src.display(), dest = %dest.display(), "Moved");
                Ok(dest)
            }
            Err(e) => {
                warn!(kind = e.kind(), error = %e, "Move failed; file left in place");
                Err(e)
            }
        }
    }

    fn move_back(&self, dest_path: &Path, src_path: &Path) -> Result<(), MoveError> {
        match self.rename(dest_path, src_path) {
            Ok(()) => {
                info!(from = %dest_path.display(), restored = %src_path.display(), "Undo: restored");
                Ok(())
            }
            Err(e) => {
                warn!(kind = e.kind(), error = %e, "Undo move failed");
                Err(e)
            }
        }
    }
}

/// Mover that only reports what it would do. Destination collisions are still
/// detected so a dry run surfaces the same rejections as a real one.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunMover;

impl FileMover for DryRunMover {
    fn move_to(&self, src: &Path, dest_dir: &Path) -> Result<PathBuf, MoveError> {
        let dest = destination_for(src, dest_dir)?;
        if dest.symlink_metadata().is_ok() {
            return Err(MoveError::DestinationExists(dest));
        }
        info!(src = %src.display(), dest = %dest.display(), "dry-run: would move file");
        Ok(dest)
    }

    fn move_back(&self, dest_path: &Path, src_path: &Path) -> Result<(), MoveError> {
        info!(from = %dest_path.display(), to = %src_path.display(), "dry-run: would restore file");
        Ok(())
    }
}

impl<M: FileMover + ?Sized> FileMover for Box<M> {
    fn move_to(&self, src: &Path, dest_dir: &Path) -> Result<PathBuf, MoveError> {
        (**self).move_to(src, dest_dir)
    }

    fn move_back(&self, dest_path: &Path, src_path: &Path) -> Result<(), MoveError> {
        (**self).move_back(dest_path, src_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn move_to_and_back() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src_dir = temp.child("src");
        let left = temp.child("left");
        src_dir.create_dir_all().unwrap();
        left.create_dir_all().unwrap();
        let img = src_dir.child("a.png");
        img.write_str("pixels").unwrap();

        let dest = RenameMover.move_to(img.path(), left.path()).unwrap();
        assert_eq!(dest, left.path().join("a.png"));
        assert!(!img.path().exists());
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "pixels");

        RenameMover.move_back(&dest, img.path()).unwrap();
        assert!(img.path().exists());
        assert!(!dest.exists());
    }

    #[test]
    fn move_to_refuses_collision_and_keeps_source() {
        let temp = assert_fs::TempDir::new().unwrap();
        let left = temp.child("left");
        left.create_dir_all().unwrap();
        left.child("a.png").write_str("already here").unwrap();
        let img = temp.child("a.png");
        img.write_str("incoming").unwrap();

        let err = RenameMover.move_to(img.path(), left.path()).unwrap_err();
        assert!(matches!(err, MoveError::DestinationExists(_)));
        assert_eq!(std::fs::read_to_string(img.path()).unwrap(), "incoming");
        assert_eq!(
            std::fs::read_to_string(left.child("a.png").path()).unwrap(),
            "already here"
        );
    }

    #[test]
    fn move_back_refuses_to_overwrite_source() {
        let temp = assert_fs::TempDir::new().unwrap();
        let moved = temp.child("left_a.png");
        moved.write_str("moved").unwrap();
        let original = temp.child("a.png");
        original.write_str("newcomer").unwrap();

        let err = RenameMover.move_back(moved.path(), original.path()).unwrap_err();
        assert!(matches!(err, MoveError::DestinationExists(_)));
        assert!(moved.path().exists());
    }

    #[test]
    fn missing_destination_dir_is_an_io_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let img = temp.child("a.png");
        img.write_str("x").unwrap();
        let err = RenameMover
            .move_to(img.path(), &temp.path().join("missing"))
            .unwrap_err();
        assert_eq!(err.kind(), "io");
        assert!(img.path().exists());
    }

    #[test]
    fn dry_run_touches_nothing() {
        let temp = assert_fs::TempDir::new().unwrap();
        let left = temp.child("left");
        left.create_dir_all().unwrap();
        let img = temp.child("a.png");
        img.write_str("x").unwrap();

        let dest = DryRunMover.move_to(img.path(), left.path()).unwrap();
        assert_eq!(dest, left.path().join("a.png"));
        assert!(img.path().exists());
        assert!(!dest.exists());
        DryRunMover.move_back(&dest, img.path()).unwrap();
        assert!(img.path().exists());
    }
}
