//! Read, rename, and delete on hydrated entries.

use std::rc::Rc;

use folder_host::{
    ensure_tracked_extension, ChildHandle, DirectoryHandle, FileHandle, HandleError,
    PermissionMode,
};
use tracing::{debug, warn};

use crate::entry::HydratedEntry;
use crate::error::{SessionError, SessionResult};
use crate::permission::ensure_access;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Result of a rename request.
pub enum RenameOutcome {
    /// The entry now carries `new_name`.
    Renamed {
        /// Final name after extension coercion.
        new_name: String,
    },
    /// Empty or identical name; nothing was touched.
    Unchanged,
}

/// Reads the full contents of a file entry.
///
/// # Errors
///
/// Returns [`SessionError::Unsupported`] for directories and the handle error otherwise.
pub async fn read_entry(entry: &HydratedEntry) -> SessionResult<Vec<u8>> {
    match &entry.handle {
        ChildHandle::File(file) => Ok(file.read().await?),
        ChildHandle::Directory(_) => Err(SessionError::Unsupported(format!(
            "`{}` is a directory",
            entry.record.name
        ))),
    }
}

async fn require_write(parent: &Rc<dyn DirectoryHandle>) -> SessionResult<()> {
    if ensure_access(parent.as_ref(), PermissionMode::Readwrite)
        .await
        .is_granted()
    {
        Ok(())
    } else {
        Err(SessionError::Permission(format!(
            "write access to `{}`",
            parent.name()
        )))
    }
}

/// Renames `entry` to `requested`, coercing file names to `extension`.
///
/// Uses native in-place rename when available. Files otherwise fall back to copy, create,
/// write, verify, then remove; directories cannot fall back.
///
/// # Errors
///
/// Returns [`SessionError::Permission`] when write access is refused (nothing changes),
/// [`SessionError::Unsupported`] for a directory without native rename, and
/// [`SessionError::Io`] when the fallback fails or the target name is taken.
pub async fn rename_entry(
    entry: &HydratedEntry,
    requested: &str,
    extension: &str,
) -> SessionResult<RenameOutcome> {
    let current = entry.record.name.as_str();
    let requested = requested.trim();
    if requested.is_empty() || requested == current {
        return Ok(RenameOutcome::Unchanged);
    }
    let new_name = match entry.handle {
        ChildHandle::File(_) => ensure_tracked_extension(requested, extension),
        ChildHandle::Directory(_) => requested.to_string(),
    };
    if new_name == current {
        return Ok(RenameOutcome::Unchanged);
    }

    require_write(&entry.parent).await?;

    if entry.handle.supports_rename() {
        entry.handle.rename(&new_name).await?;
    } else {
        match &entry.handle {
            ChildHandle::File(file) => {
                copy_rename(&entry.parent, file, current, &new_name).await?;
            }
            ChildHandle::Directory(_) => {
                return Err(SessionError::Unsupported(
                    "folder rename is not supported by this host".to_string(),
                ));
            }
        }
    }
    debug!(from = current, to = %new_name, "renamed entry");
    Ok(RenameOutcome::Renamed { new_name })
}

async fn copy_rename(
    parent: &Rc<dyn DirectoryHandle>,
    file: &Rc<dyn FileHandle>,
    old_name: &str,
    new_name: &str,
) -> SessionResult<()> {
    match parent.file(new_name, false).await {
        Ok(_) => {
            return Err(SessionError::Io(format!("`{new_name}` already exists")));
        }
        Err(HandleError::NotFound(_)) => {}
        Err(err) => return Err(err.into()),
    }

    let bytes = file.read().await?;
    let target = parent.file(new_name, true).await?;
    let copied = match target.write(&bytes).await {
        Ok(()) => match target.read().await {
            Ok(written) if written == bytes => Ok(()),
            Ok(_) => Err(SessionError::Io(format!(
                "copy of `{old_name}` did not verify"
            ))),
            Err(err) => Err(err.into()),
        },
        Err(err) => Err(err.into()),
    };
    if let Err(err) = copied {
        if let Err(cleanup) = parent.remove_entry(new_name, false).await {
            warn!(name = new_name, error = %cleanup, "failed to roll back partial copy");
        }
        return Err(err);
    }

    parent.remove_entry(old_name, false).await.map_err(|err| {
        SessionError::Io(format!(
            "copied to `{new_name}` but could not remove `{old_name}`: {err}"
        ))
    })
}

/// Deletes `entry` (recursively for directories) after ensuring write access on its parent.
///
/// # Errors
///
/// Returns [`SessionError::Permission`] when write access is refused and the handle error
/// otherwise.
pub async fn delete_entry(entry: &HydratedEntry) -> SessionResult<()> {
    require_write(&entry.parent).await?;
    entry.parent.remove_entry(&entry.record.name, true).await?;
    debug!(name = %entry.record.name, "deleted entry");
    Ok(())
}
