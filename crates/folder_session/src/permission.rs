//! Permission negotiation over directory capabilities.

use folder_host::{DirectoryHandle, PermissionMode, PermissionState};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Outcome of a permission negotiation.
pub enum Access {
    /// The capability may be used in the requested mode.
    Granted,
    /// Access was refused or could not be established.
    Denied,
}

impl Access {
    /// Returns `true` for [`Access::Granted`].
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }

    fn from_state(state: PermissionState) -> Self {
        if state.is_granted() {
            Self::Granted
        } else {
            Self::Denied
        }
    }
}

/// Non-interactive check; never prompts.
pub async fn has_access(dir: &dyn DirectoryHandle, mode: PermissionMode) -> Access {
    match dir.query_permission(mode).await {
        Ok(state) => Access::from_state(state),
        Err(err) => {
            debug!(mode = mode.as_str(), error = %err, "permission query failed");
            Access::Denied
        }
    }
}

/// Ensures `mode` access on `dir`, prompting only when the non-interactive query is not
/// already granted.
///
/// When the interactive request itself fails (no surface can host the prompt), the answer of
/// a second non-interactive query is accepted. Never fails; errors collapse to
/// [`Access::Denied`].
pub async fn ensure_access(dir: &dyn DirectoryHandle, mode: PermissionMode) -> Access {
    if has_access(dir, mode).await.is_granted() {
        return Access::Granted;
    }
    match dir.request_permission(mode).await {
        Ok(state) => Access::from_state(state),
        Err(err) => {
            warn!(
                mode = mode.as_str(),
                folder = %dir.name(),
                error = %err,
                "permission request failed; falling back to query"
            );
            has_access(dir, mode).await
        }
    }
}

#[cfg(test)]
mod tests {
    use folder_host::{MemoryDirectory, PromptBehavior};
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn granted_query_skips_the_prompt() {
        let root = MemoryDirectory::new("Papers");
        assert_eq!(
            block_on(ensure_access(&root, PermissionMode::Read)),
            Access::Granted
        );
        assert!(root.access().requests().is_empty());
    }

    #[test]
    fn prompt_grant_and_deny_are_reported() {
        let root = MemoryDirectory::new("Papers");
        let access = root.access();
        access.revoke_all();

        access.set_prompt(PromptBehavior::Deny);
        assert_eq!(
            block_on(ensure_access(&root, PermissionMode::Readwrite)),
            Access::Denied
        );

        access.set_prompt(PromptBehavior::Grant);
        assert_eq!(
            block_on(ensure_access(&root, PermissionMode::Readwrite)),
            Access::Granted
        );
        assert_eq!(
            access.requests(),
            vec![PermissionMode::Readwrite, PermissionMode::Readwrite]
        );
    }

    #[test]
    fn failed_request_falls_back_to_query() {
        let root = MemoryDirectory::new("Papers");
        let access = root.access();
        access.set_permission(PermissionMode::Readwrite, PermissionState::Prompt);
        access.set_prompt(PromptBehavior::Unavailable);

        assert_eq!(
            block_on(ensure_access(&root, PermissionMode::Readwrite)),
            Access::Denied
        );
        assert_eq!(access.requests(), vec![PermissionMode::Readwrite]);
    }

    #[test]
    fn failed_request_accepts_a_grant_found_by_the_fallback_query() {
        let root = MemoryDirectory::new("Papers");
        let access = root.access();
        access.revoke_all();
        access.set_prompt(PromptBehavior::GrantedElsewhere);

        assert_eq!(
            block_on(ensure_access(&root, PermissionMode::Readwrite)),
            Access::Granted
        );
        assert_eq!(access.requests(), vec![PermissionMode::Readwrite]);
        assert_eq!(
            block_on(root.query_permission(PermissionMode::Readwrite)).expect("query"),
            PermissionState::Granted
        );
    }

    #[test]
    fn negotiation_is_idempotent() {
        let root = MemoryDirectory::new("Papers");
        root.access().revoke_all();
        let first = block_on(ensure_access(&root, PermissionMode::Read));
        let second = block_on(ensure_access(&root, PermissionMode::Read));
        assert_eq!(first, second);
        assert_eq!(root.access().requests().len(), 1);
    }
}
