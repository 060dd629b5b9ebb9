//! Filesystem status checks for watched mount points

use log::error;
use nix::sys::statfs::statfs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::StatusError;

/// Reports whether a mount point's filesystem metadata can be read.
///
/// Called once per watched mount per tick, from a blocking thread.
pub trait StatusCheck: Send + Sync {
    fn check(&self, path: &Path) -> Result<(), StatusError>;
}

impl<T: StatusCheck + ?Sized> StatusCheck for Arc<T> {
    fn check(&self, path: &Path) -> Result<(), StatusError> {
        self.as_ref().check(path)
    }
}

/// Production checker: a plain `statfs(2)` on the mount point
#[derive(Debug, Default, Clone, Copy)]
pub struct StatfsChecker;

impl StatusCheck for StatfsChecker {
    fn check(&self, path: &Path) -> Result<(), StatusError> {
        statfs(path).map(|_| ()).map_err(|errno| StatusError::Statfs {
            path: path.to_path_buf(),
            errno,
        })
    }
}

/// Run `checker` for `path` off the async workers.
///
/// A stale NFS handle can make `statfs` block for a long time, so the call is
/// moved onto tokio's blocking pool. The caller still awaits the result.
pub(crate) async fn check_blocking(
    checker: Arc<dyn StatusCheck>,
    path: PathBuf,
) -> Result<(), StatusError> {
    let task_path = path.clone();
    match tokio::task::spawn_blocking(move || checker.check(&task_path)).await {
        Ok(result) => result,
        Err(e) => {
            error!("❌ Status check task for {} failed: {e}", path.display());
            Err(StatusError::Aborted {
                path,
                reason: e.to_string(),
            })
        }
    }
}
