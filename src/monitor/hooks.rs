//! Replaceable staleness predicate and remount action.
//!
//! Both live behind their own lock so they can be swapped while the watch
//! loop is running. The loop clones the current `Arc` out and releases the
//! lock before calling it.

use futures::FutureExt;
use futures::future::BoxFuture;
use log::debug;
use nix::errno::Errno;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{RemountError, StatusError};
use crate::types::Mount;

/// Decides whether a failed status check means the mount needs a remount
pub type ErrCondition = Arc<dyn Fn(&StatusError) -> bool + Send + Sync>;

pub type RemountFuture = BoxFuture<'static, Result<(), RemountError>>;

/// Recovery action for one stale mount
pub type RemountAction = Arc<dyn Fn(Mount) -> RemountFuture + Send + Sync>;

/// Default error condition: a stale NFS file handle.
///
/// Both the errno and the "NFS" text are required since `ESTALE` is also
/// returned by other filesystems (FUSE, overlay). The text is matched against
/// [`StatusError::description`] only, never the mount path, and breaks if
/// that wording changes.
pub fn is_stale_nfs(err: &StatusError) -> bool {
    err.errno() == Some(Errno::ESTALE) && err.description().contains("NFS")
}

/// Wrap an async closure as a [`RemountAction`]
pub fn remount_action<F, Fut>(f: F) -> RemountAction
where
    F: Fn(Mount) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), RemountError>> + Send + 'static,
{
    Arc::new(move |mount| f(mount).boxed())
}

pub(crate) struct Hooks {
    err_condition: RwLock<ErrCondition>,
    remount: RwLock<Option<RemountAction>>,
}

impl Hooks {
    pub fn new() -> Self {
        let condition: ErrCondition = Arc::new(is_stale_nfs);
        Self {
            err_condition: RwLock::new(condition),
            remount: RwLock::new(None),
        }
    }

    pub async fn set_err_condition(&self, condition: ErrCondition) {
        *self.err_condition.write().await = condition;
        debug!("🔧 Error condition replaced");
    }

    pub async fn reset_err_condition(&self) {
        let condition: ErrCondition = Arc::new(is_stale_nfs);
        *self.err_condition.write().await = condition;
        debug!("🔧 Error condition reset to stale NFS handle check");
    }

    pub async fn err_condition(&self) -> ErrCondition {
        self.err_condition.read().await.clone()
    }

    pub async fn set_remount(&self, action: Option<RemountAction>) {
        let is_set = action.is_some();
        *self.remount.write().await = action;
        debug!(
            "🔧 Remount action {}",
            if is_set { "set" } else { "cleared" }
        );
    }

    pub async fn remount(&self) -> Option<RemountAction> {
        self.remount.read().await.clone()
    }

    /// Evaluate the current error condition against `err`
    pub async fn is_stale(&self, err: &StatusError) -> bool {
        let condition = self.err_condition().await;
        condition(err)
    }
}
