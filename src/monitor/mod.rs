//! Mount monitor: the registry of watched mounts, the staleness/remount
//! hooks and the watch loop that ties them together.

pub mod hooks;
pub mod registry;
pub mod status;
pub mod watcher;

use std::future::Future;
use std::sync::Arc;

use crate::error::{RemountError, StatusError};
use crate::types::Mount;
use hooks::{Hooks, RemountAction};
use registry::MountRegistry;
use status::{StatfsChecker, StatusCheck};

pub use watcher::TickReport;

/// Watches a set of NFS mounts and remounts the ones that go stale.
///
/// Owned by the embedding application. Mounts and hooks can be changed at any
/// time, including while [`NfsMonitor::run`] is looping on another task.
pub struct NfsMonitor {
    registry: MountRegistry,
    hooks: Hooks,
    checker: Arc<dyn StatusCheck>,
}

impl Default for NfsMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl NfsMonitor {
    /// Monitor using `statfs(2)` to check mount points
    pub fn new() -> Self {
        Self::with_checker(StatfsChecker)
    }

    pub fn with_checker(checker: impl StatusCheck + 'static) -> Self {
        Self {
            registry: MountRegistry::new(),
            hooks: Hooks::new(),
            checker: Arc::new(checker),
        }
    }

    pub fn registry(&self) -> &MountRegistry {
        &self.registry
    }

    /// Add a mount to watch, replacing any mount at the same destination
    pub async fn watch_mount(&self, mount: Mount) {
        self.registry.watch(mount).await;
    }

    /// Stop watching the mount with the same destination as `mount`
    pub async fn unwatch_mount(&self, mount: &Mount) {
        self.registry.unwatch(mount).await;
    }

    pub async fn mounts(&self) -> Vec<Mount> {
        self.registry.snapshot().await
    }

    /// Replace the check deciding which status errors trigger a remount.
    /// Takes effect from the next status check.
    pub async fn set_err_condition<F>(&self, condition: F)
    where
        F: Fn(&StatusError) -> bool + Send + Sync + 'static,
    {
        self.hooks.set_err_condition(Arc::new(condition)).await;
    }

    /// Go back to only remounting on stale NFS file handles
    pub async fn reset_err_condition(&self) {
        self.hooks.reset_err_condition().await;
    }

    /// Set the action called to recover a stale mount
    pub async fn set_remount_action<F, Fut>(&self, action: F)
    where
        F: Fn(Mount) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), RemountError>> + Send + 'static,
    {
        self.hooks.set_remount(Some(hooks::remount_action(action))).await;
    }

    /// Set an already boxed remount action, e.g. from [`crate::remount::MountCommand::into_action`]
    pub async fn set_boxed_remount_action(&self, action: RemountAction) {
        self.hooks.set_remount(Some(action)).await;
    }

    /// Unset the remount action; stale mounts are then only detected
    pub async fn clear_remount_action(&self) {
        self.hooks.set_remount(None).await;
    }

    pub async fn has_remount_action(&self) -> bool {
        self.hooks.remount().await.is_some()
    }
}
