use log::debug;
use std::path::Path;
use tokio::sync::RwLock;

use crate::types::Mount;

/// Ordered set of watched mounts, keyed by destination path
#[derive(Debug, Default)]
pub struct MountRegistry {
    mounts: RwLock<Vec<Mount>>,
}

impl MountRegistry {
    pub fn new() -> Self {
        Self {
            mounts: RwLock::new(Vec::new()),
        }
    }

    /// Add a mount, or replace the one already registered at the same destination
    pub async fn watch(&self, mount: Mount) {
        let mut mounts = self.mounts.write().await;
        if let Some(existing) = mounts.iter_mut().find(|m| m.same_dest(&mount)) {
            debug!("🔄 Updating watched mount: {mount}");
            *existing = mount;
        } else {
            debug!("➕ Watching mount: {mount}");
            mounts.push(mount);
        }
    }

    /// Stop watching the mount at `mount.dest_path`. Unknown paths are ignored.
    pub async fn unwatch(&self, mount: &Mount) {
        let mut mounts = self.mounts.write().await;
        let len_before = mounts.len();
        mounts.retain(|m| !m.same_dest(mount));
        if mounts.len() < len_before {
            debug!("➖ Unwatched mount at {}", mount.dest_path.display());
        }
    }

    /// Copy of the current mounts, in registration order
    pub async fn snapshot(&self) -> Vec<Mount> {
        self.mounts.read().await.clone()
    }

    pub async fn get(&self, dest_path: &Path) -> Option<Mount> {
        let mounts = self.mounts.read().await;
        mounts.iter().find(|m| m.dest_path == dest_path).cloned()
    }

    pub async fn len(&self) -> usize {
        self.mounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.mounts.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.mounts.write().await.clear();
    }
}
