//! Remount action backed by the system `mount`/`umount` binaries.
//!
//! The monitor itself only calls whatever action it is given; this is a
//! ready-made one for hosts where `mount -t nfs` works.

use log::{debug, warn};
use std::sync::Arc;

use crate::error::RemountError;
use crate::monitor::hooks::{RemountAction, remount_action};
use crate::types::Mount;
use crate::utils::process::command::Command;

/// Builds and runs `umount -l <dest>` followed by `mount -t <fstype> ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountCommand {
    pub mount_bin: String,
    pub umount_bin: String,
    pub fs_type: String,
    /// Lazily detach the stale mount before mounting again
    pub lazy_unmount: bool,
}

impl Default for MountCommand {
    fn default() -> Self {
        Self {
            mount_bin: "mount".to_string(),
            umount_bin: "umount".to_string(),
            fs_type: "nfs".to_string(),
            lazy_unmount: true,
        }
    }
}

impl MountCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fs_type(mut self, fs_type: impl Into<String>) -> Self {
        self.fs_type = fs_type.into();
        self
    }

    pub fn with_lazy_unmount(mut self, lazy_unmount: bool) -> Self {
        self.lazy_unmount = lazy_unmount;
        self
    }

    pub fn mount_command(&self, mount: &Mount) -> Command {
        let mut cmd = Command::new(&self.mount_bin).args(["-t", self.fs_type.as_str()]);
        if !mount.mount_opts.is_empty() {
            cmd = cmd.args(["-o", mount.mount_opts.as_str()]);
        }
        cmd.arg(mount.source()).arg(&mount.dest_path)
    }

    pub fn unmount_command(&self, mount: &Mount) -> Command {
        Command::new(&self.umount_bin)
            .arg("-l")
            .arg(&mount.dest_path)
    }

    /// Detach (if enabled) and mount `mount` again
    pub async fn remount(&self, mount: &Mount) -> Result<(), RemountError> {
        if self.lazy_unmount {
            // A stale mount may already be gone; mount will tell us if not
            if let Err(e) = run(self.unmount_command(mount), &self.umount_bin).await {
                debug!("🔧 Lazy unmount of {} failed: {e}", mount.dest_path.display());
            }
        }

        run(self.mount_command(mount), &self.mount_bin)
            .await
            .inspect_err(|e| warn!("⚠️ Mount command for {mount} failed: {e}"))
    }

    /// Turn this command into a remount action for [`crate::NfsMonitor`]
    pub fn into_action(self) -> RemountAction {
        let command = Arc::new(self);
        remount_action(move |mount| {
            let command = command.clone();
            async move { command.remount(&mount).await }
        })
    }
}

async fn run(cmd: Command, program: &str) -> Result<(), RemountError> {
    debug!("🔧 Running: {}", cmd.argv().join(" "));
    let output = cmd.output().await?;
    if output.status.success() {
        return Ok(());
    }

    Err(RemountError::Command {
        program: program.to_string(),
        code: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}
