use nix::errno::Errno;
use std::path::{Path, PathBuf};

/// Why a mount point's filesystem status could not be read
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    /// `statfs` on the destination failed
    #[error("statfs {}: {}", .path.display(), describe_errno(.errno))]
    Statfs { path: PathBuf, errno: Errno },

    /// Failure reported by a custom status checker, with its own description
    #[error("{}: {message}", .path.display())]
    Os {
        path: PathBuf,
        errno: Errno,
        message: String,
    },

    /// The blocking check task panicked or was cancelled
    #[error("status check for {} aborted: {reason}", .path.display())]
    Aborted { path: PathBuf, reason: String },
}

impl StatusError {
    pub fn errno(&self) -> Option<Errno> {
        match self {
            StatusError::Statfs { errno, .. } | StatusError::Os { errno, .. } => Some(*errno),
            StatusError::Aborted { .. } => None,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            StatusError::Statfs { path, .. }
            | StatusError::Os { path, .. }
            | StatusError::Aborted { path, .. } => path,
        }
    }

    /// The reason alone, without the path
    pub fn description(&self) -> &str {
        match self {
            StatusError::Statfs { errno, .. } => describe_errno(errno),
            StatusError::Os { message, .. } => message,
            StatusError::Aborted { reason, .. } => reason,
        }
    }
}

/// `ESTALE` keeps its historical "stale NFS file handle" wording, which the
/// default staleness predicate matches on. Everything else uses the libc text.
fn describe_errno(errno: &Errno) -> &'static str {
    match *errno {
        Errno::ESTALE => "stale NFS file handle",
        other => other.desc(),
    }
}

/// Errors returned by a remount action
#[derive(Debug, thiserror::Error)]
pub enum RemountError {
    #[error("remount failed: {0}")]
    Failed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{program} exited with {}: {stderr}", describe_exit(.code))]
    Command {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

impl RemountError {
    pub fn failed(msg: impl Into<String>) -> Self {
        RemountError::Failed(msg.into())
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "signal".to_string(),
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("poll interval must be greater than zero")]
    ZeroInterval,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statfs_estale_mentions_nfs() {
        let err = StatusError::Statfs {
            path: PathBuf::from("/mnt/data"),
            errno: Errno::ESTALE,
        };
        assert_eq!(err.to_string(), "statfs /mnt/data: stale NFS file handle");
        assert_eq!(err.errno(), Some(Errno::ESTALE));
    }

    #[test]
    fn test_statfs_other_errno_uses_libc_text() {
        let err = StatusError::Statfs {
            path: PathBuf::from("/mnt/data"),
            errno: Errno::ENOENT,
        };
        assert!(err.to_string().starts_with("statfs /mnt/data: "));
        assert!(!err.to_string().contains("NFS"));
    }

    #[test]
    fn test_description_leaves_out_path() {
        let statfs = StatusError::Statfs {
            path: PathBuf::from("/mnt/NFS-share"),
            errno: Errno::ENOENT,
        };
        assert_eq!(statfs.description(), Errno::ENOENT.desc());

        let stale = StatusError::Statfs {
            path: PathBuf::from("/mnt/data"),
            errno: Errno::ESTALE,
        };
        assert_eq!(stale.description(), "stale NFS file handle");

        let os = StatusError::Os {
            path: PathBuf::from("/mnt/NFS-archive"),
            errno: Errno::ESTALE,
            message: "fuse: stale file handle".to_string(),
        };
        assert_eq!(os.description(), "fuse: stale file handle");

        let aborted = StatusError::Aborted {
            path: PathBuf::from("/mnt/data"),
            reason: "task panicked".to_string(),
        };
        assert_eq!(aborted.description(), "task panicked");
    }

    #[test]
    fn test_aborted_has_no_errno() {
        let err = StatusError::Aborted {
            path: PathBuf::from("/mnt/data"),
            reason: "task panicked".to_string(),
        };
        assert_eq!(err.errno(), None);
        assert_eq!(err.path(), Path::new("/mnt/data"));
    }

    #[test]
    fn test_command_error_display() {
        let err = RemountError::Command {
            program: "mount".to_string(),
            code: Some(32),
            stderr: "mount.nfs: access denied".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "mount exited with status 32: mount.nfs: access denied"
        );

        let killed = RemountError::Command {
            program: "mount".to_string(),
            code: None,
            stderr: String::new(),
        };
        assert!(killed.to_string().contains("signal"));
    }
}
