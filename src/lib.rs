//! nfs-monitor: keeps NFS mounts alive.
//!
//! An [`NfsMonitor`] holds a list of mounts to watch. [`NfsMonitor::run`]
//! checks each of them every interval and, when a mount reports a stale NFS
//! file handle, calls the configured remount action with a bounded number of
//! retries.
//!
//! ```no_run
//! use nfs_monitor::{Mount, MountCommand, NfsMonitor, WatchConfig};
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), nfs_monitor::ConfigError> {
//! let monitor = Arc::new(NfsMonitor::new());
//! monitor
//!     .watch_mount(Mount::new("192.168.0.1", "/export/thing", "/mnt/thing"))
//!     .await;
//! monitor
//!     .set_boxed_remount_action(MountCommand::new().into_action())
//!     .await;
//!
//! let cancel = CancellationToken::new();
//! let config = WatchConfig::default().with_interval(Duration::from_secs(1));
//! let handle = monitor.spawn(config, cancel.clone())?;
//!
//! // ...
//! cancel.cancel();
//! let _ = handle.await;
//! # Ok(())
//! # }
//! ```

#[cfg(not(unix))]
compile_error!("nfs-monitor only supports unix targets");

pub mod config;
pub mod error;
pub mod monitor;
pub mod remount;
pub mod types;
pub mod utils;

pub use config::WatchConfig;
pub use error::{ConfigError, RemountError, StatusError};
pub use monitor::hooks::{ErrCondition, RemountAction, is_stale_nfs, remount_action};
pub use monitor::registry::MountRegistry;
pub use monitor::status::{StatfsChecker, StatusCheck};
pub use monitor::{NfsMonitor, TickReport};
pub use remount::MountCommand;
pub use types::Mount;
pub use utils::logging::init_logging;
