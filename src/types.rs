use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A network filesystem mount to watch.
///
/// `dest_path` is the identity of a mount: registering another `Mount` with
/// the same destination replaces the stored one.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Mount {
    /// Server the export is mounted from
    pub server: String,
    /// Location of the export on the server
    pub server_path: String,
    /// Local mount point to monitor
    pub dest_path: PathBuf,
    /// Mount options used when (re)mounting, may be empty
    #[serde(default)]
    pub mount_opts: String,
}

impl Mount {
    pub fn new(
        server: impl Into<String>,
        server_path: impl Into<String>,
        dest_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            server: server.into(),
            server_path: server_path.into(),
            dest_path: dest_path.into(),
            mount_opts: String::new(),
        }
    }

    pub fn with_opts(mut self, opts: impl Into<String>) -> Self {
        self.mount_opts = opts.into();
        self
    }

    pub fn dest(&self) -> &Path {
        &self.dest_path
    }

    /// Remote source in `server:path` form, as accepted by `mount`
    pub fn source(&self) -> String {
        format!("{}:{}", self.server, self.server_path)
    }

    /// Whether `other` refers to the same mount point
    pub fn same_dest(&self, other: &Mount) -> bool {
        self.dest_path == other.dest_path
    }
}

impl fmt::Display for Mount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source())?;
        if !self.mount_opts.is_empty() {
            write!(f, ",{}", self.mount_opts)?;
        }
        write!(f, " {}", self.dest_path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_format() {
        let mount = Mount::new("192.168.0.1", "/export/thing", "/mnt/thing");
        assert_eq!(mount.source(), "192.168.0.1:/export/thing");
    }

    #[test]
    fn test_display_without_opts() {
        let mount = Mount::new("192.168.0.1", "/export/thing", "/mnt/thing");
        assert_eq!(mount.to_string(), "192.168.0.1:/export/thing /mnt/thing");
    }

    #[test]
    fn test_display_with_opts() {
        let mount = Mount::new("nas", "/vol/data", "/mnt/data").with_opts("vers=4,soft");
        assert_eq!(mount.to_string(), "nas:/vol/data,vers=4,soft /mnt/data");
    }

    #[test]
    fn test_same_dest_ignores_other_fields() {
        let a = Mount::new("s1", "/a", "/mnt/a");
        let b = Mount::new("s2", "/b", "/mnt/a").with_opts("ro");
        let c = Mount::new("s1", "/a", "/mnt/c");
        assert!(a.same_dest(&b));
        assert!(!a.same_dest(&c));
    }

    #[test]
    fn test_deserialize_without_opts() {
        let mount: Mount = serde_json::from_str(
            r#"{"server":"nas","server_path":"/vol","dest_path":"/mnt/vol"}"#,
        )
        .unwrap();
        assert_eq!(mount.mount_opts, "");
        assert_eq!(mount.dest(), Path::new("/mnt/vol"));
    }
}
