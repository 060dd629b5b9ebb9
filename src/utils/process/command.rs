use std::ffi::OsStr;
use std::process::Stdio;

/// A thin wrapper around `tokio::process::Command` with piped output and no
/// stdin, so mount helpers can never block on a prompt.
#[derive(Debug)]
pub struct Command {
    inner: tokio::process::Command,
}

impl Command {
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        let mut cmd = tokio::process::Command::new(program);

        cmd.stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(Stdio::null())
            .kill_on_drop(true);

        Self { inner: cmd }
    }

    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.inner.arg(arg);
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.inner.args(args);
        self
    }

    /// Program and arguments as they would be passed to exec
    pub fn argv(&self) -> Vec<String> {
        let std = self.inner.as_std();
        std::iter::once(std.get_program())
            .chain(std.get_args())
            .map(|s| s.to_string_lossy().into_owned())
            .collect()
    }

    pub async fn output(mut self) -> std::io::Result<std::process::Output> {
        self.inner.output().await
    }
}
