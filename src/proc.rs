//! Process launching helpers.
//!
//! The main customer is pipeline tooling that boots a DCC or render
//! worker and walks away: the child must outlive the launching script
//! and keep its output to itself.

use crate::error::{PipekitError, Result};
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

#[cfg(unix)]
use std::os::unix::process::CommandExt;
#[cfg(windows)]
use std::os::windows::process::CommandExt;

#[cfg(windows)]
const DETACHED_PROCESS: u32 = 0x0000_0008;
#[cfg(windows)]
const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;

/// Builder for a fully detached, fire-and-forget child process.
///
/// The child gets null stdio and its own process group (session on Unix,
/// `DETACHED_PROCESS` on Windows), so it is not torn down when the
/// launching process exits. Extra environment variables merge over the
/// inherited environment.
///
/// ```no_run
/// use pipekit::proc::DetachedCommand;
///
/// let child = DetachedCommand::new("mayapy")
///     .arg("render_shot.py")
///     .env("SHOT", "sq010_sh0100")
///     .spawn()?;
/// println!("render running as pid {}", child.id());
/// # Ok::<(), pipekit::error::PipekitError>(())
/// ```
#[derive(Debug)]
pub struct DetachedCommand {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    envs: Vec<(OsString, OsString)>,
}

impl DetachedCommand {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            cwd: None,
            envs: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn env(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.envs
            .push((key.as_ref().to_os_string(), value.as_ref().to_os_string()));
        self
    }

    /// Launch the process. The pid is available as [`Child::id`].
    pub fn spawn(&self) -> Result<Child> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }

        #[cfg(windows)]
        cmd.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
        #[cfg(unix)]
        cmd.process_group(0);

        let child = cmd.spawn().map_err(|e| {
            PipekitError::Proc(format!(
                "failed to launch '{}': {}",
                self.program.to_string_lossy(),
                e
            ))
        })?;

        tracing::debug!(
            pid = child.id(),
            program = %self.program.to_string_lossy(),
            "spawned detached process"
        );
        Ok(child)
    }
}

/// Locate an executable on `PATH`, returning its full path.
///
/// A name containing a separator is checked directly instead. On Windows
/// the `PATHEXT` extensions are tried (defaulting to `.COM;.EXE;.BAT;.CMD`).
pub fn which(executable: &str) -> Option<PathBuf> {
    if executable.contains('/') || executable.contains('\\') {
        return candidate_names(executable)
            .into_iter()
            .map(PathBuf::from)
            .find(|p| is_executable(p))
            .and_then(|p| p.canonicalize().ok());
    }

    let paths = env::var_os("PATH")?;
    for dir in env::split_paths(&paths) {
        if dir.as_os_str().is_empty() {
            continue;
        }
        for name in candidate_names(executable) {
            let candidate = dir.join(name);
            if is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

#[cfg(windows)]
fn candidate_names(executable: &str) -> Vec<String> {
    let pathext =
        env::var("PATHEXT").unwrap_or_else(|_| String::from(".COM;.EXE;.BAT;.CMD"));
    let mut names = vec![executable.to_string()];
    for ext in pathext.split(';').filter(|e| !e.is_empty()) {
        names.push(format!("{}{}", executable, ext));
    }
    names
}

#[cfg(not(windows))]
fn candidate_names(executable: &str) -> Vec<String> {
    vec![executable.to_string()]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
