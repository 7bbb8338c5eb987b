//! Starting the located tool.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

use crate::environment::ChildEnvironment;
use crate::error::{DispatchError, Result};

/// Everything needed to start a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    /// Absolute path of the executable.
    pub program: PathBuf,
    /// Name the tool sees as `argv[0]`.
    pub argv0: OsString,
    pub args: Vec<OsString>,
    pub env: ChildEnvironment,
}

impl Launch {
    /// Space-joined command line for logging. Arguments that are not valid
    /// UTF-8 are shown lossily; the tool itself receives them unchanged.
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).env_clear().envs(self.env.iter());
        command
    }
}

/// Starts a tool and reports how it ended.
pub trait Launcher {
    /// Run `launch`. Returns the tool's exit status when control comes back
    /// to the caller.
    fn launch(&self, launch: &Launch) -> Result<i32>;
}

/// Launches real processes.
///
/// On Unix the current process image is replaced, so a successful launch
/// never returns. Elsewhere the tool is spawned and waited for.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    #[cfg(unix)]
    fn launch(&self, launch: &Launch) -> Result<i32> {
        use std::os::unix::process::CommandExt;

        let source = launch.command().arg0(&launch.argv0).exec();
        Err(DispatchError::ExecFailure {
            path: launch.program.clone(),
            source,
        })
    }

    #[cfg(not(unix))]
    fn launch(&self, launch: &Launch) -> Result<i32> {
        let status = launch
            .command()
            .status()
            .map_err(|source| DispatchError::ExecFailure {
                path: launch.program.clone(),
                source,
            })?;
        Ok(status.code().unwrap_or(1))
    }
}
