//! The find/run state machine.

use std::ffi::OsString;
use std::path::PathBuf;

use tracing::{debug, info};
use xcrun_sdk::Environ;

use crate::bundles::Bundles;
use crate::context::ResolutionContext;
use crate::environment::compose_environment;
use crate::error::{DispatchError, Result};
use crate::launch::{Launch, Launcher};
use crate::locate::locate;
use crate::search::search_path;

/// A tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Bare tool name looked up along the search path.
    pub tool: String,
    /// Name passed to the tool as `argv[0]`.
    pub argv0: OsString,
    /// Forwarded byte for byte.
    pub args: Vec<OsString>,
}

impl Request {
    /// A request whose `argv[0]` is the tool name itself.
    pub fn new(tool: impl Into<String>, args: Vec<OsString>) -> Self {
        let tool = tool.into();
        Request {
            argv0: OsString::from(&tool),
            tool,
            args,
        }
    }
}

/// How a dispatch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Find mode: the located executable.
    Found(PathBuf),
    /// Run mode: the tool's exit status, for launchers that return.
    Exited(i32),
}

/// Resolves a [`Request`] against a frozen context and either reports or
/// launches the tool.
pub struct Dispatcher<'a, L> {
    ctx: &'a ResolutionContext,
    env: &'a Environ,
    launcher: L,
}

impl<'a, L: Launcher> Dispatcher<'a, L> {
    pub fn new(ctx: &'a ResolutionContext, env: &'a Environ, launcher: L) -> Self {
        Dispatcher { ctx, env, launcher }
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    pub fn dispatch(&self, request: &Request) -> Result<Outcome> {
        let bundles = Bundles::new(self.ctx);
        let search = search_path(&bundles)?;
        let program = locate(&request.tool, &search).ok_or_else(|| {
            DispatchError::CommandNotFound {
                name: request.tool.clone(),
                searched: search.to_string(),
            }
        })?;

        if self.ctx.mode().find {
            debug!(path = %program.display(), "find mode, not launching");
            return Ok(Outcome::Found(program));
        }

        let launch = Launch {
            program,
            argv0: request.argv0.clone(),
            args: request.args.clone(),
            env: compose_environment(&bundles, self.env)?,
        };
        if self.ctx.mode().log {
            info!("invoking command: \"{}\"", launch.command_line());
        } else {
            debug!("invoking command: \"{}\"", launch.command_line());
        }
        let code = self.launcher.launch(&launch)?;
        Ok(Outcome::Exited(code))
    }
}
