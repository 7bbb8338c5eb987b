//! xcrun: find and run developer tools from the active developer directory.

mod args;
mod logging;
mod multicall;

use std::ffi::OsString;
use std::process;

use anyhow::{anyhow, bail, Context};
use tracing::warn;
use xcrun_dispatch::{
    answer, ContextBuilder, Dispatcher, Outcome, OutputMode, ProcessLauncher, Request,
    ResolutionContext,
};
use xcrun_sdk::{resolve_developer_dir, Environ};

use args::ToolCall;
use multicall::Personality;

fn main() {
    let argv: Vec<OsString> = std::env::args_os().collect();

    match run(&argv) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("xcrun: error: {e:#}");
            process::exit(1);
        }
    }
}

fn run(argv: &[OsString]) -> anyhow::Result<i32> {
    let program = argv.first().cloned().unwrap_or_else(|| OsString::from("xcrun"));
    let words = argv.get(1..).unwrap_or_default();

    let personality = Personality::from_program(&program.to_string_lossy());
    match personality {
        Personality::Tool(name) => {
            let mode = OutputMode::default();
            logging::init(mode);
            let env = Environ::from_process();
            let ctx = resolve_context(&env, mode, None, None)?;
            let call = ToolCall {
                name,
                argv0: program,
                args: words.to_vec(),
            };
            dispatch(&ctx, &env, call)
        }
        Personality::Xcrun(mode) => xcrun(words, mode),
    }
}

fn xcrun(words: &[OsString], mode: OutputMode) -> anyhow::Result<i32> {
    if words.first().map_or(true, |word| word == "-") {
        args::print_help()?;
        return Ok(0);
    }

    let invocation = match args::parse(words) {
        Ok(invocation) => invocation,
        Err(e) => {
            e.print()?;
            return Ok(if e.use_stderr() { 1 } else { 0 });
        }
    };
    let cli = invocation.cli;

    if (cli.verbose || cli.log) && invocation.tool.is_none() {
        bail!("specified arguments require -r or -f arguments");
    }
    if cli.version {
        println!("xcrun version {}", env!("CARGO_PKG_VERSION"));
        return Ok(0);
    }

    let mode = OutputMode {
        verbose: mode.verbose || cli.verbose,
        log: mode.log || cli.log,
        find: cli.find.is_some(),
    };
    logging::init(mode);

    let env = Environ::from_process();
    let ctx = resolve_context(&env, mode, cli.sdk.as_deref(), cli.toolchain.as_deref())?;

    if let Some(query) = cli.query() {
        println!("{}", answer(&ctx, &env, query)?);
        return Ok(0);
    }

    if cli.kill_cache {
        warn!("--kill-cache not supported");
    }
    if cli.no_cache {
        warn!("--no-cache not supported");
    }

    let call = invocation.tool.ok_or_else(|| anyhow!("no tool specified"))?;
    dispatch(&ctx, &env, call)
}

/// Developer directory first, then explicit selections, then the fallbacks
/// from the environment and `/etc/xcrun.ini`.
fn resolve_context(
    env: &Environ,
    mode: OutputMode,
    sdk: Option<&str>,
    toolchain: Option<&str>,
) -> anyhow::Result<ResolutionContext> {
    let developer_dir = resolve_developer_dir(env)?;
    let mut builder = ContextBuilder::new(developer_dir).mode(mode);
    if let Some(sdk) = sdk {
        builder = builder.sdk(sdk)?;
    }
    if let Some(toolchain) = toolchain {
        builder = builder.toolchain(toolchain)?;
    }
    Ok(builder.resolve(env)?)
}

fn dispatch(ctx: &ResolutionContext, env: &Environ, call: ToolCall) -> anyhow::Result<i32> {
    let request = Request {
        tool: call.name,
        argv0: call.argv0,
        args: call.args,
    };
    let action = if ctx.mode().find { "find" } else { "execute" };
    let outcome = Dispatcher::new(ctx, env, ProcessLauncher)
        .dispatch(&request)
        .with_context(|| format!("failed to {action} command '{}'", request.tool))?;

    match outcome {
        Outcome::Found(path) => {
            println!("{}", path.display());
            Ok(0)
        }
        Outcome::Exited(code) => Ok(code),
    }
}
