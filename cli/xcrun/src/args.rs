//! Command-line parsing.
//!
//! Options end at the first word that is not an option, or right after the
//! value of `-f`/`-r`. Everything from there on belongs to the tool, so the
//! option prefix is split off first and only that part goes through clap.
//! Words are kept as raw OS strings so tool arguments reach the tool
//! unchanged.

use std::ffi::OsString;

use clap::{CommandFactory, Parser};
use xcrun_dispatch::SdkQuery;

use crate::multicall::basename;

#[derive(Debug, Parser)]
#[command(
    name = "xcrun",
    about = "Find and execute the named command line tool from the active developer directory",
    long_about = "Find and execute the named command line tool from the active developer directory.\n\n\
                  The active developer directory can be set via the DEVELOPER_DIR environment \
                  variable or the $HOME/.xcdev.dat configuration cache.",
    override_usage = "xcrun [options] <tool name> ... arguments ...",
    disable_version_flag = true
)]
pub struct Cli {
    /// Show the xcrun version
    #[arg(long)]
    pub version: bool,

    /// Show verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Find the tool for the given SDK name or path
    #[arg(long, value_name = "sdk name", allow_hyphen_values = true, value_parser = bundle_reference)]
    pub sdk: Option<String>,

    /// Find the tool for the given toolchain name or path
    #[arg(long, value_name = "name", allow_hyphen_values = true, value_parser = bundle_reference)]
    pub toolchain: Option<String>,

    /// Show commands to be executed (with --run)
    #[arg(short, long)]
    pub log: bool,

    /// Only find and print the tool path
    #[arg(short, long, value_name = "tool")]
    pub find: Option<OsString>,

    /// Find and execute the tool (the default behavior)
    #[arg(short, long, value_name = "tool")]
    pub run: Option<OsString>,

    /// Do not use the lookup cache (not supported, does nothing)
    #[arg(short = 'n', long)]
    pub no_cache: bool,

    /// Invalidate all existing cache entries (not supported, does nothing)
    #[arg(short = 'k', long)]
    pub kill_cache: bool,

    /// Show selected SDK install path
    #[arg(long)]
    pub show_sdk_path: bool,

    /// Show selected SDK version
    #[arg(long)]
    pub show_sdk_version: bool,

    /// Show selected SDK target triple
    #[arg(long)]
    pub show_sdk_target_triple: bool,

    /// Show selected SDK toolchain path
    #[arg(long)]
    pub show_sdk_toolchain_path: bool,

    /// Show selected SDK toolchain version
    #[arg(long)]
    pub show_sdk_toolchain_version: bool,
}

impl Cli {
    /// The highest-precedence `--show-sdk-*` query requested, if any.
    pub fn query(&self) -> Option<SdkQuery> {
        [
            (self.show_sdk_path, SdkQuery::SdkPath),
            (self.show_sdk_version, SdkQuery::SdkVersion),
            (self.show_sdk_toolchain_path, SdkQuery::ToolchainPath),
            (self.show_sdk_toolchain_version, SdkQuery::ToolchainVersion),
            (self.show_sdk_target_triple, SdkQuery::TargetTriple),
        ]
        .into_iter()
        .find_map(|(asked, query)| asked.then_some(query))
    }
}

fn bundle_reference(value: &str) -> Result<String, String> {
    if value.is_empty() || value.starts_with('-') {
        return Err("flag requires an argument".into());
    }
    Ok(value.to_string())
}

/// The tool to look up and what it receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    /// Basename looked up along the search path.
    pub name: String,
    /// The word as typed, passed on as `argv[0]`.
    pub argv0: OsString,
    pub args: Vec<OsString>,
}

impl ToolCall {
    fn new(word: OsString, args: Vec<OsString>) -> Self {
        ToolCall {
            name: basename(&word.to_string_lossy()).to_string(),
            argv0: word,
            args,
        }
    }
}

/// A parsed `xcrun` command line.
#[derive(Debug)]
pub struct Invocation {
    pub cli: Cli,
    pub tool: Option<ToolCall>,
}

/// Options whose value is the next word.
const VALUE_OPTIONS: &[&str] = &["--sdk", "--toolchain", "-f", "--find", "-r", "--run"];
/// Options whose value names the tool and ends option parsing.
const TOOL_OPTIONS: &[&str] = &["-f", "--find", "-r", "--run"];
/// Short flags that take a value.
const TOOL_SHORTS: &[char] = &['f', 'r'];

/// Split `words` (arguments after `argv[0]`) into the option prefix, the
/// tool word if one appears positionally, and the words after it.
fn split(words: &[OsString]) -> (Vec<OsString>, Option<OsString>, Vec<OsString>) {
    let mut options = Vec::new();
    let mut iter = words.iter();

    while let Some(word) = iter.next() {
        let text = word.to_string_lossy();
        if text == "--" {
            let tool = iter.next().cloned();
            return (options, tool, iter.cloned().collect());
        }
        if !text.starts_with('-') || text == "-" {
            return (options, Some(word.clone()), iter.cloned().collect());
        }
        options.push(word.clone());

        if let Some(long) = text.strip_prefix("--") {
            let name = format!("--{}", long.split('=').next().unwrap_or(long));
            let attached = long.contains('=');
            if !attached && VALUE_OPTIONS.contains(&name.as_str()) {
                options.extend(iter.next().cloned());
            }
            if TOOL_OPTIONS.contains(&name.as_str()) {
                break;
            }
            continue;
        }

        // Short cluster such as `-vf` or `-fclang`.
        let flags = &text[1..];
        if let Some(pos) = flags.find(TOOL_SHORTS) {
            if pos + 1 == flags.len() {
                options.extend(iter.next().cloned());
            }
            break;
        }
    }

    (options, None, iter.cloned().collect())
}

/// Parse the arguments that follow `argv[0]`.
pub fn parse(words: &[OsString]) -> Result<Invocation, clap::Error> {
    let (options, positional, rest) = split(words);
    let cli = Cli::try_parse_from(std::iter::once(OsString::from("xcrun")).chain(options))?;

    let tool = match (&cli.find, &cli.run, positional) {
        (Some(word), _, _) | (None, Some(word), _) => Some(ToolCall::new(word.clone(), rest)),
        (None, None, Some(word)) => Some(ToolCall::new(word, rest)),
        (None, None, None) => None,
    };
    Ok(Invocation { cli, tool })
}

/// Print the long help text to stdout.
pub fn print_help() -> std::io::Result<()> {
    Cli::command().print_long_help()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    fn words(line: &str) -> Vec<OsString> {
        line.split_whitespace().map(OsString::from).collect()
    }

    fn parse_line(line: &str) -> Invocation {
        parse(&words(line)).unwrap()
    }

    #[test]
    fn bare_tool_takes_everything_after_it() {
        let inv = parse_line("clang -v -c main.c");
        assert!(!inv.cli.verbose);
        let tool = inv.tool.unwrap();
        assert_eq!(tool.name, "clang");
        assert_eq!(tool.args, words("-v -c main.c"));
    }

    #[test]
    fn options_before_tool() {
        let inv = parse_line("-v --sdk iPhoneOS --toolchain Default ld -o out");
        assert!(inv.cli.verbose);
        assert_eq!(inv.cli.sdk.as_deref(), Some("iPhoneOS"));
        assert_eq!(inv.cli.toolchain.as_deref(), Some("Default"));
        let tool = inv.tool.unwrap();
        assert_eq!(tool.name, "ld");
        assert_eq!(tool.args, words("-o out"));
    }

    #[test]
    fn find_value_is_the_tool() {
        let inv = parse_line("-f clang -l");
        assert!(!inv.cli.log);
        let tool = inv.tool.unwrap();
        assert_eq!(tool.name, "clang");
        assert_eq!(tool.args, words("-l"));
        assert_eq!(inv.cli.find.as_deref(), Some(OsStr::new("clang")));
    }

    #[test]
    fn clustered_and_attached_forms() {
        let inv = parse_line("-lr as --version");
        assert!(inv.cli.log);
        assert!(!inv.cli.version);
        assert_eq!(inv.tool.unwrap().name, "as");

        let inv = parse_line("--run=nm -a");
        assert_eq!(inv.tool.unwrap().args, words("-a"));

        let inv = parse_line("--sdk=MacOSX -f strip");
        assert_eq!(inv.cli.sdk.as_deref(), Some("MacOSX"));
        assert_eq!(inv.tool.unwrap().name, "strip");
    }

    #[test]
    fn tool_path_is_reduced_to_basename() {
        let inv = parse_line("--find /usr/local/bin/clang");
        let tool = inv.tool.unwrap();
        assert_eq!(tool.name, "clang");
        assert_eq!(tool.argv0, "/usr/local/bin/clang");
    }

    #[test]
    fn double_dash_ends_options() {
        let inv = parse_line("-v -- -weird-tool x");
        let tool = inv.tool.unwrap();
        assert_eq!(tool.name, "-weird-tool");
        assert_eq!(tool.args, words("x"));
    }

    #[cfg(unix)]
    #[test]
    fn tool_arguments_keep_raw_bytes() {
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"a\xffb").to_os_string();
        let mut line = words("-l dump");
        line.push(raw.clone());
        let inv = parse(&line).unwrap();
        assert!(inv.cli.log);
        assert_eq!(inv.tool.unwrap().args, vec![raw]);
    }

    #[test]
    fn hyphen_value_for_sdk_is_rejected() {
        assert!(parse(&words("--sdk -v clang")).is_err());
        assert!(parse(&words("--toolchain=-x clang")).is_err());
    }

    #[test]
    fn unknown_option_is_rejected() {
        let err = parse(&words("--bogus clang")).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn query_precedence() {
        let inv = parse_line("--show-sdk-target-triple --show-sdk-toolchain-path --show-sdk-version");
        assert_eq!(inv.cli.query(), Some(SdkQuery::SdkVersion));
        assert!(inv.tool.is_none());
        assert_eq!(parse_line("--show-sdk-target-triple").cli.query(), Some(SdkQuery::TargetTriple));
        assert_eq!(parse_line("-n clang").cli.query(), None);
    }

    #[test]
    fn clap_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
