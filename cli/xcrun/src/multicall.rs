//! Behavior selected by the name the binary was invoked as.

use xcrun_dispatch::OutputMode;

/// What `argv[0]` asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Personality {
    /// `xcrun` or one of its variants; flags are parsed normally.
    Xcrun(OutputMode),
    /// Invoked through a link named after a tool: run that tool with every
    /// argument forwarded untouched.
    Tool(String),
}

impl Personality {
    pub fn from_program(argv0: &str) -> Self {
        match basename(argv0) {
            "xcrun" | "xcrun_nocache" => Personality::Xcrun(OutputMode::default()),
            "xcrun_log" => Personality::Xcrun(OutputMode { log: true, ..OutputMode::default() }),
            "xcrun_verbose" => Personality::Xcrun(OutputMode {
                verbose: true,
                ..OutputMode::default()
            }),
            tool => Personality::Tool(tool.to_string()),
        }
    }
}

/// Last `/`-separated component of `path`.
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
