//! Diagnostic output on stderr.

use std::io::IsTerminal;

use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use xcrun_dispatch::OutputMode;

/// Environment variable holding a full filter directive.
pub const LOG_ENV: &str = "XCRUN_LOG";

const CRATES: &[&str] = &["xcrun", "xcrun_dispatch", "xcrun_sdk", "xcrun_targets"];

/// Filter directive for `mode`: warnings by default, `info` from our crates
/// in log mode, `debug` in verbose mode.
pub fn directive(mode: OutputMode) -> String {
    let level = if mode.verbose {
        "debug"
    } else if mode.log {
        "info"
    } else {
        return "warn".to_string();
    };
    let mut directive = String::from("warn");
    for krate in CRATES {
        directive.push_str(&format!(",{krate}={level}"));
    }
    directive
}

/// Install the global subscriber. `XCRUN_LOG`, when set and valid, wins
/// over the directive derived from `mode`.
pub fn init(mode: OutputMode) {
    let filter = std::env::var(LOG_ENV)
        .ok()
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(directive(mode)));

    let layer = fmt::layer()
        .compact()
        .without_time()
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    // Keep an already installed subscriber.
    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}
