//! Tool resolution and dispatch for xcrun.
//!
//! # Flow
//!
//! ```text
//! ContextBuilder::resolve()        explicit flags, SDKROOT/TOOLCHAINS, /etc/xcrun.ini
//!     ↓
//! search_path()                    <dev>/usr/bin + SDK/toolchain bins by selection
//!     ↓
//! locate()                         first executable match, left to right
//!     ↓
//! find mode: Outcome::Found(path)
//! run mode:  compose_environment() → Launcher::launch()
//! ```
//!
//! The [`Launcher`] trait is the only place a process is started, so both
//! modes can be exercised in tests with a recording launcher.

pub mod bundles;
pub mod context;
pub mod dispatch;
pub mod environment;
pub mod error;
pub mod launch;
pub mod locate;
pub mod query;
pub mod search;

pub use bundles::Bundles;
pub use context::{ContextBuilder, OutputMode, ResolutionContext, Selection};
pub use dispatch::{Dispatcher, Outcome, Request};
pub use environment::{compose_environment, ChildEnvironment};
pub use error::{DispatchError, Result};
pub use launch::{Launch, Launcher, ProcessLauncher};
pub use locate::{is_executable, locate};
pub use query::{answer, SdkQuery};
pub use search::{search_path, SearchPath};
