//! Loads a WebAssembly module, links the `engine` native callbacks into it
//! and calls one exported entry point.

pub mod config;
pub mod error;
pub mod host;
pub mod launcher;

pub use config::LaunchConfig;
pub use error::LaunchError;
pub use launcher::launch;
pub use launcher::run;
pub use launcher::run_with;
pub use launcher::CallOutcome;
pub use launcher::Launcher;
