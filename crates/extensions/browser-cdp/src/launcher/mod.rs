//! Chrome process launcher.
//!
//! Every session gets its own Chrome process with a throwaway profile
//! directory and an OS-assigned debugging port, so concurrent sessions never
//! share cookies, storage or ports.

mod launcher_core;
mod launcher_types;

pub use launcher_core::{ChromeLauncher, LaunchedBrowser};
pub use launcher_types::{LaunchConfig, LaunchError};

#[cfg(test)]
#[path = "launcher_tests.rs"]
mod tests;
