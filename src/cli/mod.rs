//! Command Line Interface (CLI) layer for viirscat.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the dispatch of subcommands (`runner`) to the library functionality
//! exposed via `viirscat::api`.
//!
//! If you are embedding viirscat into another application, prefer using
//! the high-level `viirscat::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
