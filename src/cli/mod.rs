//! Command Line Interface (CLI) layer for BANDSTACK.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for the individual pipeline steps.
//! It wires user-provided options to the library functionality exposed via
//! `bandstack::api`.
//!
//! If you are embedding BANDSTACK into another application, prefer using
//! the high-level `bandstack::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
