//! Garnet command-line driver.
//!
//! The binary (`garnet`) is a thin dispatcher over these modules so the
//! commands can be tested without spawning a process.

pub mod commands;
pub mod options;
pub mod tracing_setup;
