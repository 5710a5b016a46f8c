//! Diagnostic system for lexical errors and warnings.
//!
//! Every diagnostic carries:
//! - An error code for searchability
//! - A severity (fatal errors versus advisory warnings)
//! - A message saying what went wrong
//! - The span, line and column where it went wrong
//!
//! Producers append diagnostics as soon as they detect a condition; a
//! [`DiagnosticQueue`] sorts and deduplicates them for display and an
//! emitter renders them.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod queue;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
