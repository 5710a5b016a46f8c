//! Tracing subscriber for the command-line driver.
//!
//! Logging is off unless `GARNET_LOG` holds an `EnvFilter` directive, e.g.
//! `GARNET_LOG=garnet_lexer=debug garnet lex a.rb` shows heredoc and
//! interpolation transitions as an indented tree on stderr.

use std::sync::Once;

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use tracing_tree::HierarchicalLayer;

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "GARNET_LOG";

static TRACING_INIT: Once = Once::new();

/// Install the subscriber when `GARNET_LOG` is set. Safe to call more than
/// once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        if std::env::var_os(LOG_ENV).is_none() {
            return;
        }
        let filter = EnvFilter::from_env(LOG_ENV);
        let layer = HierarchicalLayer::new(2)
            .with_writer(std::io::stderr)
            .with_targets(true)
            .with_bracketed_fields(true);
        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .init();
    });
}
