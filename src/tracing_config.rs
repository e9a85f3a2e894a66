//! Opt-in diagnostics for type-slot transitions.
//!
//! The collections log at `debug` when a slot binds or resets and when a
//! typed variant is declared, and at `trace` for every admitted element.
//! Nothing is printed unless `KOTC_LOG` (or `RUST_LOG`) is set:
//!
//! ```bash
//! KOTC_LOG=debug cargo test --test scenario_tests
//! KOTC_LOG="kotc_solver=trace" KOTC_LOG_FORMAT=tree cargo test
//! KOTC_LOG=debug KOTC_LOG_FORMAT=json cargo bench
//! ```
//!
//! `KOTC_LOG_FORMAT` picks `text` (default), `tree` or `json`. Output goes to
//! stderr.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

pub const LOG_ENV: &str = "KOTC_LOG";
pub const LOG_FORMAT_ENV: &str = "KOTC_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    /// Indented spans via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON.
    Json,
}

impl LogFormat {
    /// Unknown names fall back to `Text`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "tree" => LogFormat::Tree,
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }

    fn from_env() -> Self {
        std::env::var(LOG_FORMAT_ENV)
            .map(|name| LogFormat::parse(&name))
            .unwrap_or_default()
    }
}

/// The filter directives to use, if logging was requested at all.
/// `KOTC_LOG` wins over `RUST_LOG`.
fn requested_filter() -> Option<EnvFilter> {
    if let Ok(directives) = std::env::var(LOG_ENV) {
        return Some(EnvFilter::builder().parse_lossy(directives));
    }
    std::env::var("RUST_LOG")
        .ok()
        .map(|_| EnvFilter::from_default_env())
}

/// Install the global subscriber when logging was requested.
///
/// Returns `true` if a subscriber was installed by this call. Safe to call
/// more than once; later calls (or a subscriber installed elsewhere) leave
/// the existing one in place.
pub fn init_tracing() -> bool {
    let Some(filter) = requested_filter() else {
        return false;
    };

    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true)
                .with_writer(std::io::stderr);
            Registry::default().with(filter).with(tree).try_init().is_ok()
        }
        LogFormat::Json => {
            let json = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json).try_init().is_ok()
        }
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok(),
    }
}

#[cfg(test)]
#[path = "tests/tracing_config_tests.rs"]
mod tracing_config_tests;
