//! Subscriber setup for the stdio binary.
//!
//! Both workspace crates log at `info` unless `RUST_LOG` says otherwise; the client
//! crate carries the write and dropped-result events.

use tracing_subscriber::EnvFilter;

/// Directives used when `RUST_LOG` is unset, empty or unparsable.
pub const DEFAULT_DIRECTIVES: &str = "notion_mcp=info,notion_client=info";

/// Build the filter from a `RUST_LOG` value.
pub fn env_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .map(str::trim)
        .filter(|directives| !directives.is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the fmt subscriber on stderr; stdout carries the protocol stream.
pub fn init() {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();
}
