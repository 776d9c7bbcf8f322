//! Process-wide diagnostics setup.
//!
//! The domain crates only emit `tracing` events; hosts call [`init`] once at
//! startup to decide where those events go.

/// Subscriber configuration (filters, output format).
pub mod subscriber;

pub use subscriber::LogFormat;

/// Initialize tracing with JSON output, filtered by `RUST_LOG` (default `info`).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    subscriber::init(None, LogFormat::Json);
}

/// Like [`init`], but with an explicit filter directive such as
/// `"satchel_inventory=debug"`. `RUST_LOG` is ignored.
pub fn init_with_filter(directive: &str) {
    subscriber::init(Some(directive), LogFormat::Json);
}
