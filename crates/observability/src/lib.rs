//! Tracing and logging setup shared by the panel binaries.

/// Initialize process-wide tracing using the format selected by
/// `PANEL_LOG_FORMAT`.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

/// Tracing configuration (filters, layers).
pub mod tracing;
