//! Tracing/logging setup shared by the binaries.

/// Tracing configuration (filters, layers).
pub mod tracing;

/// Initialize process-wide tracing on stderr.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init_stderr();
}
