//! # Observability & Tracing
//!
//! Structured logging for the whole state layer, configured through `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Slice Lifecycle**: actor startup, reset and shutdown (`info`)
//! - **Events**: every dispatched event with its payload (`debug`)
//! - **Requests**: pending/succeeded per operation and epoch (`debug`), failures (`warn`)
//! - **Stale Settlements**: settlements discarded by the epoch guard (`debug`)
//!
//! ```bash
//! RUST_LOG=info cargo run                          # lifecycle only
//! RUST_LOG=debug cargo run                         # full event payloads
//! RUST_LOG=sync_framework=debug,info cargo run     # engine detail only
//! ```

/// Initializes the tracing subscriber for the application.
///
/// Uses a compact format without module targets; slices identify themselves with the
/// `slice` field instead.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
