//! # Observability
//!
//! One-time initialization of structured logging for binaries built on the host.
//!
//! ```bash
//! RUST_LOG=info cargo run            # one line per deployment, call and wiring step
//! RUST_LOG=debug cargo run           # include call payloads and lookups
//! RUST_LOG=module_wiring=debug cargo run
//! ```
//!
//! Hosts log with a `module_type` field instead of a module path, so targets are hidden and the
//! compact format keeps span names inline (e.g. `run_wiring:apply_edge: Call ok`).

/// Initializes the global `tracing` subscriber, filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
