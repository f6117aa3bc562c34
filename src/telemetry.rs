//! Tracing setup for hosts embedding `chartcore`.
//!
//! The layout and highlight paths emit `tracing` events (`debug` per layout
//! pass, `trace` per frame). Nothing is printed unless the host installs a
//! subscriber, either its own or the one built here behind the `telemetry`
//! feature.

/// Installs a compact `tracing` subscriber filtered by `RUST_LOG`, falling
/// back to `info`.
///
/// Returns `false` when the feature is disabled or a global subscriber is
/// already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_default_filter("info")
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback directive,
/// e.g. `"chartcore=trace"` to see per-frame tick and highlight events.
#[must_use]
pub fn init_tracing_with_default_filter(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directive));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}
