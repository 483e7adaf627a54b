//! Optional `tracing` subscriber wiring for standalone binaries/tests that
//! embed this crate. The checker layers only ever call into `tracing`'s
//! static macros directly; they never depend on a subscriber being installed.

#[cfg(feature = "tracing-init")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .try_init();
}
