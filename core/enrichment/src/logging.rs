/// Install the global `tracing` subscriber.
///
/// Honors `RUST_LOG`, with INFO as the baseline directive. Calling it again
/// (or after another subscriber was installed) has no effect.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}
