/// Installs a `tracing` subscriber that prints the `debug!`/`warn!`/`info!`
/// events emitted by [`crate::solver::Solver`] (§10.2) to stderr, filtered by
/// `RUST_LOG` (defaulting to `info`).
///
/// The library itself never installs a subscriber — that is a host concern
/// (§10.3). This is the example-binary hook the teacher's own `perf` module
/// provides, trimmed to the tracing-only half of it: the Tracy/Chrome export
/// layers went with the Bevy-oriented visualization stack this crate
/// doesn't carry (see DESIGN.md).
pub fn enable_profiling() {
  tracing_subscriber::fmt()
    .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
    .with_target(false)
    .init();
}
