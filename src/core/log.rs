// Define a new module for logging initialization
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Installs the global subscriber.
///
/// A valid `RUST_LOG` replaces the built-in filter entirely. Otherwise only
/// this crate and `tower_http` log, at `info` (or `debug` with `verbose`).
pub fn init_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (app_filter, env_filter) = select_filters(verbose, rust_log.as_deref());

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(app_filter)
        .with(env_filter)
        .init();
}

fn select_filters(verbose: bool, rust_log: Option<&str>) -> (Option<Targets>, Option<EnvFilter>) {
    match rust_log.and_then(|directives| EnvFilter::try_new(directives).ok()) {
        Some(env_filter) => (None, Some(env_filter)),
        None => (Some(app_targets(verbose)), None),
    }
}

fn app_targets(verbose: bool) -> Targets {
    let level_filter = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    Targets::new()
        .with_target("fxrates", level_filter)
        .with_target("tower_http", level_filter)
}
