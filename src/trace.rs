use tracing_subscriber::{
    prelude::*,
    EnvFilter,
};

use util::bootstrap;

/// Install the global subscriber: pretty output in debug builds, JSON in release,
/// both to stdout.
pub fn init() {
    let level_filter = mk_level_filter();
    bootstrap!("enabling tracing with filter directive: {}", level_filter);

    let stdout_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    cfg_if::cfg_if! {
        if #[cfg(debug_assertions)] {
            tracing_subscriber::registry()
                .with(stdout_layer.pretty().with_filter(level_filter))
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    stdout_layer
                        .json()
                        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::NONE)
                        .with_filter(level_filter),
                )
                .init();
        }
    }
}

fn mk_level_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let default_str = {
            cfg_if::cfg_if! {
                if #[cfg(not(debug_assertions))] {
                    "warn,offboard=info,offboard_runtime=info,offboard_codec=warn,offboard_message=warn"
                } else {
                    "info,offboard=debug,offboard_runtime=debug,offboard_codec=debug,offboard_message=debug"
                }
            }
        };

        EnvFilter::new(default_str)
    })
}
