use tracing_subscriber::EnvFilter;

/// Workspace targets that receive log output.
const CRATE_TARGETS: &[&str] = &[
    "pluvial",
    "pluvial_exceedance",
    "pluvial_fit",
    "pluvial_stats",
    "pluvial_synth",
];

fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn directives(verbosity: u8) -> String {
    let level = level_for(verbosity);
    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the stderr subscriber. `-v` raises the level from warn to info,
/// `-vv` to debug and `-vvv` to trace. `RUST_LOG` takes precedence.
///
/// Logs go to stderr so `analyze` can stream its report on stdout.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
