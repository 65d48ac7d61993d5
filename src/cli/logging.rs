use tracing_subscriber::EnvFilter;

use super::report::should_use_color;

/// Installs the stderr log subscriber.
///
/// With no `-v` the filter comes from `BASE437_LOG`, falling back to `warn`.
pub fn init(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_env("BASE437_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(should_use_color())
        .try_init();
}
