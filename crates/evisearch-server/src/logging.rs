//! Logging setup

/// Padded label for a log level.
fn level_label(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERROR",
        log::Level::Warn => "WARN ",
        log::Level::Info => "INFO ",
        log::Level::Debug => "DEBUG",
        log::Level::Trace => "TRACE",
    }
}

/// Initialize env_logger with timestamps for log aggregation.
/// `RUST_LOG` overrides the default level.
pub fn init_logging(debug: bool) {
    use std::io::Write;

    let default_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            writeln!(buf, "[{}] {}", level_label(record.level()), record.args())
        })
        .init();
}
