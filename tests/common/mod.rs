use flexi_logger::{Logger, LoggerHandle};

// log to stderr, RUST_LOG overrides the level
// only the first call in a test binary installs the logger
pub fn logger() -> Option<LoggerHandle> {
    Logger::try_with_env_or_str("warn")
        .ok()?
        .log_to_stderr()
        .start()
        .ok()
}
