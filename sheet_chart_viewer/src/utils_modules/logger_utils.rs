use crate::common::*;

use std::io::Write;

#[doc = "Log line layout: [timestamp] [LEVEL] [file:line] message"]
fn log_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "[{}] [{}] [{}:{}] {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.file().unwrap_or("unknown"),
        record.line().unwrap_or(0),
        &record.args()
    )
}

#[doc = r#"
    Sets up the global logger.

    - Level comes from `RUST_LOG`, falling back to `info`
    - Files go to `logs/`, rotated daily, keeping the last 10
    - Every line is duplicated to stdout

    The returned handle must be kept alive for as long as file logging is needed.

    # Panics
    When the logger cannot be started.
"#]
pub fn set_global_logger() -> LoggerHandle {
    Logger::try_with_env_or_str("info")
        .and_then(|logger| {
            logger
                .log_to_file(FileSpec::default().directory("logs").suppress_timestamp())
                .rotate(
                    Criterion::Age(Age::Day),
                    Naming::Timestamps,
                    Cleanup::KeepLogFiles(10),
                )
                .format_for_files(log_format)
                .format_for_stdout(log_format)
                .duplicate_to_stdout(Duplicate::All)
                .start()
        })
        .unwrap_or_else(|e| panic!("[set_global_logger] Logger initialization failed: {:?}", e))
}
