//! Logger setup.
//!
//! Output goes to stderr through a [`fern`] dispatcher. The level is read from the
//! `STADIUM_LOG` environment variable and defaults to `info`.

use log::LevelFilter;

use crate::error::Result;

/// Environment variable holding the log level (`error`, `warn`, `info`, `debug`, `trace`).
pub const LOG_ENV: &str = "STADIUM_LOG";

/// Parses a level name, falling back to [`LevelFilter::Info`] for anything unrecognised.
pub fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Installs the global logger. Must be called once, before anything logs.
pub fn init() -> Result<()> {
    let level = parse_level(std::env::var(LOG_ENV).ok().as_deref());

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {:<5} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;

    Ok(())
}
