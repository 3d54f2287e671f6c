// Logging setup and conditional logging macros.
//
// The terminal UI owns stdout/stderr, so records go to a file under the user's
// cache directory. The macros below only log in debug builds.

use chrono::Local;
use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "rapid-wordle";
const LOG_FILE: &str = "rapid-wordle.log";

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        // Still type-checks the arguments so release builds see them used
        if false {
            log::debug!($($arg)*);
        }
    }};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{
        // Still type-checks the arguments so release builds see them used
        if false {
            log::info!($($arg)*);
        }
    }};
}

/// Default log file location: `<cache dir>/rapid-wordle/rapid-wordle.log`.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(APP_DIR).join(LOG_FILE))
}

pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger writing to `path`. `RUST_LOG` overrides the
/// level chosen by `verbose`.
///
/// # Errors
///
/// Returns an error if the log file or its directory cannot be created.
pub fn init(path: &Path, verbose: bool) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;

    let default_filter = default_level(verbose).to_string().to_lowercase();
    Builder::from_env(Env::default().default_filter_or(default_filter))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(io::Error::other)
}
