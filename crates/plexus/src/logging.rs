//! File logging.
//!
//! The terminal is owned by the UI, so log records go to `plexus.log` in the
//! platform data directory instead of stderr. Filter with `RUST_LOG`.

use std::fs::{self, File};
use std::path::PathBuf;

use directories::ProjectDirs;
use log::SetLoggerError;

const LOG_FILE: &str = "plexus.log";

fn log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "plexus").map(|dirs| dirs.data_local_dir().join(LOG_FILE))
}

/// Install the logger. Logging stays off if the log file cannot be created.
pub fn init() {
    let Some(path) = log_path() else {
        return;
    };
    if let Some(parent) = path.parent()
        && fs::create_dir_all(parent).is_err()
    {
        return;
    }
    let Ok(file) = File::create(&path) else {
        return;
    };
    // Runs before the terminal is taken over, so stderr is still visible.
    if let Err(err) = install(file) {
        eprintln!("failed to install logger: {err}");
    }
}

/// Route log records into `file`. Fails only if a logger is already set.
fn install(file: File) -> Result<(), SetLoggerError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_install_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let first = File::create(dir.path().join("first.log")).unwrap();
        let second = File::create(dir.path().join("second.log")).unwrap();
        // The first call may lose to another test's logger; the second never wins.
        let _ = install(first);
        assert!(install(second).is_err());
    }
}
