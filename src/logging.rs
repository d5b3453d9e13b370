use std::path::{Path, PathBuf};
use std::sync::Once;

use directories::ProjectDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::APP_NAME;

/// Default log file: `<data_local_dir>/typeglow.log`, or the working
/// directory when no home can be resolved.
pub fn default_log_path() -> PathBuf {
    ProjectDirs::from("", "", APP_NAME)
        .map(|pd| pd.data_local_dir().join("typeglow.log"))
        .unwrap_or_else(|| PathBuf::from("typeglow.log"))
}

/// Install a file-backed subscriber. The returned guard must be held for
/// the lifetime of the program so buffered lines get flushed.
pub fn init_file_logging(path: &Path) -> std::io::Result<Option<WorkerGuard>> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "typeglow.log".into());

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
    {
        Ok(()) => Ok(Some(guard)),
        // A global subscriber is already installed; dropping the guard shuts the writer down.
        Err(_) => Ok(None),
    }
}

pub fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", %info, "panic");
            default_panic(info);
        }));
    });
}
