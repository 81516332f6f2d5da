use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;

use super::actions::Action;
use super::globals::GlobalArgs;
use super::{commands, dispatch, telemetry};

/// Everything `main` needs to run one command.
pub struct Invocation {
    pub action: Action,
    pub globals: GlobalArgs,
    /// Keeps the log file writer alive until the process exits
    pub log_guard: Option<WorkerGuard>,
}

/// Parse the command line, set up logging and resolve the action to run.
///
/// # Errors
/// Returns an error if configuration loading, telemetry initialization or
/// action dispatch fails.
pub fn start() -> Result<Invocation> {
    let matches = commands::new().get_matches();

    let globals = GlobalArgs::from_matches(&matches)?;

    // A missing cache dir only costs the log file
    let log_dir = globals.config.cache_dir().ok();
    if let Some(ref dir) = log_dir {
        let _ = std::fs::create_dir_all(dir);
    }
    let log_guard = telemetry::init(matches.get_count(commands::ARG_VERBOSITY), log_dir.as_deref())?;

    let action = dispatch::handler(&matches)?;

    Ok(Invocation {
        action,
        globals,
        log_guard,
    })
}
