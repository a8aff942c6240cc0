use std::{fs::OpenOptions, path::Path, sync::Mutex};
use anyhow::Context;
use tracing_subscriber::EnvFilter;


// Send `tracing` output to `path` so it does not scribble over the dashboard;
// `RUST_LOG` wins over `level` when set
pub fn init_logging(path: &Path, level: &str) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact();

    // A second init in the same process is a no-op
    let _ = subscriber.try_init();
    Ok(())
}
