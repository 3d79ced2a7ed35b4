use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;

use audiovis::config::Config;

/// The terminal belongs to the UI, so logs only go to a file when asked for.
fn init_logging(cfg: &Config) -> Result<()> {
    let Some(path) = cfg.log_file.as_ref() else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("open log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cfg = Config::parse();
    if cfg.list_devices {
        audiovis::audio::list_devices()?;
        return Ok(());
    }

    init_logging(&cfg)?;
    audiovis::app::run(cfg)
}
