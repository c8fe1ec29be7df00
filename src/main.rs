mod app;
mod cli;
mod color;
mod config;
mod event;
mod logging;
mod palette;
mod presets;
mod sampler;
mod tui;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use sampler::ColorSampler;

fn main() -> Result<()> {
    let cli_opts = cli::Cli::parse();
    let config = config::load(cli_opts.config.as_deref())?;

    let log_target = if cli_opts.command.is_some() {
        logging::Target::Stderr
    } else {
        logging::Target::File
    };
    logging::init(cli_opts.log_level(&config), log_target)?;
    info!(version = env!("CARGO_PKG_VERSION"), "tonefit starting");

    let sampler: Arc<dyn ColorSampler> =
        Arc::from(sampler::from_config(&cli_opts.sampler_config(&config)));
    let presets = presets::with_extra(&config.user_presets());

    if let Some(command) = cli_opts.command {
        return cli::run(command, sampler.as_ref(), &presets);
    }

    let mut app = app::App::new(sampler, presets, config.initial_color());
    let mut terminal = tui::init()?;
    let result = event::run(&mut app, &mut terminal);

    tui::restore()?;

    result
}
