use std::fs::File;
use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Env, Target};

use pixpaint::cli::Args;
use pixpaint::config::AppConfig;
use pixpaint::preview::print_palette;
use pixpaint::tui::{self, App};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = AppConfig::from_args(&args)?;
    log::info!(
        "canvas {}x{}, palette {} cells, scale {}, {:?} channel order",
        config.canvas.width,
        config.canvas.height,
        config.palette_cells(),
        config.scale,
        config.channel_order
    );

    if args.preview {
        let palette = config.build_palette();
        return print_palette(&mut io::stdout().lock(), &palette);
    }

    tui::run(App::new(&config))
}

fn init_logging(args: &Args) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    builder.format_timestamp_millis();
    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}
