use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use kidsdraw::Config;
use kidsdraw::draw::Raster;
use kidsdraw::export::ExportManager;
use kidsdraw::input::{Action, InputState};
use kidsdraw::script::Script;

#[derive(Parser, Debug)]
#[command(name = "kidsdraw")]
#[command(version, about = "Finger-painting canvas for kids")]
struct Cli {
    /// Gesture script to replay onto the canvas (TOML, one [[step]] per event)
    #[arg(long, short = 's', value_name = "FILE")]
    script: Option<PathBuf>,

    /// PNG picture to draw on
    #[arg(long, short = 'b', value_name = "PNG")]
    background: Option<PathBuf>,

    /// Exported picture width in pixels
    #[arg(long, value_name = "PIXELS")]
    width: Option<u32>,

    /// Exported picture height in pixels
    #[arg(long, value_name = "PIXELS")]
    height: Option<u32>,

    /// Directory to save the picture in (overrides the config file)
    #[arg(long, short = 'o', value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Config file to use instead of ~/.config/kidsdraw/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let Some(script_path) = cli.script.as_deref() else {
        // No script: show usage
        println!("kidsdraw: Finger-painting canvas for kids");
        println!();
        println!("Usage:");
        println!("  kidsdraw --script drawing.toml              Replay a drawing and save it");
        println!("  kidsdraw --script drawing.toml -b photo.png Draw on top of a picture");
        println!("  kidsdraw --help                             Show help");
        println!();
        println!("Script steps:");
        println!("  down/move/up (x, y), brush-size (size), brush-preset (small|medium|large),");
        println!("  color (name or #RRGGBB), palette (index), undo");
        return Ok(());
    };

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config: {:#}, using defaults", e);
            Config::default()
        }),
    };

    let script = Script::load(script_path)?;
    let mut state = InputState::from_config(&config);

    let mut size = (config.canvas.width, config.canvas.height);
    if let Some(path) = &cli.background {
        let mut file = File::open(path)
            .with_context(|| format!("Failed to open background {}", path.display()))?;
        let raster = Raster::from_png(&mut file)
            .with_context(|| format!("Failed to decode background {}", path.display()))?;
        size = (raster.width().unsigned_abs(), raster.height().unsigned_abs());
        state.handle_action(Action::SetBackground(raster));
    }
    let width = cli.width.unwrap_or(size.0);
    let height = cli.height.unwrap_or(size.1);

    let summary = script.replay(&mut state);
    log::info!(
        "Replayed {} steps ({} skipped), {} strokes on canvas",
        summary.applied,
        summary.skipped,
        state.surface.strokes().len()
    );

    let mut save_config = config.file_save_config();
    if let Some(dir) = cli.output_dir {
        save_config.save_directory = dir;
    }

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let manager = ExportManager::new(runtime.handle(), config.export.max_pending);
    let ticket = manager.request_export(&state.surface, width, height, save_config)?;

    let path = runtime.block_on(async move {
        let result = ticket.wait().await;
        manager.shutdown().await;
        result
    })?;

    println!("{}", path.display());
    Ok(())
}
