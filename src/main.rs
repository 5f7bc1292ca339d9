use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use spottedtext::{Game, MouseButton, config};
use tracing::info;

/// Renders frames of the pointer-driven debug scene to PNG.
#[derive(Parser, Debug)]
#[command(name = "spottedtext", version, about = "Rich-text debug scene renderer")]
struct Args {
    /// Configuration file (defaults to `spottedtext.toml` in the working directory).
    #[arg(long = "config")]
    config: Option<PathBuf>,
    /// Output image.
    #[arg(long = "out", default_value = "frame.png")]
    out: PathBuf,
    #[arg(long = "pointer-x", default_value_t = 0, allow_negative_numbers = true)]
    pointer_x: i32,
    #[arg(long = "pointer-y", default_value_t = 0, allow_negative_numbers = true)]
    pointer_y: i32,
    /// Hold the left button.
    #[arg(long)]
    left: bool,
    /// Hold the right button.
    #[arg(long)]
    right: bool,
    /// Number of update ticks before the frame is drawn.
    #[arg(long, default_value_t = 1)]
    frames: u32,
}

fn configure_logging() {
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("logging disabled: {err}");
    }
}

fn main() -> Result<()> {
    configure_logging();
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(config::discover);
    let cfg = config::load_from(Some(config_path.clone()))?;
    let base_dir = config_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_default();
    let text = cfg
        .text_manager(&base_dir)
        .context("failed to set up fonts")?;

    let mut game = Game::new(&cfg, text);
    let input = game.input_mut();
    input.handle_cursor_moved(args.pointer_x, args.pointer_y);
    input.handle_mouse_input(MouseButton::Left, args.left);
    input.handle_mouse_input(MouseButton::Right, args.right);

    for _ in 0..args.frames {
        game.update()?;
    }
    let frame = game.draw()?;
    frame.save_png(&args.out)?;

    info!(
        out = %args.out.display(),
        score = game.state().score,
        "frame written"
    );
    Ok(())
}
