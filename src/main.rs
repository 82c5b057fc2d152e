use anyhow::Result;
use clap::Parser;
use grid_snake::game::{GameConfig, Position, Speed};
use grid_snake::logging;
use grid_snake::modes::HumanMode;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a fixed grid, played in the terminal")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Start column (defaults to the grid center)
    #[arg(long, requires = "start_y")]
    start_x: Option<i32>,

    /// Start row (defaults to the grid center)
    #[arg(long, requires = "start_x")]
    start_y: Option<i32>,

    /// Tick speed
    #[arg(long, value_enum)]
    speed: Option<Speed>,

    /// Score gained per food
    #[arg(long)]
    growth: Option<u32>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level used with --log-file
    #[arg(long, default_value = "info")]
    log_level: Level,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let (Some(x), Some(y)) = (self.start_x, self.start_y) {
            config.start_position = Some(Position::new(x, y));
        }
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if let Some(growth) = self.growth {
            config.growth_increment = growth;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_file.as_deref(), cli.log_level)?;

    let config = cli.game_config()?;
    tracing::info!(?config, "Starting grid_snake");

    let mut human_mode = HumanMode::new(config)?;
    human_mode.run().await?;

    Ok(())
}
