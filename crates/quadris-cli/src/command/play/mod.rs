use quadris_engine::{GameConfig, GravityMode, Seed, TopOutRule};

use crate::{command::play::app::PlayApp, tui::Tui};

mod app;
mod screen;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for the piece sequence, as 32 hex characters
    #[clap(long)]
    seed: Option<Seed>,
    /// Fold one downward step into every turn, on top of the gravity timer
    #[clap(long, default_value_t = false)]
    auto_step_gravity: bool,
    /// When the game counts as lost
    #[clap(long, value_enum, default_value = "spawn-collision")]
    top_out: TopOutArg,
    /// Milliseconds between timed gravity steps
    #[clap(long, default_value_t = 500)]
    gravity_ms: u64,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            auto_step_gravity: false,
            top_out: TopOutArg::SpawnCollision,
            gravity_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum TopOutArg {
    /// Over when the new piece cannot be placed at spawn
    SpawnCollision,
    /// Over when the top row is still occupied after a lock
    TopRow,
}

impl From<TopOutArg> for TopOutRule {
    fn from(arg: TopOutArg) -> Self {
        match arg {
            TopOutArg::SpawnCollision => TopOutRule::SpawnCollision,
            TopOutArg::TopRow => TopOutRule::TopRowOccupied,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let config = GameConfig {
        gravity: if arg.auto_step_gravity {
            GravityMode::AutoStep
        } else {
            GravityMode::Manual
        },
        top_out: arg.top_out.into(),
    };

    let mut app = PlayApp::new(config, arg.seed, arg.gravity_ms);
    Tui::new().run(&mut app)
}
