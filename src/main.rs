use anyhow::Result;
use clap::Parser;
use tokio::{sync::mpsc, time::Instant};
use tracing::info;
use crate::{
    config::Settings,
    dashboard::dashboard_task,
    game::Game,
    input::input_task,
    session::run_session,
};

mod config;
mod dashboard;
mod error;
mod game;
mod input;
mod kitchen;
mod logging;
mod message;
mod model;
mod orders;
mod random;
mod recipe;
mod session;
mod utils;


#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let settings = Settings::parse();
    logging::init_logging(&settings.log_file, &settings.log_level)?;
    let rules = settings.game_settings()?;
    info!(?rules, seed = ?settings.seed, "starting order-up");

    let (commands_tx, commands_rx) = mpsc::unbounded_channel();
    let (frames_tx, frames_rx) = mpsc::unbounded_channel();

    let dashboard = tokio::spawn(dashboard_task(frames_rx));
    // Finishes by itself after forwarding `quit` or on EOF
    tokio::spawn(input_task(commands_tx));

    let game = Game::new(rules, settings.seed, Instant::now());
    let game = run_session(game, commands_rx, frames_tx).await;
    dashboard.await?;

    println!("Thanks for playing! Final score: {}", game.score());
    Ok(())
}
