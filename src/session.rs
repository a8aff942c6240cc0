use tokio::{
    sync::mpsc,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::{debug, info};
use crate::{
    error::ParseError,
    game::{Game, Snapshot},
    input::Command,
    message::MessageKind,
};


// Apply one player command to the game
fn handle_command(game: &mut Game, command: Command, now: Instant) {
    let result = match command {
        Command::Start => game.start(now),
        Command::Stop => game.stop(now, "Game stopped."),
        Command::Help => {
            game.help(now);
            Ok(())
        }
        Command::Drop { source, appliance } => game.drop_item(source, appliance, now).map(|_| ()),
        Command::Quit => Ok(()),
    };
    if let Err(err) = result {
        debug!(?command, %err, "command refused");
        game.notify(err.to_string(), MessageKind::Error, now);
    }
}


// Own the game on one task: commands and timer ticks are handled strictly in turn
pub async fn run_session(
    mut game: Game,
    mut commands_rx: mpsc::UnboundedReceiver<Result<Command, ParseError>>,
    frames_tx: mpsc::UnboundedSender<Snapshot>,
) -> Game {
    let mut ticker = time::interval(game.settings().tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let _ = frames_tx.send(game.snapshot(Instant::now()));

    loop {
        tokio::select! {
            command = commands_rx.recv() => {
                let now = Instant::now();
                match command {
                    None | Some(Ok(Command::Quit)) => break,
                    Some(Ok(command)) => handle_command(&mut game, command, now),
                    Some(Err(err)) => game.notify(err.to_string(), MessageKind::Error, now),
                }
            }
            _ = ticker.tick() => {
                game.tick(Instant::now());
            }
        }

        // Dashboard gone; nothing left to play for
        if frames_tx.send(game.snapshot(Instant::now())).is_err() {
            break;
        }
    }

    info!(score = game.score(), "session closed");
    game
}


#[cfg(test)]
mod tests {
    use std::time::Duration;
    use super::*;
    use crate::{
        config::GameSettings,
        game::Phase,
        kitchen::DragSource,
        model::{Appliance, Food},
    };

    fn channels() -> (
        mpsc::UnboundedSender<Result<Command, ParseError>>,
        mpsc::UnboundedReceiver<Result<Command, ParseError>>,
        mpsc::UnboundedSender<Snapshot>,
        mpsc::UnboundedReceiver<Snapshot>,
    ) {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (frames_tx, frames_rx) = mpsc::unbounded_channel();
        (commands_tx, commands_rx, frames_tx, frames_rx)
    }

    #[tokio::test(start_paused = true)]
    async fn first_order_shows_up_on_the_dashboard() {
        let (commands_tx, commands_rx, frames_tx, mut frames_rx) = channels();
        let game = Game::new(
            GameSettings {
                spawn_chance: 0.0,
                ..GameSettings::default()
            },
            Some(3),
            Instant::now(),
        );
        let session = tokio::spawn(run_session(game, commands_rx, frames_tx));

        commands_tx.send(Ok(Command::Start)).unwrap();
        time::sleep(Duration::from_millis(2000)).await;
        commands_tx.send(Ok(Command::Quit)).unwrap();
        let game = session.await.unwrap();

        assert!(matches!(game.phase(), Phase::Running { .. }));
        assert_eq!(game.board().len(), 1);

        let mut last = None;
        while let Ok(frame) = frames_rx.try_recv() {
            last = Some(frame);
        }
        assert_eq!(last.unwrap().orders.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cooking_and_typos_reach_the_banner() {
        let (commands_tx, commands_rx, frames_tx, _frames_rx) = channels();
        let game = Game::new(GameSettings::default(), Some(3), Instant::now());
        let session = tokio::spawn(run_session(game, commands_rx, frames_tx));

        commands_tx.send(Ok(Command::Start)).unwrap();
        commands_tx
            .send(Ok(Command::Drop {
                source: DragSource::Ingredient(Food::Patty),
                appliance: Appliance::Grill,
            }))
            .unwrap();
        commands_tx.send(Err(ParseError::UnknownFood("pizza".into()))).unwrap();
        commands_tx.send(Ok(Command::Quit)).unwrap();
        let game = session.await.unwrap();

        assert_eq!(game.kitchen().counter()[0].food, Food::CookedPatty);
        assert_eq!(game.banner().unwrap().text, "Unknown food 'pizza'.");
    }

    #[tokio::test(start_paused = true)]
    async fn refused_commands_are_reported() {
        let (commands_tx, commands_rx, frames_tx, _frames_rx) = channels();
        let game = Game::new(GameSettings::default(), None, Instant::now());
        let session = tokio::spawn(run_session(game, commands_rx, frames_tx));

        commands_tx.send(Ok(Command::Stop)).unwrap();
        drop(commands_tx);
        let game = session.await.unwrap();

        assert_eq!(game.banner().unwrap().text, "Type 'start' to begin a game!");
    }
}
