use thiserror::Error;
use crate::model::{Appliance, Food, PreparedId};


// Rejected drops; the message is what the player sees on the banner
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CookError {
    #[error("Cannot use {food} on {appliance}!")]
    InvalidCombination { food: Food, appliance: Appliance },

    #[error("Need {needed} for {food}!")]
    MissingPrerequisite { needed: Food, food: Food },

    #[error("Nothing called {0} on the counter!")]
    UnknownPrepared(PreparedId),

    #[error("{0} stays on the counter!")]
    NotMovable(Food),

    #[error("{0} is not a raw ingredient!")]
    NotAnIngredient(Food),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Type 'start' to begin a game!")]
    NotRunning,

    #[error("A game is already running!")]
    AlreadyRunning,

    #[error(transparent)]
    Cook(#[from] CookError),
}

// Typos in player commands
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Type a command, or 'help'.")]
    Empty,

    #[error("Unknown command '{0}'. Type 'help'.")]
    UnknownCommand(String),

    #[error("Unknown food '{0}'.")]
    UnknownFood(String),

    #[error("Unknown appliance '{0}'.")]
    UnknownAppliance(String),

    #[error("Missing {0}. Try: drop patty on grill")]
    MissingArgument(&'static str),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("spawn chance must be within [0, 1], got {0}")]
    SpawnChance(f64),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}
