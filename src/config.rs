use std::{path::PathBuf, time::Duration};
use clap::Parser;
use crate::error::ConfigError;


/// Cook patties, fries and drinks before the customers give up.
#[derive(Parser, Debug, Clone)]
#[command(name = "order-up", version, about)]
pub struct Settings {
    /// Most orders that can be open at once
    #[arg(long, env = "ORDER_UP_MAX_ORDERS", default_value_t = 5)]
    pub max_orders: usize,

    /// Time a customer waits before the order is missed
    #[arg(long, env = "ORDER_UP_ORDER_TIME_LIMIT_MS", default_value_t = 30_000)]
    pub order_time_limit_ms: u64,

    /// Interval between new-customer rolls
    #[arg(long, env = "ORDER_UP_SPAWN_INTERVAL_MS", default_value_t = 1_000)]
    pub spawn_interval_ms: u64,

    /// Chance that a roll brings a new order
    #[arg(long, env = "ORDER_UP_SPAWN_CHANCE", default_value_t = 0.2)]
    pub spawn_chance: f64,

    /// Delay before the first order of a game
    #[arg(long, env = "ORDER_UP_FIRST_ORDER_DELAY_MS", default_value_t = 1_500)]
    pub first_order_delay_ms: u64,

    /// How long fries, drinks and burgers stay on the counter
    #[arg(long, env = "ORDER_UP_PREPARED_TTL_MS", default_value_t = 2_500)]
    pub prepared_ttl_ms: u64,

    /// Timer resolution of the game loop
    #[arg(long, env = "ORDER_UP_TICK_MS", default_value_t = 100)]
    pub tick_ms: u64,

    #[arg(long, env = "ORDER_UP_POINTS_PER_ITEM", default_value_t = 10)]
    pub points_per_item: u32,

    /// End the game after this many seconds
    #[arg(long, env = "ORDER_UP_ROUND_SECS")]
    pub round_secs: Option<u64>,

    /// End the game after this many missed orders
    #[arg(long, env = "ORDER_UP_MAX_MISSED")]
    pub max_missed: Option<u32>,

    /// Seed for reproducible order sequences
    #[arg(long, env = "ORDER_UP_SEED")]
    pub seed: Option<u64>,

    #[arg(long, env = "ORDER_UP_LOG_FILE", default_value = "order-up.log")]
    pub log_file: PathBuf,

    /// Default filter when RUST_LOG is unset
    #[arg(long, env = "ORDER_UP_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

// Validated game rules
#[derive(Debug, Clone, PartialEq)]
pub struct GameSettings {
    pub max_orders: usize,
    pub order_time_limit: Duration,
    pub spawn_interval: Duration,
    pub spawn_chance: f64,
    pub first_order_delay: Duration,
    pub prepared_ttl: Duration,
    pub tick: Duration,
    pub points_per_item: u32,
    pub round_length: Option<Duration>,
    pub max_missed: Option<u32>,
}


impl Default for GameSettings {
    fn default() -> Self {
        Self {
            max_orders: 5,
            order_time_limit: Duration::from_secs(30),
            spawn_interval: Duration::from_secs(1),
            spawn_chance: 0.2,
            first_order_delay: Duration::from_millis(1500),
            prepared_ttl: Duration::from_millis(2500),
            tick: Duration::from_millis(100),
            points_per_item: 10,
            round_length: None,
            max_missed: None,
        }
    }
}

impl Settings {
    pub fn game_settings(&self) -> Result<GameSettings, ConfigError> {
        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return Err(ConfigError::SpawnChance(self.spawn_chance));
        }
        let positive = [
            ("max-orders", self.max_orders as u64),
            ("order-time-limit-ms", self.order_time_limit_ms),
            ("spawn-interval-ms", self.spawn_interval_ms),
            ("tick-ms", self.tick_ms),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::Zero(*name));
        }
        if self.max_missed == Some(0) {
            return Err(ConfigError::Zero("max-missed"));
        }

        Ok(GameSettings {
            max_orders: self.max_orders,
            order_time_limit: Duration::from_millis(self.order_time_limit_ms),
            spawn_interval: Duration::from_millis(self.spawn_interval_ms),
            spawn_chance: self.spawn_chance,
            first_order_delay: Duration::from_millis(self.first_order_delay_ms),
            prepared_ttl: Duration::from_millis(self.prepared_ttl_ms),
            tick: Duration::from_millis(self.tick_ms),
            points_per_item: self.points_per_item,
            round_length: self.round_secs.filter(|s| *s > 0).map(Duration::from_secs),
            max_missed: self.max_missed,
        })
    }
}
