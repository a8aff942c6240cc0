use std::{fmt, str::FromStr, time::Duration};
use tokio::time::Instant;
use crate::error::ParseError;


// Every food the kitchen knows about, raw or prepared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Food {
    Patty,
    Potatoes,
    Cup,
    Bun,
    CookedPatty,
    Fries,
    Drink,
    Burger,
}

// Fixed interaction targets that transform food
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Appliance {
    Grill,
    Fryer,
    DrinkMachine,
    AssemblyStation,
}

// Identifier of an order, sequential from 1 within a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderId(pub u32);

// Identifier of an item on the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PreparedId(pub u32);

// Colour bucket of an order's countdown bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerLevel {
    Green,
    Orange,
    Red,
}

// Customer order; lives until served or missed
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<Food>,
    pub needed: Vec<Food>,
    pub created_at: Instant,
    pub time_limit: Duration,
}

// Intermediate or final product sitting on the counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedItem {
    pub id: PreparedId,
    pub food: Food,
    pub expires_at: Option<Instant>,
}


impl Food {
    pub const INGREDIENTS: [Food; 4] = [Food::Patty, Food::Potatoes, Food::Cup, Food::Bun];

    // Lower-case display name
    pub fn name(&self) -> &'static str {
        match self {
            Food::Patty => "patty",
            Food::Potatoes => "potatoes",
            Food::Cup => "cup",
            Food::Bun => "bun",
            Food::CookedPatty => "cooked patty",
            Food::Fries => "fries",
            Food::Drink => "drink",
            Food::Burger => "burger",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Food::Patty => "🥩",
            Food::Potatoes => "🥔",
            Food::Cup => "🥛",
            Food::Bun => "🍞",
            Food::CookedPatty => "🍳",
            Food::Fries => "🍟",
            Food::Drink => "🥤",
            Food::Burger => "🍔",
        }
    }

    // Raw ingredients come from the pantry, everything else is cooked
    pub fn is_raw(&self) -> bool {
        Food::INGREDIENTS.contains(self)
    }

    // Only the cooked patty can be picked up again from the counter
    pub fn is_movable(&self) -> bool {
        matches!(self, Food::CookedPatty)
    }

    // Finished products vanish after a while; buns wait for assembly
    pub fn auto_expires(&self) -> bool {
        !self.is_movable() && *self != Food::Bun
    }
}

impl fmt::Display for Food {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Food {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "patty" => Ok(Food::Patty),
            "potato" | "potatoes" => Ok(Food::Potatoes),
            "cup" => Ok(Food::Cup),
            "bun" => Ok(Food::Bun),
            "cookedpatty" => Ok(Food::CookedPatty),
            "fries" => Ok(Food::Fries),
            "drink" => Ok(Food::Drink),
            "burger" => Ok(Food::Burger),
            _ => Err(ParseError::UnknownFood(s.to_string())),
        }
    }
}


impl Appliance {
    pub const ALL: [Appliance; 4] = [
        Appliance::Grill,
        Appliance::Fryer,
        Appliance::DrinkMachine,
        Appliance::AssemblyStation,
    ];

    // Name typed by the player
    pub fn name(&self) -> &'static str {
        match self {
            Appliance::Grill => "grill",
            Appliance::Fryer => "fryer",
            Appliance::DrinkMachine => "drink-machine",
            Appliance::AssemblyStation => "assembly-station",
        }
    }
}

impl fmt::Display for Appliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Appliance {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grill" => Ok(Appliance::Grill),
            "fryer" | "fry" => Ok(Appliance::Fryer),
            "drink-machine" | "drink" | "machine" => Ok(Appliance::DrinkMachine),
            "assembly-station" | "assembly" | "station" => Ok(Appliance::AssemblyStation),
            _ => Err(ParseError::UnknownAppliance(s.to_string())),
        }
    }
}


impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for PreparedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

impl FromStr for PreparedId {
    type Err = ParseError;

    // Accepts the `p<n>` labels shown on the counter
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('p')
            .or_else(|| s.strip_prefix('P'))
            .and_then(|digits| digits.parse::<u32>().ok())
            .map(PreparedId)
            .ok_or_else(|| ParseError::UnknownFood(s.to_string()))
    }
}


impl TimerLevel {
    pub fn from_fraction(fraction: f32) -> Self {
        if fraction < 0.25 {
            TimerLevel::Red
        } else if fraction < 0.5 {
            TimerLevel::Orange
        } else {
            TimerLevel::Green
        }
    }
}


impl Order {
    pub fn new(id: OrderId, items: Vec<Food>, created_at: Instant, time_limit: Duration) -> Self {
        Self {
            id,
            needed: items.clone(),
            items,
            created_at,
            time_limit,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.created_at + self.time_limit
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline().saturating_duration_since(now)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.remaining(now).is_zero()
    }

    // Share of the time limit still left, in [0, 1]
    pub fn fraction_remaining(&self, now: Instant) -> f32 {
        if self.time_limit.is_zero() {
            return 0.0;
        }
        (self.remaining(now).as_secs_f32() / self.time_limit.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn timer_level(&self, now: Instant) -> TimerLevel {
        TimerLevel::from_fraction(self.fraction_remaining(now))
    }

    pub fn needs(&self, food: Food) -> bool {
        self.needed.contains(&food)
    }

    // Tick one slot of `food` off the needed list
    pub fn fulfil(&mut self, food: Food) -> bool {
        match self.needed.iter().position(|f| *f == food) {
            Some(idx) => {
                self.needed.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.needed.is_empty()
    }

    // Which entries of `items` are already delivered, matching duplicates one by one
    pub fn delivered_flags(&self) -> Vec<bool> {
        let mut outstanding = self.needed.clone();
        let mut flags = vec![false; self.items.len()];
        for (idx, food) in self.items.iter().enumerate().rev() {
            match outstanding.iter().position(|f| f == food) {
                Some(pos) => {
                    outstanding.remove(pos);
                }
                None => flags[idx] = true,
            }
        }
        flags
    }
}
