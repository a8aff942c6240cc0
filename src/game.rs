// Order/recipe/timer state machine. `Game` owns score, orders, counter and
// banner, and never reads the clock itself: every call takes `now`.

use std::time::Duration;
use rand::rngs::StdRng;
use tokio::time::Instant;
use tracing::{info, warn};
use crate::{
    config::GameSettings,
    error::{CookError, GameError},
    kitchen::{CookOutcome, DragSource, Kitchen},
    message::{Banner, MessageArea, MessageKind},
    model::*,
    orders::OrderBoard,
    random::{game_rng, random_order_items, roll_spawn},
    utils::capitalize,
};

const SHORT: Duration = Duration::from_millis(1500);
const MISSING_PREREQUISITE: Duration = Duration::from_millis(2000);
const SERVED: Duration = Duration::from_millis(2500);
const MISSED: Duration = Duration::from_millis(3000);


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running {
        started_at: Instant,
        first_order_at: Option<Instant>,
        next_roll_at: Instant,
    },
    Over {
        started_at: Instant,
        ended_at: Instant,
    },
}

// What a successful drop led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropReport {
    pub outcome: CookOutcome,
    pub claimed_by: Option<OrderId>,
    pub served: Option<u32>,
}

// What changed during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub spawned: Vec<OrderId>,
    pub missed: Vec<OrderId>,
    pub expired_items: Vec<PreparedId>,
    pub game_over: bool,
}

// Read-only view of one order for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct OrderView {
    pub id: OrderId,
    pub items: Vec<(Food, bool)>,
    pub remaining: Duration,
    pub fraction: f32,
    pub level: TimerLevel,
}

// Everything the dashboard draws
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub phase: Phase,
    pub elapsed: Duration,
    pub score: u32,
    pub served: u32,
    pub missed: u32,
    pub orders: Vec<OrderView>,
    pub counter: Vec<PreparedItem>,
    pub banner: Option<Banner>,
}

pub struct Game {
    settings: GameSettings,
    rng: StdRng,
    phase: Phase,
    score: u32,
    served: u32,
    missed: u32,
    board: OrderBoard,
    kitchen: Kitchen,
    messages: MessageArea,
}


impl Game {
    pub fn new(settings: GameSettings, seed: Option<u64>, now: Instant) -> Self {
        let mut messages = MessageArea::default();
        messages.show("Type 'start' to begin!", MessageKind::Info, None, now);
        Self {
            board: OrderBoard::new(settings.max_orders, settings.order_time_limit),
            kitchen: Kitchen::new(settings.prepared_ttl),
            rng: game_rng(seed),
            settings,
            phase: Phase::Idle,
            score: 0,
            served: 0,
            missed: 0,
            messages,
        }
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    #[cfg(test)]
    pub fn board(&self) -> &OrderBoard {
        &self.board
    }

    #[cfg(test)]
    pub fn kitchen(&self) -> &Kitchen {
        &self.kitchen
    }

    #[cfg(test)]
    pub fn banner(&self) -> Option<&Banner> {
        self.messages.current()
    }

    // Reset everything and schedule the first customer
    pub fn start(&mut self, now: Instant) -> Result<(), GameError> {
        if self.is_running() {
            return Err(GameError::AlreadyRunning);
        }
        self.score = 0;
        self.served = 0;
        self.missed = 0;
        self.board.clear();
        self.kitchen.clear();
        self.phase = Phase::Running {
            started_at: now,
            first_order_at: Some(now + self.settings.first_order_delay),
            next_roll_at: now + self.settings.spawn_interval,
        };
        self.messages.show("Game started!", MessageKind::Success, None, now);
        info!("game started");
        Ok(())
    }

    // Freeze the board; nothing expires or completes afterwards
    pub fn stop(&mut self, now: Instant, reason: &str) -> Result<(), GameError> {
        let Phase::Running { started_at, .. } = self.phase else {
            return Err(GameError::NotRunning);
        };
        self.phase = Phase::Over {
            started_at,
            ended_at: now,
        };
        self.messages.show(
            format!("{reason} Final score: {}", self.score),
            MessageKind::Error,
            None,
            now,
        );
        info!(score = self.score, served = self.served, missed = self.missed, reason, "game over");
        Ok(())
    }

    // Put a transient message on the banner
    pub fn notify(&mut self, text: impl Into<String>, kind: MessageKind, now: Instant) {
        self.messages.show(text, kind, Some(SHORT), now);
    }

    pub fn help(&mut self, now: Instant) {
        self.messages.show(
            "drop <food|pN> on <appliance> | start | stop | quit",
            MessageKind::Info,
            Some(Duration::from_secs(5)),
            now,
        );
    }

    // Drop an ingredient or a counter item onto an appliance
    pub fn drop_item(
        &mut self,
        source: DragSource,
        appliance: Appliance,
        now: Instant,
    ) -> Result<DropReport, GameError> {
        // Deadlines that passed since the last tick count before this drop
        let mut settled = TickReport::default();
        self.settle(now, &mut settled);
        if !self.is_running() {
            let err = GameError::NotRunning;
            if !settled.game_over {
                self.messages.show(err.to_string(), MessageKind::Error, Some(SHORT), now);
            }
            return Err(err);
        }

        let outcome = match self.kitchen.process_drop(source, appliance, now) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(?source, %appliance, %err, "drop rejected");
                let duration = match err {
                    CookError::MissingPrerequisite { .. } => MISSING_PREREQUISITE,
                    _ => SHORT,
                };
                self.messages.show(err.to_string(), MessageKind::Error, Some(duration), now);
                return Err(err.into());
            }
        };

        let (id, food) = match outcome {
            CookOutcome::Staged { .. } => {
                self.messages
                    .show("Bun ready for assembly.", MessageKind::Info, Some(SHORT), now);
                return Ok(DropReport {
                    outcome,
                    claimed_by: None,
                    served: None,
                });
            }
            CookOutcome::Cooked { id, food } => (id, food),
        };
        self.messages.show(
            format!("{} ready!", capitalize(food.name())),
            MessageKind::Success,
            Some(SHORT),
            now,
        );

        let Some(claim) = self.board.claim(food) else {
            return Ok(DropReport {
                outcome,
                claimed_by: None,
                served: None,
            });
        };
        self.kitchen.remove_prepared(id);
        let served = if claim.completed {
            self.serve(claim.order, now)
        } else {
            None
        };
        Ok(DropReport {
            outcome,
            claimed_by: Some(claim.order),
            served,
        })
    }

    fn serve(&mut self, id: OrderId, now: Instant) -> Option<u32> {
        let order = self.board.remove(id)?;
        let points = order.items.len() as u32 * self.settings.points_per_item;
        self.score += points;
        self.served += 1;
        self.messages.show(
            format!("Order {} served! +{points} pts", order.id),
            MessageKind::Success,
            Some(SERVED),
            now,
        );
        info!(order = %order.id, points, score = self.score, "order served");
        Some(points)
    }

    fn spawn_order(&mut self, now: Instant) -> Option<OrderId> {
        if self.board.is_full() {
            return None;
        }
        let items = random_order_items(&mut self.rng);
        let id = self.board.spawn(items, now)?;
        info!(order = %id, items = ?self.board.get(id).map(|o| &o.items), "new order");
        Some(id)
    }

    // Advance every timer up to `now`
    pub fn tick(&mut self, now: Instant) -> TickReport {
        let mut report = TickReport::default();
        self.messages.expire(now);

        let Phase::Running {
            started_at,
            mut first_order_at,
            mut next_roll_at,
        } = self.phase
        else {
            return report;
        };

        if first_order_at.is_some_and(|at| at <= now) {
            first_order_at = None;
            report.spawned.extend(self.spawn_order(now));
        }
        while next_roll_at <= now {
            next_roll_at += self.settings.spawn_interval;
            if !self.board.is_full() && roll_spawn(&mut self.rng, self.settings.spawn_chance) {
                report.spawned.extend(self.spawn_order(now));
            }
        }
        self.phase = Phase::Running {
            started_at,
            first_order_at,
            next_roll_at,
        };

        self.settle(now, &mut report);
        report
    }

    // Apply every deadline up to `now`: missed orders, spoiled items, game-over rules
    fn settle(&mut self, now: Instant, report: &mut TickReport) {
        let Phase::Running { started_at, .. } = self.phase else {
            return;
        };

        for order in self.board.expire(now) {
            self.missed += 1;
            self.messages.show(
                format!("Order {} missed!", order.id),
                MessageKind::Error,
                Some(MISSED),
                now,
            );
            info!(order = %order.id, needed = ?order.needed, "order missed");
            report.missed.push(order.id);
        }

        report
            .expired_items
            .extend(self.kitchen.expire(now).into_iter().map(|item| item.id));

        let reason = if self
            .settings
            .round_length
            .is_some_and(|length| now.duration_since(started_at) >= length)
        {
            Some("Time's up!")
        } else if self.settings.max_missed.is_some_and(|max| self.missed >= max) {
            Some("Too many missed orders!")
        } else {
            None
        };
        if let Some(reason) = reason {
            report.game_over = self.stop(now, reason).is_ok();
        }
    }

    // Timers are read at `now` while running, frozen at the end time afterwards
    pub fn snapshot(&self, now: Instant) -> Snapshot {
        let (clock, elapsed) = match self.phase {
            Phase::Idle => (now, Duration::ZERO),
            Phase::Running { started_at, .. } => (now, now.duration_since(started_at)),
            Phase::Over { started_at, ended_at } => {
                (ended_at, ended_at.duration_since(started_at))
            }
        };
        let orders = self
            .board
            .orders()
            .iter()
            .map(|order| OrderView {
                id: order.id,
                items: order
                    .items
                    .iter()
                    .copied()
                    .zip(order.delivered_flags())
                    .collect(),
                remaining: order.remaining(clock),
                fraction: order.fraction_remaining(clock),
                level: order.timer_level(clock),
            })
            .collect();
        Snapshot {
            phase: self.phase,
            elapsed,
            score: self.score,
            served: self.served,
            missed: self.missed,
            orders,
            counter: self.kitchen.counter().to_vec(),
            banner: self.messages.current().cloned(),
        }
    }
}
