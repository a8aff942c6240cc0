use std::{fmt::Write as _, io::{self, Write}, pin::Pin, time::Duration};
use tokio::sync::mpsc;
use crate::{
    game::{Phase, Snapshot},
    message::MessageKind,
    model::{Appliance, Food, TimerLevel},
    utils::{capitalize, format_secs, progress_bar},
};

const BAR_WIDTH: usize = 20;
const RESET: &str = "\x1B[0m";


fn level_colour(level: TimerLevel) -> &'static str {
    match level {
        TimerLevel::Green => "\x1B[32m",
        TimerLevel::Orange => "\x1B[33m",
        TimerLevel::Red => "\x1B[31m",
    }
}

fn message_colour(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Info => "\x1B[36m",
        MessageKind::Success => "\x1B[32m",
        MessageKind::Error => "\x1B[31m",
    }
}


// Lay out one frame of the dashboard
pub fn render(snapshot: &Snapshot) -> String {
    let mut out = String::new();

    let phase = match snapshot.phase {
        Phase::Idle => "waiting",
        Phase::Running { .. } => "cooking",
        Phase::Over { .. } => "game over",
    };
    let _ = writeln!(
        out,
        "Time: {} | Score: {} | Served: {} | Missed: {} | {}\n",
        format_secs(snapshot.elapsed),
        snapshot.score,
        snapshot.served,
        snapshot.missed,
        phase
    );

    out.push_str("Orders\n");
    out.push_str("order | time left            | items\n");
    out.push_str("----- | -------------------- | -----\n");
    if snapshot.orders.is_empty() {
        out.push_str("  (no customers yet)\n");
    }
    for order in &snapshot.orders {
        let items: Vec<String> = order
            .items
            .iter()
            .map(|(food, done)| {
                let tick = if *done { "✔" } else { " " };
                format!("[{tick}] {} {}", food.icon(), capitalize(food.name()))
            })
            .collect();
        let _ = writeln!(
            out,
            "{:>5} | {}{}{} | {}",
            order.id.to_string(),
            level_colour(order.level),
            progress_bar(order.fraction, BAR_WIDTH),
            RESET,
            items.join("  ")
        );
    }

    out.push_str("\nCounter\n");
    if snapshot.counter.is_empty() {
        out.push_str("  (empty)\n");
    }
    for item in &snapshot.counter {
        let hint = if item.food.is_movable() { "  <- drop on assembly-station" } else { "" };
        let _ = writeln!(
            out,
            "  {:>4}  {} {}{}",
            item.id.to_string(),
            item.food.icon(),
            capitalize(item.food.name()),
            hint
        );
    }

    let pantry: Vec<String> = Food::INGREDIENTS
        .iter()
        .map(|food| format!("{} {}", food.icon(), food.name()))
        .collect();
    let appliances: Vec<&str> = Appliance::ALL.iter().map(|a| a.name()).collect();
    let _ = writeln!(out, "\nPantry:     {}", pantry.join("  "));
    let _ = writeln!(out, "Appliances: {}\n", appliances.join("  "));

    match &snapshot.banner {
        Some(banner) => {
            let _ = writeln!(out, "{}{}{}", message_colour(banner.kind), banner.text, RESET);
        }
        None => out.push('\n'),
    }
    out.push_str("> ");
    out
}

// Render the dashboard to the terminal
pub fn redraw_screen(snapshot: &Snapshot) {
    // Move cursor to top-left and clear screen
    print!("\x1B[H\x1B[0J{}", render(snapshot));
    let _ = io::stdout().flush();
}


pub async fn dashboard_task(mut frames_rx: mpsc::UnboundedReceiver<Snapshot>) {
    let mut latest: Option<Snapshot> = None;
    let debounce = Duration::from_millis(50);

    // Debounce timer: coalesce many frames into one redraw
    let mut pending: Option<Pin<Box<tokio::time::Sleep>>> = None;

    loop {
        tokio::select! {
            frame = frames_rx.recv() => {
                match frame {
                    Some(snapshot) => {
                        // "dirty flag": data changed since last frame
                        let dirty = latest.as_ref() != Some(&snapshot);
                        latest = Some(snapshot);

                        // Start debounce if not already running
                        if dirty && pending.is_none() {
                            pending = Some(Box::pin(tokio::time::sleep(debounce)));
                        }
                    }
                    None => {
                        // Channel closed; do a final render and exit
                        if let Some(snapshot) = &latest {
                            redraw_screen(snapshot);
                        }
                        break;
                    }
                }
            }

            // Debounce fires: redraw once if anything changed
            _ = async {
                if let Some(s) = &mut pending {
                    s.as_mut().await;
                }
            }, if pending.is_some() => {
                if let Some(snapshot) = &latest {
                    redraw_screen(snapshot);
                }
                pending = None;
            }
        }
    }

    println!();
    let _ = io::stdout().flush();
}
