use std::time::Duration;


// Upper-case the first letter
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

// Fixed-width bar filled according to `fraction`
pub fn progress_bar(fraction: f32, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f32).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

// Seconds with one decimal, e.g. `12.3s`
pub fn format_secs(duration: Duration) -> String {
    format!("{:.1}s", duration.as_secs_f32())
}
