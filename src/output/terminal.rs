//! Terminal output formatting with colors and box drawing.

use colored::Colorize;

use crate::simulator::SimulationRun;
use crate::statistics::summarize;
use crate::types::Channel;

/// Format a SimulationRun for human-readable terminal output.
///
/// Shows the population breakdown and per-channel summary statistics of the
/// compensated table, with the seed needed to replay the run.
pub fn format_run(run: &SimulationRun) -> String {
    let dataset = run.dataset();
    let mut output = String::new();

    let header = format!(
        "{} {}",
        "\u{2713}".green().bold(),
        format!("{} EVENTS GENERATED", dataset.len()).bold()
    );
    output.push_str(&format_box_top());
    output.push_str(&format_box_line(&header));
    output.push_str(&format_box_separator());

    // Population breakdown
    output.push_str(&format_box_line(&"Populations:".bold().to_string()));
    let total = dataset.len().max(1);
    for (name, count) in dataset.counts() {
        let share = 100.0 * count as f64 / total as f64;
        let line = format!("  {name:<14} {count:>8}  ({share:.1}%)");
        output.push_str(&format_box_line(&line));
    }
    output.push_str(&format_box_separator());

    // Channel summaries (post-spillover)
    output.push_str(&format_box_line(&"Channels (compensated):".bold().to_string()));
    for channel in Channel::ALL {
        let summary = summarize(dataset.channel(channel));
        let line = format!(
            "  {:<4} mean {:>8.2}  std {:>7.2}  range [{:.1}, {:.1}]",
            channel.name(),
            summary.mean,
            summary.std,
            summary.min,
            summary.max
        );
        output.push_str(&format_box_line(&line));
    }
    output.push_str(&format_box_separator());

    let seed_line = format!("Seed: {}  ({} ms)", run.seed(), run.elapsed().as_millis());
    output.push_str(&format_box_line(&seed_line.dimmed().to_string()));
    output.push_str(&format_box_bottom());

    output
}

// Box drawing helpers

const BOX_WIDTH: usize = 62;

fn format_box_top() -> String {
    format!("\u{250C}{}\u{2510}\n", "\u{2500}".repeat(BOX_WIDTH))
}

fn format_box_bottom() -> String {
    format!("\u{2514}{}\u{2518}\n", "\u{2500}".repeat(BOX_WIDTH))
}

fn format_box_separator() -> String {
    format!("\u{251C}{}\u{2524}\n", "\u{2500}".repeat(BOX_WIDTH))
}

fn format_box_line(content: &str) -> String {
    let visible_len = strip_ansi_codes(content).chars().count();
    let padding = BOX_WIDTH.saturating_sub(2).saturating_sub(visible_len);
    format!("\u{2502} {}{} \u{2502}\n", content, " ".repeat(padding))
}

/// Strip ANSI escape codes for accurate length calculation.
fn strip_ansi_codes(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip until 'm' (end of ANSI sequence)
            while let Some(&next) = chars.peek() {
                chars.next();
                if next == 'm' {
                    break;
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}
