use colored::Colorize;

use crate::card::CopyIcon;
use crate::deck::{CardView, Frame, FrameBody, Summary};
use crate::pagination::{Button, ControlStrip};

const CLEAR_AND_HOME: &str = "\x1b[2J\x1b[H";

fn image_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

fn render_card(card: &CardView) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>3}  {}{}{} {}\n",
        card.slot.to_string().bold().white(),
        "[".white(),
        image_name(&card.image).dimmed(),
        "]".white(),
        card.title.bold().cyan()
    ));
    if !card.body.is_empty() {
        out.push_str(&format!("     {}\n", card.body));
    }
    match card.revealed.then_some(card.code.as_str()) {
        None => out.push_str(&format!("     {}\n", "[ Show Code ]".bold().yellow())),
        Some(code) => {
            let icon = match card.icon {
                CopyIcon::Copy => card.icon.symbol().white(),
                CopyIcon::Confirmed => card.icon.symbol().bold().green(),
            };
            out.push_str(&format!(
                "     {}  {}{}{}\n",
                code.bold().green(),
                "[".white(),
                icon,
                "]".white()
            ));
        }
    }
    out
}

fn render_button(button: &Button) -> String {
    if button.active {
        format!("({})", button.label).bold().cyan().to_string()
    } else if button.enabled {
        format!("[{}]", button.label).white().to_string()
    } else {
        format!("[{}]", button.label).dimmed().to_string()
    }
}

pub fn render_controls(strip: &ControlStrip) -> String {
    strip
        .buttons
        .iter()
        .map(render_button)
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_summary(summary: &Summary) -> String {
    format!(
        ":: Showing {}-{} of {} :: page {}/{} ::",
        summary.first, summary.last, summary.total, summary.page, summary.total_pages
    )
}

/// Draws one frame. With `ansi` set, a frame that follows a page change
/// clears the screen first so the cards start at the top.
pub fn render_frame(frame: &Frame, ansi: bool) -> String {
    let mut out = String::new();
    if ansi && frame.scroll_to_cards {
        out.push_str(CLEAR_AND_HOME);
    }
    if let Some(summary) = frame.summary.as_ref() {
        out.push_str(&render_summary(summary));
        out.push_str("\n\n");
    }
    match &frame.body {
        FrameBody::Loading => out.push_str(&format!("{}\n", "Loading...".dimmed())),
        FrameBody::Message(message) => {
            out.push_str(&format!("{}\n", message.dimmed()));
        }
        FrameBody::Cards(cards) => {
            for card in cards {
                out.push_str(&render_card(card));
                out.push('\n');
            }
        }
    }
    if !frame.controls.is_empty() {
        out.push_str(&render_controls(&frame.controls));
        out.push('\n');
    }
    out
}
