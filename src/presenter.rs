//! Table rendering for `todo -list`.
//!
//! Rendering is a pure function of the list: it builds the whole report as a
//! `String` and never touches the tasks it is given. Widths are measured on the
//! plain text, colour escapes are added afterwards so borders stay aligned.

use chrono::{DateTime, Local};
use crossterm::style::{style, Color, Stylize};
use unicode_width::UnicodeWidthStr;

use crate::colors;
use crate::todos::TaskList;

const HEADERS: [&str; 5] = ["#", "Task", "Done?", "CreatedAt", "CompletedAt"];

/// RFC 822-style timestamp, e.g. `02 Jan 06 15:04 +01:00`.
const TIME_FORMAT: &str = "%d %b %y %H:%M %:z";

#[derive(Clone, Copy)]
enum Align {
    Left,
    Center,
    Right,
}

const ALIGN: [Align; 5] = [Align::Right, Align::Left, Align::Center, Align::Right, Align::Right];

struct Cell {
    text: String,
    color: Option<Color>,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Cell { text: text.into(), color: None }
    }

    fn colored(text: impl Into<String>, color: Color) -> Self {
        Cell { text: text.into(), color: Some(color) }
    }

    fn width(&self) -> usize {
        self.text.width()
    }

    /// Pad to `width` display columns, then apply colour if enabled.
    fn render(&self, width: usize, align: Align, use_color: bool) -> String {
        let padded = pad(&self.text, width, align);
        match self.color {
            Some(color) if use_color => style(padded).with(color).to_string(),
            _ => padded,
        }
    }
}

/// Render the list as a box-drawn table followed by a pending-count footer.
pub fn render_table(list: &TaskList, use_color: bool) -> String {
    let rows: Vec<[Cell; 5]> = list
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let (desc, done) = if task.done {
                (
                    Cell::colored(format!("\u{2705} {}", task.description), colors::DONE),
                    Cell::colored("yes", colors::DONE),
                )
            } else {
                (
                    Cell::colored(task.description.clone(), colors::PENDING),
                    Cell::colored("no", colors::PENDING),
                )
            };
            [
                Cell::plain((idx + 1).to_string()),
                desc,
                done,
                Cell::plain(format_time(Some(&task.created_at))),
                Cell::plain(format_time(task.completed_at.as_ref())),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.width()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.width());
        }
    }

    let footer = Cell::colored(pending_summary(list.count_pending()), colors::SUMMARY);
    // Each cell carries one space of padding either side, joined by single separators.
    let inner = widths.iter().map(|w| w + 2).sum::<usize>() + widths.len() - 1;
    if footer.width() + 2 > inner {
        if let Some(last) = widths.last_mut() {
            *last += footer.width() + 2 - inner;
        }
    }
    let inner = widths.iter().map(|w| w + 2).sum::<usize>() + widths.len() - 1;

    let mut out = String::new();
    out.push_str(&border(&widths, '┌', '┬', '┐'));
    let header: Vec<String> = HEADERS
        .iter()
        .zip(&widths)
        .map(|(h, &w)| pad(h, w, Align::Center))
        .collect();
    out.push_str(&row_line(&header));
    out.push_str(&border(&widths, '├', '┼', '┤'));
    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .zip(ALIGN)
            .map(|((cell, &w), align)| cell.render(w, align, use_color))
            .collect();
        out.push_str(&row_line(&cells));
    }
    out.push_str(&border(&widths, '├', '┴', '┤'));
    out.push_str(&format!("│ {} │\n", footer.render(inner - 2, Align::Center, use_color)));
    out.push_str(&format!("└{}┘\n", "─".repeat(inner)));
    out
}

/// Footer text, e.g. "You have 2 pending todos".
pub fn pending_summary(pending: usize) -> String {
    format!("You have {} pending todos", pending)
}

fn format_time(ts: Option<&DateTime<Local>>) -> String {
    match ts {
        Some(ts) => ts.format(TIME_FORMAT).to_string(),
        None => "-".into(),
    }
}

fn border(widths: &[usize], left: char, mid: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{left}{}{right}\n", segments.join(mid.to_string().as_str()))
}

fn row_line(cells: &[String]) -> String {
    format!("│ {} │\n", cells.join(" │ "))
}

fn pad(text: &str, width: usize, align: Align) -> String {
    let gap = width.saturating_sub(text.width());
    let (left, right) = match align {
        Align::Left => (0, gap),
        Align::Right => (gap, 0),
        Align::Center => (gap / 2, gap - gap / 2),
    };
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}
