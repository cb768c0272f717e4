//! Text rendering of the dashboard.
//!
//! `render` is a pure function of the session state and the clock: it
//! never touches the store and never prints.

use crate::core::calculator::remaining::remaining_time;
use crate::core::calculator::timeline::TimelineWindow;
use crate::core::state::{AppState, Modal, TimelineRow};
use crate::errors::AppResult;
use crate::models::event::Event;
use crate::utils::formatting::{count_label, fit_width};
use ansi_term::{Colour, Style};
use chrono::{DateTime, Datelike, Local};
use std::fmt::Write;

/// Columns reserved for bar labels in front of the timeline.
const LABEL_WIDTH: usize = 16;
/// A day never gets fewer columns than this.
const MIN_DAY_WIDTH: usize = 3;

const BAR_OPEN: char = '█';
const BAR_DONE: char = '░';
const NOW_MARK: char = '│';

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub timeline_width: usize,
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            timeline_width: 63,
            color: true,
        }
    }
}

struct Painter {
    color: bool,
}

impl Painter {
    fn paint(&self, style: Style, s: &str) -> String {
        if self.color {
            style.paint(s).to_string()
        } else {
            s.to_string()
        }
    }
}

pub fn render(state: &AppState, now: DateTime<Local>, opts: &RenderOptions) -> AppResult<String> {
    let p = Painter { color: opts.color };
    let window = TimelineWindow::around(&now)?;
    let mut out = String::new();

    render_sidebar(&mut out, state, &p);
    render_title(&mut out, state, &p);
    render_timeline(&mut out, state, &window, &now, opts, &p);
    render_cards(&mut out, state, &now, &p);
    render_modal(&mut out, state, &p);

    if let Some(err) = &state.last_error {
        let _ = writeln!(out, "\n{}", p.paint(Colour::Red.bold(), &format!("⚠ {}", err)));
    }

    Ok(out)
}

fn render_sidebar(out: &mut String, state: &AppState, p: &Painter) {
    if !state.sidebar_open {
        let _ = writeln!(out, "☰");
        return;
    }

    let _ = writeln!(out, "✕ {}", p.paint(Colour::Purple.bold(), "EVENT MANAGER"));

    let all_marker = if state.selected_game.is_none() { "▸" } else { " " };
    let _ = writeln!(out, "  {} 🏠 All", all_marker);

    for g in &state.games {
        let selected = state.selected_game.as_deref() == Some(g.name.as_str());
        let line = if selected {
            format!("  ▸ {}", p.paint(Colour::Purple.bold(), &g.name))
        } else {
            format!("    {}", g.name)
        };
        let _ = writeln!(out, "{}", line);
    }

    let _ = writeln!(out, "    {}", p.paint(Colour::Fixed(244).normal(), "＋ add"));
    let _ = writeln!(out);
}

fn render_title(out: &mut String, state: &AppState, p: &Painter) {
    let title = state.selected_game.as_deref().unwrap_or("Overall schedule");
    let _ = writeln!(out, "{}\n", p.paint(Style::new().bold(), &format!("== {} ==", title)));
}

fn render_timeline(
    out: &mut String,
    state: &AppState,
    window: &TimelineWindow<Local>,
    now: &DateTime<Local>,
    opts: &RenderOptions,
    p: &Painter,
) {
    let day_count = window.days.len().max(1);
    let day_w = (opts.timeline_width / day_count).max(MIN_DAY_WIDTH);
    let cols = day_w * day_count;
    let today = window.today_index(now.date_naive());

    // Day strip: weekday on the first line, day of month on the second.
    let mut weekdays = " ".repeat(LABEL_WIDTH);
    let mut numbers = " ".repeat(LABEL_WIDTH);
    for (i, d) in window.days.iter().enumerate() {
        let wd = fit_width(&d.format("%a").to_string(), day_w);
        let num = fit_width(&d.day().to_string(), day_w);
        if Some(i) == today {
            weekdays.push_str(&p.paint(Colour::Purple.bold(), &wd));
            numbers.push_str(&p.paint(Colour::Purple.bold(), &num));
        } else {
            weekdays.push_str(&p.paint(Colour::Fixed(244).normal(), &wd));
            numbers.push_str(&p.paint(Colour::Fixed(244).normal(), &num));
        }
    }
    let _ = writeln!(out, "{}", weekdays.trim_end());
    let _ = writeln!(out, "{}", numbers.trim_end());

    let rows = state.timeline_rows();
    if rows.is_empty() {
        let _ = writeln!(out, "{}(nothing scheduled)\n", " ".repeat(LABEL_WIDTH));
        return;
    }

    let now_col = to_column(window.position(now), cols).min(cols.saturating_sub(1));

    for row in rows {
        let _ = writeln!(out, "{}", bar_line(&row, window, cols, now_col, p));
    }
    let _ = writeln!(out);
}

fn to_column(percent: f64, cols: usize) -> usize {
    ((percent / 100.0) * cols as f64).round() as usize
}

fn bar_line(row: &TimelineRow<'_>, window: &TimelineWindow<Local>, cols: usize, now_col: usize, p: &Painter) -> String {
    let ev = row.event;
    let bar = window.bar(&ev.start_at, &ev.end_at);

    let from = to_column(bar.left, cols).min(cols.saturating_sub(1));
    let span = to_column(bar.width, cols).max(1);
    let to = (from + span).min(cols);

    let fill = if ev.is_completed { BAR_DONE } else { BAR_OPEN };
    let style = if ev.is_completed {
        Colour::Fixed(250).normal()
    } else {
        Colour::Purple.normal()
    };

    let mut line = fit_width(row.label, LABEL_WIDTH - 1);
    line.push(' ');

    let before: String = (0..from).map(|c| if c == now_col { NOW_MARK } else { ' ' }).collect();
    let filled: String = std::iter::repeat_n(fill, to - from).collect();
    let after: String = (to..cols).map(|c| if c == now_col { NOW_MARK } else { ' ' }).collect();

    line.push_str(&p.paint(Colour::Purple.normal(), &before));
    line.push_str(&p.paint(style, &filled));
    line.push_str(&p.paint(Colour::Purple.normal(), &after));
    line.trim_end().to_string()
}

fn render_cards(out: &mut String, state: &AppState, now: &DateTime<Local>, p: &Painter) {
    let events = state.visible_events();
    let global = state.selected_game.is_none();

    if events.is_empty() {
        let _ = writeln!(out, "No events yet.");
        return;
    }

    for ev in &events {
        let _ = writeln!(out, "{}", card_line(ev, global, now, p));
    }

    let open = events.iter().filter(|e| e.is_open()).count();
    let _ = writeln!(
        out,
        "\n{} · {} open",
        count_label(events.len(), "event"),
        open
    );
}

fn card_line(ev: &Event, global: bool, now: &DateTime<Local>, p: &Painter) -> String {
    let mut head = String::new();
    if !ev.is_remind_needed {
        head.push_str("[Schedule] ");
    }
    if global {
        head.push_str(&format!("[{}] ", ev.game_name));
    }
    head.push_str(&ev.title);

    let remaining = remaining_time(&ev.end_at, now);
    let remaining_style = if remaining.is_ended() {
        Colour::Fixed(244).normal()
    } else {
        Colour::Red.bold()
    };
    let remaining = remaining.to_string();
    let control = if ev.is_completed { "[done]" } else { "[report]" };

    if ev.is_completed {
        let text = format!("#{:<4} {}  {}  {}", ev.id, head, remaining, control);
        return p.paint(Colour::Fixed(244).dimmed(), &text);
    }

    format!(
        "#{:<4} {}  {}  {}",
        ev.id,
        p.paint(Style::new().bold(), &head),
        p.paint(remaining_style, &remaining),
        p.paint(Colour::Green.bold(), control)
    )
}

fn render_modal(out: &mut String, state: &AppState, p: &Painter) {
    let Some(modal) = state.modal else {
        return;
    };

    let _ = writeln!(out);
    match modal {
        Modal::Game => {
            let _ = writeln!(out, "{}", p.paint(Colour::Purple.bold(), "── Add Game ──"));
            let _ = writeln!(out, "  name: {}", state.game_form.name);
        }
        Modal::Event => {
            let f = &state.event_form;
            let _ = writeln!(out, "{}", p.paint(Colour::Purple.bold(), "── New Event ──"));
            let _ = writeln!(out, "  title:  {}", f.title);
            if f.fixed_end_date.is_empty() {
                let _ = writeln!(out, "  ends:   in {}d {}h", f.days_later, f.hours_later);
            } else {
                let _ = writeln!(out, "  ends:   {} 23:59", f.fixed_end_date);
            }
            let _ = writeln!(out, "  remind: {}", if f.remind_needed { "yes" } else { "no" });
        }
    }
}
