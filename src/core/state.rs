//! Session state of the dashboard.
//!
//! One `AppState` lives for one CLI invocation or one `shell` session.
//! Rendering reads it; every user action goes through one of its methods.

use crate::core::event::{EventLogic, NewEventInput};
use crate::core::game::GameLogic;
use crate::core::loader::{load_events, load_games, representative_events};
use crate::db::store::Store;
use crate::errors::{AppError, AppResult};
use crate::models::end_mode::EndMode;
use crate::models::event::Event;
use crate::models::game::Game;
use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Game,
    Event,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameForm {
    pub name: String,
}

/// Raw values of the event form.
///
/// The offset fields and the fixed date are mutually exclusive: setting
/// one side clears the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventForm {
    pub title: String,
    pub days_later: String,
    pub hours_later: String,
    pub fixed_end_date: String,
    pub remind_needed: bool,
}

impl EventForm {
    pub fn new(remind_needed: bool) -> Self {
        Self {
            title: String::new(),
            days_later: "0".to_string(),
            hours_later: "0".to_string(),
            fixed_end_date: String::new(),
            remind_needed,
        }
    }

    pub fn set_days_later(&mut self, value: &str) {
        self.days_later = value.to_string();
        self.fixed_end_date.clear();
    }

    pub fn set_hours_later(&mut self, value: &str) {
        self.hours_later = value.to_string();
        self.fixed_end_date.clear();
    }

    pub fn set_fixed_date(&mut self, value: &str) {
        self.fixed_end_date = value.to_string();
        self.days_later = "0".to_string();
        self.hours_later = "0".to_string();
    }

    pub fn end_mode(&self) -> AppResult<EndMode> {
        EndMode::from_form(&self.fixed_end_date, &self.days_later, &self.hours_later)
    }

    /// Clear everything except the reminder checkbox.
    fn reset(&mut self) {
        let remind_needed = self.remind_needed;
        *self = Self::new(remind_needed);
    }
}

/// One row of the timeline: what the bar is labelled with and which
/// event gives its extent.
#[derive(Debug, Clone, Copy)]
pub struct TimelineRow<'a> {
    pub label: &'a str,
    pub event: &'a Event,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub games: Vec<Game>,
    pub events: Vec<Event>,
    /// `None` is the global view.
    pub selected_game: Option<String>,
    pub sidebar_open: bool,
    pub modal: Option<Modal>,
    pub game_form: GameForm,
    pub event_form: EventForm,
    /// Last failure of a load or an action; cleared by the next success.
    pub last_error: Option<String>,
}

impl AppState {
    pub fn new(sidebar_open: bool, remind_default: bool) -> Self {
        Self {
            games: Vec::new(),
            events: Vec::new(),
            selected_game: None,
            sidebar_open,
            modal: None,
            game_form: GameForm::default(),
            event_form: EventForm::new(remind_default),
            last_error: None,
        }
    }

    fn fail<T>(&mut self, err: AppError) -> AppResult<T> {
        self.last_error = Some(err.to_string());
        Err(err)
    }

    // ---------------------------
    // Loading
    // ---------------------------

    /// Reload both collections. A collection whose read fails keeps its
    /// previous content; the first error is reported.
    pub fn reload<S: Store + ?Sized>(&mut self, store: &mut S) -> AppResult<()> {
        let mut first_err = None;

        match load_games(store) {
            Ok(games) => self.games = games,
            Err(e) => first_err = Some(e),
        }

        match load_events(store) {
            Ok(events) => self.events = events,
            Err(e) => {
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }

        match first_err {
            Some(e) => self.fail(e),
            None => {
                self.last_error = None;
                Ok(())
            }
        }
    }

    /// Reload after a committed write. The write stands even when the
    /// read fails; the read error stays in `last_error`.
    fn refresh_after_write<S: Store + ?Sized>(&mut self, store: &mut S) {
        let _ = self.reload(store);
    }

    // ---------------------------
    // Selection & layout
    // ---------------------------

    pub fn select_game(&mut self, name: Option<&str>) -> AppResult<()> {
        match name {
            None => {
                self.selected_game = None;
                Ok(())
            }
            Some(n) if self.games.iter().any(|g| g.name == n) => {
                self.selected_game = Some(n.to_string());
                Ok(())
            }
            Some(n) => self.fail(AppError::GameNotFound(n.to_string())),
        }
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn open_modal(&mut self, modal: Modal) -> AppResult<()> {
        if modal == Modal::Event && self.selected_game.is_none() {
            return self.fail(AppError::NoGameSelected);
        }
        self.modal = Some(modal);
        Ok(())
    }

    /// Cancel: close without touching the form fields.
    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    // ---------------------------
    // Mutations
    // ---------------------------

    /// Submit the game form. On success the field is cleared, the modal
    /// closed and everything reloaded; on failure nothing changes.
    pub fn submit_game<S: Store + ?Sized>(&mut self, store: &mut S, now: DateTime<Local>) -> AppResult<i64> {
        let id = match GameLogic::create(store, &self.game_form.name, now) {
            Ok(id) => id,
            Err(e) => return self.fail(e),
        };

        self.game_form = GameForm::default();
        self.modal = None;
        self.refresh_after_write(store);
        Ok(id)
    }

    /// Submit the event form for the selected game.
    pub fn submit_event<S: Store + ?Sized>(&mut self, store: &mut S, now: DateTime<Local>) -> AppResult<i64> {
        let end_mode = match self.event_form.end_mode() {
            Ok(m) => m,
            Err(e) => return self.fail(e),
        };

        let input = NewEventInput {
            game_name: self.selected_game.clone(),
            title: self.event_form.title.clone(),
            end_mode,
            remind_needed: self.event_form.remind_needed,
        };

        let id = match EventLogic::create(store, &input, now) {
            Ok(id) => id,
            Err(e) => return self.fail(e),
        };

        self.event_form.reset();
        self.modal = None;
        self.refresh_after_write(store);
        Ok(id)
    }

    /// Toggle completion of `id` using the flag currently loaded for it.
    /// Both collections are reloaded afterwards.
    pub fn toggle_completion<S: Store + ?Sized>(&mut self, store: &mut S, id: i64) -> AppResult<bool> {
        let loaded = self.events.iter().find(|e| e.id == id).map(|e| e.is_completed);
        let current = match loaded {
            Some(flag) => flag,
            None => return self.fail(AppError::EventNotFound(id)),
        };

        let next = match EventLogic::toggle(store, id, current) {
            Ok(next) => next,
            Err(e) => return self.fail(e),
        };

        self.refresh_after_write(store);
        Ok(next)
    }

    // ---------------------------
    // Derived views
    // ---------------------------

    /// Events shown as cards: the selected game's events, or all of them.
    pub fn visible_events(&self) -> Vec<&Event> {
        match &self.selected_game {
            Some(name) => self.events.iter().filter(|e| e.belongs_to(name)).collect(),
            None => self.events.iter().collect(),
        }
    }

    /// Timeline rows: one per game (its first open event) in the global
    /// view, one per event of the selected game otherwise.
    pub fn timeline_rows(&self) -> Vec<TimelineRow<'_>> {
        match &self.selected_game {
            Some(_) => self
                .visible_events()
                .into_iter()
                .map(|e| TimelineRow {
                    label: &e.title,
                    event: e,
                })
                .collect(),
            None => representative_events(&self.games, &self.events)
                .into_iter()
                .map(|(g, e)| TimelineRow {
                    label: &g.name,
                    event: e,
                })
                .collect(),
        }
    }
}
