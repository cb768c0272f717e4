use chrono::{Duration, Local};
use eventboard::core::calculator::deadline::derive_end_time;
use eventboard::core::state::{AppState, EventForm, Modal};
use eventboard::db::pool::DbPool;
use eventboard::db::store::Store;
use eventboard::errors::{AppError, AppResult};
use eventboard::models::end_mode::EndMode;
use eventboard::models::event::{Event, NewEvent};
use eventboard::models::game::{Game, NewGame};

mod common;
use common::{memory_store, titles};

/// SQLite store whose reads or writes can be switched off.
struct FlakyStore {
    inner: DbPool,
    fail_reads: bool,
    fail_writes: bool,
}

impl FlakyStore {
    fn new() -> Self {
        Self {
            inner: memory_store(),
            fail_reads: false,
            fail_writes: false,
        }
    }

    fn offline() -> AppError {
        AppError::Other("store offline".into())
    }
}

impl Store for FlakyStore {
    fn select_games(&mut self) -> AppResult<Vec<Game>> {
        if self.fail_reads {
            return Err(Self::offline());
        }
        self.inner.select_games()
    }

    fn select_events(&mut self) -> AppResult<Vec<Event>> {
        if self.fail_reads {
            return Err(Self::offline());
        }
        self.inner.select_events()
    }

    fn insert_game(&mut self, game: &NewGame) -> AppResult<i64> {
        if self.fail_writes {
            return Err(Self::offline());
        }
        self.inner.insert_game(game)
    }

    fn insert_event(&mut self, event: &NewEvent) -> AppResult<i64> {
        if self.fail_writes {
            return Err(Self::offline());
        }
        self.inner.insert_event(event)
    }

    fn update_completion(&mut self, id: i64, completed: bool) -> AppResult<()> {
        if self.fail_writes {
            return Err(Self::offline());
        }
        self.inner.update_completion(id, completed)
    }
}

fn add_game<S: Store>(state: &mut AppState, store: &mut S, name: &str) -> i64 {
    add_game_at(state, store, name, Local::now())
}

fn add_game_at<S: Store>(
    state: &mut AppState,
    store: &mut S,
    name: &str,
    now: chrono::DateTime<Local>,
) -> i64 {
    state.open_modal(Modal::Game).unwrap();
    state.game_form.name = name.to_string();
    state.submit_game(store, now).unwrap()
}

fn add_event<S: Store>(
    state: &mut AppState,
    store: &mut S,
    game: &str,
    title: &str,
    days: &str,
    remind: bool,
) -> i64 {
    state.select_game(Some(game)).unwrap();
    state.open_modal(Modal::Event).unwrap();
    state.event_form.title = title.to_string();
    state.event_form.set_days_later(days);
    state.event_form.remind_needed = remind;
    state.submit_event(store, Local::now()).unwrap()
}

#[test]
fn games_load_in_creation_order() {
    let mut store = memory_store();
    let mut state = AppState::new(true, true);
    let base = Local::now();

    // Inserted out of chronological order on purpose.
    add_game_at(&mut state, &mut store, "Gamma", base + Duration::seconds(2));
    add_game_at(&mut state, &mut store, "Alpha", base);
    add_game_at(&mut state, &mut store, "Beta", base + Duration::seconds(1));

    let names: Vec<&str> = state.games.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, ["Alpha", "Beta", "Gamma"]);
}

#[test]
fn submit_game_trims_and_resets_the_form() {
    let mut store = memory_store();
    let mut state = AppState::new(true, true);

    state.open_modal(Modal::Game).unwrap();
    state.game_form.name = "  Star Rail  ".into();
    let id = state.submit_game(&mut store, Local::now()).unwrap();

    assert!(id > 0);
    assert_eq!(state.games.len(), 1);
    assert_eq!(state.games[0].name, "Star Rail");
    assert!(state.game_form.name.is_empty());
    assert_eq!(state.modal, None);
    assert_eq!(state.last_error, None);
}

#[test]
fn empty_game_name_is_rejected_and_form_kept() {
    let mut store = memory_store();
    let mut state = AppState::new(true, true);

    state.open_modal(Modal::Game).unwrap();
    state.game_form.name = "   ".into();
    let res = state.submit_game(&mut store, Local::now());

    assert!(matches!(res, Err(AppError::EmptyField("name"))));
    assert_eq!(state.modal, Some(Modal::Game));
    assert_eq!(state.game_form.name, "   ");
    assert!(state.last_error.is_some());
    assert!(store.select_games().unwrap().is_empty());
}

#[test]
fn event_modal_requires_a_selected_game() {
    let mut state = AppState::new(true, true);

    let res = state.open_modal(Modal::Event);
    assert!(matches!(res, Err(AppError::NoGameSelected)));
    assert_eq!(state.modal, None);
}

#[test]
fn selecting_an_unknown_game_fails() {
    let mut store = memory_store();
    let mut state = AppState::new(true, true);
    add_game(&mut state, &mut store, "Alpha");

    assert!(matches!(
        state.select_game(Some("Nope")),
        Err(AppError::GameNotFound(_))
    ));
    assert_eq!(state.selected_game, None);

    state.select_game(Some("Alpha")).unwrap();
    assert_eq!(state.selected_game.as_deref(), Some("Alpha"));
    state.select_game(None).unwrap();
    assert_eq!(state.selected_game, None);
}

#[test]
fn submit_event_derives_the_deadline_and_keeps_remind_flag() {
    let mut store = memory_store();
    let mut state = AppState::new(true, true);
    add_game(&mut state, &mut store, "Alpha");

    state.select_game(Some("Alpha")).unwrap();
    state.open_modal(Modal::Event).unwrap();
    state.event_form.title = "Boss rush".into();
    state.event_form.set_days_later("1");
    state.event_form.set_hours_later("2");
    state.event_form.remind_needed = false;

    let now = Local::now();
    let id = state.submit_event(&mut store, now).unwrap();

    let ev = state.events.iter().find(|e| e.id == id).unwrap();
    let expected = derive_end_time(&EndMode::Offset { days: 1, hours: 2 }, &now).unwrap();
    assert_eq!(ev.end_at, expected);
    assert_eq!(ev.start_at.timestamp_millis(), now.timestamp_millis());
    assert_eq!(ev.game_name, "Alpha");
    assert!(!ev.is_remind_needed);
    assert!(!ev.is_completed);

    // Form cleared except the reminder checkbox.
    assert_eq!(state.event_form, EventForm::new(false));
    assert_eq!(state.modal, None);
}

#[test]
fn fixed_date_event_ends_at_23_59() {
    let mut store = memory_store();
    let mut state = AppState::new(true, true);
    add_game(&mut state, &mut store, "Alpha");

    state.select_game(Some("Alpha")).unwrap();
    state.open_modal(Modal::Event).unwrap();
    state.event_form.title = "Season end".into();
    state.event_form.set_fixed_date("2030-03-15");
    let id = state.submit_event(&mut store, Local::now()).unwrap();

    let ev = state.events.iter().find(|e| e.id == id).unwrap();
    assert_eq!(ev.end_str(), "2030-03-15 23:59");
}

#[test]
fn event_form_modes_are_mutually_exclusive() {
    let mut form = EventForm::new(true);

    form.set_days_later("3");
    form.set_fixed_date("2030-01-01");
    assert_eq!(form.days_later, "0");
    assert_eq!(form.hours_later, "0");
    assert_eq!(form.end_mode().unwrap(), EndMode::FixedDate("2030-01-01".parse().unwrap()));

    form.set_hours_later("5");
    assert!(form.fixed_end_date.is_empty());
    assert_eq!(form.end_mode().unwrap(), EndMode::Offset { days: 0, hours: 5 });
}

#[test]
fn empty_title_is_rejected() {
    let mut store = memory_store();
    let mut state = AppState::new(true, true);
    add_game(&mut state, &mut store, "Alpha");

    state.select_game(Some("Alpha")).unwrap();
    state.open_modal(Modal::Event).unwrap();
    state.event_form.title = " ".into();
    let res = state.submit_event(&mut store, Local::now());

    assert!(matches!(res, Err(AppError::EmptyField("title"))));
    assert!(store.select_events().unwrap().is_empty());
    assert_eq!(state.modal, Some(Modal::Event));
}

#[test]
fn invalid_offset_is_rejected_before_the_store() {
    let mut store = memory_store();
    let mut state = AppState::new(true, true);
    add_game(&mut state, &mut store, "Alpha");

    state.select_game(Some("Alpha")).unwrap();
    state.open_modal(Modal::Event).unwrap();
    state.event_form.title = "Raid".into();
    state.event_form.set_days_later("soon");

    let res = state.submit_event(&mut store, Local::now());
    assert!(matches!(res, Err(AppError::InvalidOffset(_))));
    assert!(store.select_events().unwrap().is_empty());
}

#[test]
fn events_load_reminders_first_then_by_deadline() {
    let mut store = memory_store();
    let mut state = AppState::new(true, true);
    add_game(&mut state, &mut store, "Alpha");

    add_event(&mut state, &mut store, "Alpha", "A", "5", true);
    add_event(&mut state, &mut store, "Alpha", "B", "1", false);
    add_event(&mut state, &mut store, "Alpha", "C", "2", true);

    assert_eq!(titles(&state.events), ["C", "A", "B"]);
}

#[test]
fn toggle_twice_restores_the_flag() {
    let mut store = memory_store();
    let mut state = AppState::new(true, true);
    add_game(&mut state, &mut store, "Alpha");
    let id = add_event(&mut state, &mut store, "Alpha", "Daily", "1", true);

    assert!(state.toggle_completion(&mut store, id).unwrap());
    assert!(state.events.iter().find(|e| e.id == id).unwrap().is_completed);

    assert!(!state.toggle_completion(&mut store, id).unwrap());
    assert!(!state.events.iter().find(|e| e.id == id).unwrap().is_completed);
}

#[test]
fn toggle_unknown_event_fails() {
    let mut store = memory_store();
    let mut state = AppState::new(true, true);

    let res = state.toggle_completion(&mut store, 42);
    assert!(matches!(res, Err(AppError::EventNotFound(42))));
    assert!(matches!(
        store.update_completion(42, true),
        Err(AppError::EventNotFound(42))
    ));
}

#[test]
fn global_view_shows_one_open_event_per_game() {
    let mut store = memory_store();
    let mut state = AppState::new(true, true);
    let base = Local::now();
    add_game_at(&mut state, &mut store, "Alpha", base);
    add_game_at(&mut state, &mut store, "Beta", base + Duration::seconds(1));
    add_game_at(&mut state, &mut store, "Idle", base + Duration::seconds(2));

    let first = add_event(&mut state, &mut store, "Alpha", "first", "1", true);
    add_event(&mut state, &mut store, "Alpha", "second", "3", true);
    add_event(&mut state, &mut store, "Beta", "weekly", "4", true);

    state.select_game(None).unwrap();
    let rows = state.timeline_rows();
    let labels: Vec<(&str, &str)> = rows.iter().map(|r| (r.label, r.event.title.as_str())).collect();
    assert_eq!(labels, [("Alpha", "first"), ("Beta", "weekly")]);

    // Completing the first one promotes the next open event.
    state.toggle_completion(&mut store, first).unwrap();
    let rows = state.timeline_rows();
    assert_eq!(rows[0].event.title, "second");

    // Cards still list everything.
    assert_eq!(state.visible_events().len(), 3);
}

#[test]
fn selected_view_lists_that_games_events() {
    let mut store = memory_store();
    let mut state = AppState::new(true, true);
    add_game(&mut state, &mut store, "Alpha");
    add_game(&mut state, &mut store, "Beta");
    add_event(&mut state, &mut store, "Alpha", "a1", "1", true);
    add_event(&mut state, &mut store, "Beta", "b1", "1", true);
    add_event(&mut state, &mut store, "Alpha", "a2", "2", false);

    state.select_game(Some("Alpha")).unwrap();
    let visible: Vec<&str> = state.visible_events().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(visible, ["a1", "a2"]);

    let rows = state.timeline_rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].label, "a2");
}

#[test]
fn sidebar_toggle_flips() {
    let mut state = AppState::new(true, true);
    state.toggle_sidebar();
    assert!(!state.sidebar_open);
    state.toggle_sidebar();
    assert!(state.sidebar_open);
}

#[test]
fn failed_write_leaves_state_untouched() {
    let mut store = FlakyStore::new();
    let mut state = AppState::new(true, true);
    add_game(&mut state, &mut store, "Alpha");
    let id = add_event(&mut state, &mut store, "Alpha", "Daily", "1", true);

    store.fail_writes = true;
    let before_games = state.games.clone();
    let before_events = state.events.clone();

    state.open_modal(Modal::Game).unwrap();
    state.game_form.name = "Beta".into();
    assert!(state.submit_game(&mut store, Local::now()).is_err());
    assert_eq!(state.game_form.name, "Beta");
    assert_eq!(state.modal, Some(Modal::Game));
    state.close_modal();

    assert!(state.toggle_completion(&mut store, id).is_err());

    assert_eq!(state.games, before_games);
    assert_eq!(state.events, before_events);
    assert_eq!(state.last_error.as_deref(), Some("Internal error: store offline"));

    // The next successful action clears the error.
    store.fail_writes = false;
    state.reload(&mut store).unwrap();
    assert_eq!(state.last_error, None);
}

#[test]
fn failed_reload_keeps_previous_collections() {
    let mut store = FlakyStore::new();
    let mut state = AppState::new(true, true);
    add_game(&mut state, &mut store, "Alpha");
    add_event(&mut state, &mut store, "Alpha", "Daily", "1", true);

    store.fail_reads = true;
    assert!(state.reload(&mut store).is_err());
    assert_eq!(state.games.len(), 1);
    assert_eq!(state.events.len(), 1);
    assert!(state.last_error.is_some());
}

#[test]
fn mutations_are_recorded_in_the_log_table() {
    let mut store = memory_store();
    let mut state = AppState::new(true, true);
    add_game(&mut state, &mut store, "Alpha");
    let id = add_event(&mut state, &mut store, "Alpha", "Daily", "1", true);
    state.toggle_completion(&mut store, id).unwrap();

    let ops: Vec<String> = {
        let mut stmt = store
            .conn
            .prepare("SELECT operation FROM log WHERE operation != 'migration_applied' ORDER BY id")
            .unwrap();
        let rows: Vec<String> = stmt
            .query_map([], |r| r.get(0))
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        rows
    };
    assert_eq!(ops, ["add_game", "add_event", "toggle"]);
}

#[test]
fn committed_write_stands_when_the_refresh_fails() {
    let mut store = FlakyStore::new();
    let mut state = AppState::new(true, true);
    add_game(&mut state, &mut store, "Alpha");
    let id = add_event(&mut state, &mut store, "Alpha", "Daily", "1", true);

    store.fail_reads = true;

    state.open_modal(Modal::Game).unwrap();
    state.game_form.name = "Beta".into();
    let game_id = state.submit_game(&mut store, Local::now()).unwrap();
    assert!(game_id > 0);
    assert_eq!(state.modal, None);
    assert!(state.game_form.name.is_empty());
    // Previous collections kept, the read error reported.
    assert_eq!(state.games.len(), 1);
    assert_eq!(state.last_error.as_deref(), Some("Internal error: store offline"));

    assert!(state.toggle_completion(&mut store, id).unwrap());

    store.fail_reads = false;
    state.reload(&mut store).unwrap();
    let names: Vec<&str> = state.games.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, ["Alpha", "Beta"]);
    assert!(state.events[0].is_completed);
    assert_eq!(state.last_error, None);
}
