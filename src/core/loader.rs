//! Read side: fetch both collections and apply the display ordering.

use crate::db::store::Store;
use crate::errors::AppResult;
use crate::models::event::Event;
use crate::models::game::Game;

/// All games in creation order, as returned by the store.
pub fn load_games<S: Store + ?Sized>(store: &mut S) -> AppResult<Vec<Game>> {
    store.select_games()
}

/// All events in display order (see [`sort_events`]).
pub fn load_events<S: Store + ?Sized>(store: &mut S) -> AppResult<Vec<Event>> {
    Ok(sort_events(store.select_events()?))
}

/// Reminder-needed events first, then the rest; each group by ascending
/// `end_at`. Stable: equal deadlines keep their fetch order.
pub fn sort_events(events: Vec<Event>) -> Vec<Event> {
    let (mut reminded, mut others): (Vec<Event>, Vec<Event>) =
        events.into_iter().partition(|e| e.is_remind_needed);

    reminded.sort_by_key(|e| e.end_at);
    others.sort_by_key(|e| e.end_at);

    reminded.extend(others);
    reminded
}

/// For every game (in game order) the first open event of that game in
/// `events` order. Games without an open event are left out.
pub fn representative_events<'a>(games: &'a [Game], events: &'a [Event]) -> Vec<(&'a Game, &'a Event)> {
    games
        .iter()
        .filter_map(|g| {
            events
                .iter()
                .find(|e| e.belongs_to(&g.name) && e.is_open())
                .map(|e| (g, e))
        })
        .collect()
}
