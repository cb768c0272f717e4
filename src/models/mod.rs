pub mod end_mode;
pub mod event;
pub mod game;
