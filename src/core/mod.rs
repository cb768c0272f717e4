pub mod calculator;
pub mod config;
pub mod event;
pub mod game;
pub mod loader;
pub mod log;
pub mod state;
