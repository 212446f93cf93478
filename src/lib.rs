// Library exports for the autonomous snake
// This allows the runner binary and the integration tests to use the core
// planning logic

pub mod bot;
pub mod config;
pub mod frontier;
pub mod game;
pub mod grid;
pub mod observer;
pub mod reachability;
pub mod search;
pub mod trace;
pub mod types;
