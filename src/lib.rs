// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod config;
pub mod effects;
pub mod game;
pub mod leaderboard;
pub mod runtime;
pub mod schedule;
pub mod session;
pub mod surface;
