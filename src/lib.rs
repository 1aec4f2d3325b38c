//! TextDrive - a single-lane endless driving game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (course generation, collisions, game state)
//! - `config`: Fixed game constants, loaded once at startup
//! - `session`: Minimal host that owns the current state between ticks
//! - `agent`: Q-learning autopilot trained against the simulation

pub mod agent;
pub mod config;
pub mod session;
pub mod sim;

pub use agent::{Action, Agent, AgentError, EpisodeMode, run_episode};
pub use config::{Config, ConfigError, ScrollPolicy};
pub use session::Session;
pub use sim::{GameState, Rules, TickInput, create_initial_game_state, update_game_state};
