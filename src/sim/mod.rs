//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Driven by elapsed time supplied by the host
//! - Randomness only through an injected `StepSource`
//! - Every update returns a new `GameState`
//! - No rendering or platform dependencies

pub mod collision;
pub mod course;
pub mod rules;
pub mod state;
pub mod tick;

pub use collision::check_collision;
pub use course::{
    COURSE_PATTERNS, PatternTable, RandomSteps, ScriptedSteps, Step, StepSource, generate_new_row,
    next_pattern_index, row_from_pattern,
};
pub use rules::Rules;
pub use state::{Cell, CourseRows, GameState, Row, create_initial_game_state};
pub use tick::{TickInput, handle_input, handle_scroll, update_game_state};
