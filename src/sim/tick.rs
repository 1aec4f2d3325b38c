//! Time-driven state transition
//!
//! One call per host frame: input first, then scrolling. Both stages build a new
//! record; the caller's state is never modified.

use super::collision::check_collision;
use super::course::{StepSource, generate_new_row};
use super::rules::Rules;
use super::state::GameState;
use crate::config::ScrollPolicy;

/// Key names that mean "steer left"
pub const LEFT_KEYS: [&str; 2] = ["ArrowLeft", "left"];
/// Key names that mean "steer right"
pub const RIGHT_KEYS: [&str; 2] = ["ArrowRight", "right"];

/// Steering intents for a single tick, already merged across input sources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    pub fn left() -> Self {
        Self {
            left: true,
            right: false,
        }
    }

    pub fn right() -> Self {
        Self {
            left: false,
            right: true,
        }
    }

    /// Union named key flags into intents. Unknown names are ignored.
    pub fn from_keys<'a, I>(keys: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        let mut input = Self::default();
        for (name, pressed) in keys {
            if !pressed {
                continue;
            }
            if LEFT_KEYS.iter().any(|k| *k == name) {
                input.left = true;
            }
            if RIGHT_KEYS.iter().any(|k| *k == name) {
                input.right = true;
            }
        }
        input
    }

    /// Lateral direction. Right wins when both intents are held.
    pub fn dx(&self) -> isize {
        let mut dx = 0;
        if self.left {
            dx = -1;
        }
        if self.right {
            dx = 1;
        }
        dx
    }
}

/// Apply steering under the repeat delay
pub fn handle_input(state: &GameState, input: &TickInput, delta_ms: f64, rules: &Rules) -> GameState {
    let key_timer = state.key_timer - delta_ms;
    if key_timer > 0.0 {
        return GameState {
            key_timer,
            ..state.clone()
        };
    }

    let dx = input.dx();
    if dx == 0 {
        return GameState {
            key_timer: key_timer.max(0.0),
            ..state.clone()
        };
    }

    let new_x = state.player_x as isize + dx;
    if new_x < 0 || new_x >= rules.cols() as isize {
        // Rejected moves leave the cooldown untouched
        return state.clone();
    }

    let mut next = GameState {
        player_x: new_x as usize,
        key_timer: rules.config().key_repeat_delay_ms,
        ..state.clone()
    };
    if check_collision(new_x, next.player_row as isize, &next.course_rows) {
        log::debug!(
            "Steered into wall at x={} row={} (distance {})",
            new_x,
            next.player_row,
            next.scroll_offset
        );
        next.game_over = true;
    }
    next
}

/// Accumulate scroll time and emit course rows
pub fn handle_scroll<S: StepSource + ?Sized>(
    state: &GameState,
    delta_ms: f64,
    rules: &Rules,
    steps: &mut S,
) -> GameState {
    let interval = rules.config().scroll_interval_ms;
    let mut next = GameState {
        scroll_timer: state.scroll_timer + delta_ms,
        ..state.clone()
    };

    while next.scroll_timer >= interval && !next.game_over {
        next.scroll_timer -= interval;

        let (row, pattern) = generate_new_row(rules.patterns(), next.current_pattern, steps);
        log::trace!("Row {} [{}] pattern {}", next.scroll_offset + 1, row, pattern);
        next.current_pattern = pattern;
        next.course_rows.push_front(row);
        next.course_rows.truncate(rules.rows());
        next.scroll_offset += 1;

        if check_collision(
            next.player_x as isize,
            next.player_row as isize,
            &next.course_rows,
        ) {
            log::debug!(
                "Wall scrolled into player at x={} (distance {})",
                next.player_x,
                next.scroll_offset
            );
            next.game_over = true;
        }

        if rules.config().scroll_policy == ScrollPolicy::SingleRow {
            break;
        }
    }

    next
}

/// Advance the game by `delta_ms`. Game-over states are returned unchanged.
pub fn update_game_state<S: StepSource + ?Sized>(
    state: &GameState,
    input: &TickInput,
    delta_ms: f64,
    rules: &Rules,
    steps: &mut S,
) -> GameState {
    if state.game_over {
        return state.clone();
    }

    let next = handle_input(state, input, delta_ms, rules);
    handle_scroll(&next, delta_ms, rules, steps)
}
