//! Host-side session
//!
//! Holds the one "current" state and swaps it for each tick's output. Restart
//! throws the record away and starts a fresh one.

use crate::sim::{GameState, Rules, StepSource, TickInput, create_initial_game_state, update_game_state};

pub struct Session<S> {
    rules: Rules,
    state: GameState,
    steps: S,
    best_distance: u64,
    runs: u32,
}

impl<S: StepSource> Session<S> {
    pub fn new(rules: Rules, steps: S) -> Self {
        let state = create_initial_game_state(rules.config());
        Self {
            rules,
            state,
            steps,
            best_distance: 0,
            runs: 1,
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Longest distance over every run in this session
    pub fn best_distance(&self) -> u64 {
        self.best_distance.max(self.state.scroll_offset)
    }

    /// Runs started, including the current one
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Advance by `delta_ms` and commit the result
    pub fn advance(&mut self, input: &TickInput, delta_ms: f64) -> &GameState {
        let was_over = self.state.game_over;
        let next = update_game_state(&self.state, input, delta_ms, &self.rules, &mut self.steps);
        self.state = next;

        if self.state.game_over && !was_over {
            self.best_distance = self.best_distance.max(self.state.scroll_offset);
            log::info!(
                "Run {} over at distance {} (best {})",
                self.runs,
                self.state.scroll_offset,
                self.best_distance
            );
        }
        &self.state
    }

    /// Advance by one fixed host tick (`1000 / fps` ms)
    pub fn tick(&mut self, input: &TickInput) -> &GameState {
        let dt = self.rules.config().tick_ms();
        self.advance(input, dt)
    }

    /// Discard the current run and start over
    pub fn restart(&mut self) {
        self.best_distance = self.best_distance();
        self.state = create_initial_game_state(self.rules.config());
        self.runs += 1;
        log::debug!("Restarted, run {}", self.runs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Row, ScriptedSteps, Step};

    #[test]
    fn test_session_runs_until_wall() {
        // Stepping back from pattern 0 walks the gap left until it leaves column 4
        let mut session = Session::new(Rules::standard(), ScriptedSteps::repeat(Step::Back));
        let mut ticks = 0;
        while !session.state().game_over {
            session.tick(&TickInput::default());
            ticks += 1;
            assert!(ticks < 10_000, "run never ended");
        }
        let distance = session.state().scroll_offset;
        assert!(distance > 0);
        assert_eq!(session.best_distance(), distance);

        // Terminal state is frozen
        let frozen = session.state().clone();
        session.tick(&TickInput::left());
        assert_eq!(session.state(), &frozen);
    }

    #[test]
    fn test_restart_is_fresh_state() {
        let rules = Rules::standard();
        let mut session = Session::new(rules.clone(), ScriptedSteps::repeat(Step::Hold));
        for _ in 0..30 {
            session.tick(&TickInput::right());
        }
        assert_ne!(session.state(), &create_initial_game_state(rules.config()));
        let distance = session.state().scroll_offset;

        session.restart();
        assert_eq!(session.state(), &create_initial_game_state(rules.config()));
        assert_eq!(session.runs(), 2);
        assert_eq!(session.best_distance(), distance);
    }

    #[test]
    fn test_hold_steps_keep_center_clear() {
        // Pattern 0 leaves columns 3..=5 open, so a centered player survives
        let mut session = Session::new(Rules::standard(), ScriptedSteps::repeat(Step::Hold));
        for _ in 0..600 {
            session.tick(&TickInput::default());
        }
        assert!(!session.state().game_over);
        assert_eq!(session.state().course_rows.len(), 15);
        assert!(session.state().course_rows.iter().all(|r| *r == Row::from_template("■■■   ■■■")));
    }
}
