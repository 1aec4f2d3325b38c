//! Q-learning autopilot
//!
//! A tabular agent that sees a small window of the course ahead of the player
//! and learns when to steer. Episodes run against the real simulation through a
//! `Session`, so the agent plays by exactly the same rules as a human would.

use std::fs;
use std::io;
use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::session::Session;
use crate::sim::{GameState, RandomSteps, Rules, TickInput, check_collision};

pub const NUM_ACTIONS: usize = 3;
/// Rows observed ahead of the player
const VIEW_AHEAD: isize = 3;
/// Columns observed either side of the player
const VIEW_RANGE: isize = 2;
/// One bit per observed cell
pub const STATE_SIZE: usize = 1usize << ((VIEW_AHEAD * (2 * VIEW_RANGE + 1)) as u32);

const ALPHA: f64 = 0.2;
const GAMMA: f64 = 0.95;
const EPSILON_DECAY: f64 = 0.9995;

const COLLISION_REWARD: f64 = -100.0;
const SURVIVAL_REWARD: f64 = 1.0;

#[derive(thiserror::Error, Debug)]
pub enum AgentError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid agent json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("q-table has {found} states, expected {expected}")]
    TableSize { expected: usize, found: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Left,
    Stay,
    Right,
}

impl Action {
    pub const ALL: [Action; NUM_ACTIONS] = [Action::Left, Action::Stay, Action::Right];

    pub fn index(self) -> usize {
        match self {
            Action::Left => 0,
            Action::Stay => 1,
            Action::Right => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Single-tick steering tap for this action
    pub fn to_input(self) -> TickInput {
        match self {
            Action::Left => TickInput::left(),
            Action::Stay => TickInput::default(),
            Action::Right => TickInput::right(),
        }
    }
}

/// Whether an episode updates the Q-table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeMode {
    /// Epsilon-greedy play with learning
    Train,
    /// Greedy play, table untouched
    Play,
}

/// Encode walls in the rows just ahead of the player as a bit mask
pub fn observe(state: &GameState) -> usize {
    let mut mask = 0usize;
    let mut bit = 0;
    for ahead in 1..=VIEW_AHEAD {
        let row = state.player_row as isize - ahead;
        for dx in -VIEW_RANGE..=VIEW_RANGE {
            let x = state.player_x as isize + dx;
            if check_collision(x, row, &state.course_rows) {
                mask |= 1 << bit;
            }
            bit += 1;
        }
    }
    mask
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    q: Vec<[f64; NUM_ACTIONS]>,
    pub epsilon: f64,
    pub best_distance: u64,
    pub episodes: u64,
}

impl Default for Agent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent {
    pub fn new() -> Self {
        Self {
            q: vec![[0.0; NUM_ACTIONS]; STATE_SIZE],
            epsilon: 1.0,
            best_distance: 0,
            episodes: 0,
        }
    }

    pub fn q_values(&self, state: usize) -> &[f64; NUM_ACTIONS] {
        &self.q[state % STATE_SIZE]
    }

    pub fn decay_epsilon(&mut self) {
        self.epsilon = (self.epsilon * EPSILON_DECAY).max(0.0);
    }

    /// Highest-valued action; ties go to the later action
    pub fn best_action(&self, state: usize) -> Action {
        let values = self.q_values(state);
        Action::ALL
            .iter()
            .copied()
            .max_by(|a, b| {
                values[a.index()]
                    .partial_cmp(&values[b.index()])
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(Action::Stay)
    }

    /// Epsilon-greedy choice
    pub fn choose_action<R: Rng + ?Sized>(&self, state: usize, rng: &mut R) -> Action {
        if rng.random::<f64>() < self.epsilon {
            Action::from_index(rng.random_range(0..NUM_ACTIONS)).unwrap_or(Action::Stay)
        } else {
            self.best_action(state)
        }
    }

    /// One-step Q-learning update
    pub fn learn(&mut self, state: usize, action: Action, reward: f64, next_state: usize) {
        let max_next = self
            .q_values(next_state)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let entry = &mut self.q[state % STATE_SIZE][action.index()];
        let target = reward + GAMMA * max_next;
        *entry += ALPHA * (target - *entry);
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AgentError> {
        let json = serde_json::to_string(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!(
            "Saved agent to {} ({} episodes, best {})",
            path.as_ref().display(),
            self.episodes,
            self.best_distance
        );
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AgentError> {
        let json = fs::read_to_string(path.as_ref())?;
        let agent = Self::from_json_str(&json)?;
        log::info!(
            "Loaded agent from {} ({} episodes, best {})",
            path.as_ref().display(),
            agent.episodes,
            agent.best_distance
        );
        Ok(agent)
    }

    pub fn from_json_str(json: &str) -> Result<Self, AgentError> {
        let agent: Agent = serde_json::from_str(json)?;
        if agent.q.len() != STATE_SIZE {
            return Err(AgentError::TableSize {
                expected: STATE_SIZE,
                found: agent.q.len(),
            });
        }
        Ok(agent)
    }
}

/// Play one run to game over (or `max_rows`) and return the distance reached.
///
/// The agent decides on the first tick and again after every new row; each
/// decision is a one-tick tap. `seed` drives both the course and exploration.
pub fn run_episode(agent: &mut Agent, rules: &Rules, seed: u64, max_rows: u64, mode: EpisodeMode) -> u64 {
    let mut session = Session::new(rules.clone(), RandomSteps::new(Pcg32::seed_from_u64(seed)));
    let mut explore = Pcg32::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15);

    let decide = |agent: &Agent, obs: usize, explore: &mut Pcg32| match mode {
        EpisodeMode::Train => agent.choose_action(obs, explore),
        EpisodeMode::Play => agent.best_action(obs),
    };

    let mut obs = observe(session.state());
    let mut action = decide(&*agent, obs, &mut explore);
    let mut input = action.to_input();
    let mut distance = 0;

    loop {
        let state = session.tick(&input);
        input = TickInput::default();

        if state.game_over {
            distance = state.scroll_offset;
            if mode == EpisodeMode::Train {
                let next_obs = observe(state);
                agent.learn(obs, action, COLLISION_REWARD, next_obs);
            }
            break;
        }

        if state.scroll_offset != distance {
            distance = state.scroll_offset;
            let next_obs = observe(state);
            if mode == EpisodeMode::Train {
                agent.learn(obs, action, SURVIVAL_REWARD, next_obs);
            }
            if distance >= max_rows {
                break;
            }
            obs = next_obs;
            action = decide(&*agent, obs, &mut explore);
            input = action.to_input();
        }
    }

    if mode == EpisodeMode::Train {
        agent.episodes += 1;
        agent.decay_epsilon();
    }
    agent.best_distance = agent.best_distance.max(distance);
    distance
}
