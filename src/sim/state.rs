//! Game state and core simulation types
//!
//! The whole run lives in one `GameState` record. Updates never touch a state
//! in place; every tick builds the next record from the previous one.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Glyph used for walls in pattern templates
pub const WALL_GLYPH: char = '■';
/// Glyph used for open cells when rendering a row as text
pub const OPEN_GLYPH: char = ' ';

/// One cell of a course row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Open,
    Wall,
}

impl Cell {
    /// Any glyph other than the wall glyph is open road
    pub fn from_glyph(c: char) -> Self {
        if c == WALL_GLYPH { Cell::Wall } else { Cell::Open }
    }

    pub fn glyph(self) -> char {
        match self {
            Cell::Open => OPEN_GLYPH,
            Cell::Wall => WALL_GLYPH,
        }
    }

    pub fn is_wall(self) -> bool {
        matches!(self, Cell::Wall)
    }
}

/// A fixed-width row of course cells
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Row(Vec<Cell>);

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self(cells)
    }

    /// Decode a textual template, one cell per glyph
    pub fn from_template(template: &str) -> Self {
        Self(template.chars().map(Cell::from_glyph).collect())
    }

    pub fn width(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, x: usize) -> Option<Cell> {
        self.0.get(x).copied()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.0
    }
}

impl From<Vec<Cell>> for Row {
    fn from(cells: Vec<Cell>) -> Self {
        Self(cells)
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.0 {
            write!(f, "{}", cell.glyph())?;
        }
        Ok(())
    }
}

/// Row window, newest row first
pub type CourseRows = VecDeque<Row>;

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Player column, `0..cols`
    pub player_x: usize,
    /// Row the player sits on (fixed for the run)
    pub player_row: usize,
    /// Rows scrolled past; doubles as the distance score
    pub scroll_offset: u64,
    /// Index into the pattern table of the newest row
    pub current_pattern: usize,
    /// Time accumulated towards the next row emission (ms)
    pub scroll_timer: f64,
    /// Cooldown before another lateral move is accepted (ms)
    pub key_timer: f64,
    /// Live row window, newest first, at most `rows` long
    pub course_rows: CourseRows,
    /// Terminal flag; once set the state never changes again
    pub game_over: bool,
}

impl GameState {
    /// Fresh start-of-run state: centered player, idle timers, empty course
    pub fn new(config: &Config) -> Self {
        Self {
            player_x: config.cols / 2,
            player_row: config.player_row(),
            scroll_offset: 0,
            current_pattern: 0,
            scroll_timer: 0.0,
            key_timer: 0.0,
            course_rows: CourseRows::with_capacity(config.rows()),
            game_over: false,
        }
    }

    /// Distance travelled so far
    pub fn distance(&self) -> u64 {
        self.scroll_offset
    }
}

/// Start-of-run record for a new game or a restart
pub fn create_initial_game_state(config: &Config) -> GameState {
    GameState::new(config)
}
