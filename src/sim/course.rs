//! Procedural course generation
//!
//! New rows come from a fixed pattern table. The pattern index does a bounded
//! random walk (one step back, stay, or one step forward, wrapping), so the
//! road drifts across the lane instead of jumping between unrelated layouts.

use rand::Rng;

use super::state::Row;
use crate::config::ConfigError;

/// Reference pattern templates, `■` = wall
pub const COURSE_PATTERNS: [&str; 12] = [
    "■■■   ■■■",
    "■■■■   ■■",
    "■■■■■   ■",
    "■■■■■■   ",
    "■■■■■   ■",
    "■■■■   ■■",
    "■■■   ■■■",
    "■■   ■■■■",
    "■   ■■■■■",
    "   ■■■■■■",
    "■   ■■■■■",
    "■■   ■■■■",
];

/// One step of the pattern walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Back,
    Hold,
    Forward,
}

impl Step {
    pub fn offset(self) -> isize {
        match self {
            Step::Back => -1,
            Step::Hold => 0,
            Step::Forward => 1,
        }
    }
}

/// Source of pattern walk steps. The only non-determinism in the core.
pub trait StepSource {
    fn next_step(&mut self) -> Step;
}

/// Uniform steps drawn from any `rand` generator
#[derive(Debug, Clone)]
pub struct RandomSteps<R> {
    rng: R,
}

impl<R: Rng> RandomSteps<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> StepSource for RandomSteps<R> {
    fn next_step(&mut self) -> Step {
        match self.rng.random_range(0..3u8) {
            0 => Step::Back,
            1 => Step::Hold,
            _ => Step::Forward,
        }
    }
}

/// Replays a fixed sequence of steps, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedSteps {
    steps: Vec<Step>,
    cursor: usize,
}

impl ScriptedSteps {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps, cursor: 0 }
    }

    pub fn repeat(step: Step) -> Self {
        Self::new(vec![step])
    }
}

impl StepSource for ScriptedSteps {
    fn next_step(&mut self) -> Step {
        if self.steps.is_empty() {
            return Step::Hold;
        }
        let step = self.steps[self.cursor % self.steps.len()];
        self.cursor = (self.cursor + 1) % self.steps.len();
        step
    }
}

/// Pattern templates decoded into rows once, at startup
#[derive(Debug, Clone, PartialEq)]
pub struct PatternTable {
    rows: Vec<Row>,
}

impl PatternTable {
    /// The reference twelve-pattern table
    pub fn standard() -> Self {
        Self {
            rows: COURSE_PATTERNS.iter().map(|t| Row::from_template(t)).collect(),
        }
    }

    /// Decode a custom table. All templates must share one non-zero width.
    pub fn from_templates<S: AsRef<str>>(templates: &[S]) -> Result<Self, ConfigError> {
        let rows: Vec<Row> = templates
            .iter()
            .map(|t| Row::from_template(t.as_ref()))
            .collect();

        let expected = rows.first().map(Row::width).unwrap_or(0);
        if expected == 0 {
            return Err(ConfigError::EmptyPatternTable);
        }
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.width() != expected) {
            return Err(ConfigError::PatternWidth {
                index,
                expected,
                found: row.width(),
            });
        }

        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width shared by every pattern
    pub fn width(&self) -> usize {
        self.rows.first().map(Row::width).unwrap_or(0)
    }

    /// Row for a pattern index (wraps, so any index is valid)
    pub fn row(&self, index: usize) -> &Row {
        &self.rows[index % self.rows.len()]
    }
}

/// Advance the pattern walk one step, wrapping modulo the table length
pub fn next_pattern_index<S: StepSource + ?Sized>(current: usize, len: usize, steps: &mut S) -> usize {
    let len = len as isize;
    let next = (current as isize % len + steps.next_step().offset() + len) % len;
    next as usize
}

/// Row for a pattern index
pub fn row_from_pattern(table: &PatternTable, index: usize) -> Row {
    table.row(index).clone()
}

/// Draw the next pattern and return its row together with the new index
pub fn generate_new_row<S: StepSource + ?Sized>(
    table: &PatternTable,
    current_pattern: usize,
    steps: &mut S,
) -> (Row, usize) {
    let new_pattern = next_pattern_index(current_pattern, table.len(), steps);
    (row_from_pattern(table, new_pattern), new_pattern)
}
