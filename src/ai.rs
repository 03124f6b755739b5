//! Hunt/target opponent strategy.
//!
//! In hunt mode the agent searches blindly, preferring checkerboard parity
//! cells since every ship of length two or more covers at least one. A hit
//! on a ship that is still afloat switches to target mode: the struck cell's
//! neighbours go to the front of a pending queue and are tried before any
//! further hunting. Sinking the ship clears the queue and resumes hunting.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use log::debug;
use rand::Rng;

use crate::board::Board;
use crate::common::{AgentError, AttackOutcome, AttackReport, Coord};
use crate::config::HuntConfig;

/// Search mode of the [`TargetingAgent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Hunt,
    Target,
}

/// A resolved shot fired by the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Shot {
    pub coord: Coord,
    pub report: AttackReport,
}

/// Computer opponent. Holds only its own search state; the opponent board is
/// passed in on every call.
#[derive(Debug, Clone)]
pub struct TargetingAgent {
    mode: Mode,
    pending: VecDeque<Coord>,
    hunt: HuntConfig,
}

impl TargetingAgent {
    pub fn new() -> Self {
        Self::with_config(HuntConfig::default())
    }

    pub fn with_config(hunt: HuntConfig) -> Self {
        Self {
            mode: Mode::Hunt,
            pending: VecDeque::new(),
            hunt,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Candidate cells queued by target mode, front first.
    pub fn pending(&self) -> impl Iterator<Item = &Coord> {
        self.pending.iter()
    }

    /// Forget all search state.
    pub fn reset(&mut self) {
        self.mode = Mode::Hunt;
        self.pending.clear();
    }

    /// Pick the next cell to attack on `board`. Never returns a cell that is
    /// already resolved; returns `None` only when every cell is resolved.
    pub fn select_next_attack<R: Rng + ?Sized>(
        &mut self,
        board: &Board,
        rng: &mut R,
    ) -> Option<Coord> {
        while let Some(coord) = self.pending.pop_front() {
            if !board.is_resolved(coord.row, coord.col) {
                return Some(coord);
            }
        }
        self.mode = Mode::Hunt;
        self.hunt(board, rng)
    }

    fn hunt<R: Rng + ?Sized>(&self, board: &Board, rng: &mut R) -> Option<Coord> {
        let candidates = board.unresolved_cells();
        if candidates.is_empty() {
            return None;
        }
        let mut pick = candidates[0];
        for attempt in 0..self.hunt.attempt_ceiling {
            pick = candidates[rng.random_range(0..candidates.len())];
            if attempt >= self.hunt.parity_attempts || pick.is_parity() {
                break;
            }
        }
        Some(pick)
    }

    /// Update search state with the result of attacking `coord`.
    pub fn record_result(&mut self, board: &Board, coord: Coord, report: &AttackReport) {
        if report.outcome != AttackOutcome::Hit {
            return;
        }
        if report.sunk {
            debug!("target at {} sunk, back to hunting", coord);
            self.reset();
            return;
        }
        let fresh: Vec<Coord> = coord
            .neighbors(board.size())
            .filter(|c| !board.is_resolved(c.row, c.col))
            .collect();
        for c in fresh.into_iter().rev() {
            self.pending.push_front(c);
        }
        if self.mode == Mode::Hunt {
            debug!("hit at {}, targeting", coord);
        }
        self.mode = Mode::Target;
    }

    /// Select, fire, and record one shot against `board`. An already
    /// attacked cell does not end the turn; the agent moves on to its next
    /// candidate.
    pub fn take_turn<R: Rng + ?Sized>(
        &mut self,
        board: &mut Board,
        rng: &mut R,
    ) -> Result<Shot, AgentError> {
        loop {
            let coord = self
                .select_next_attack(board, rng)
                .ok_or(AgentError::NoCandidates)?;
            let report = board.receive_attack(coord.row, coord.col)?;
            if report.outcome == AttackOutcome::AlreadyAttacked {
                continue;
            }
            self.record_result(board, coord, &report);
            return Ok(Shot { coord, report });
        }
    }
}

impl Default for TargetingAgent {
    fn default() -> Self {
        Self::new()
    }
}
