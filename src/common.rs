//! Common types: coordinates, attack results, and the crate's error types.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use thiserror::Error;

use crate::board::ShipId;
use crate::game::Player;
use crate::ship::{Orientation, Ship};

/// A cell position, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Checkerboard parity used by hunt mode.
    pub fn is_parity(&self) -> bool {
        (self.row + self.col) % 2 == 0
    }

    /// In-bounds orthogonal neighbours, in up, down, left, right order.
    pub fn neighbors(&self, size: usize) -> impl Iterator<Item = Coord> {
        let Coord { row, col } = *self;
        [
            row.checked_sub(1).map(|r| Coord::new(r, col)),
            Some(Coord::new(row + 1, col)),
            col.checked_sub(1).map(|c| Coord::new(row, c)),
            Some(Coord::new(row, col + 1)),
        ]
        .into_iter()
        .flatten()
        .filter(move |c| c.row < size && c.col < size)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Coord::new(row, col)
    }
}

/// Renders as column letter plus one-based row, e.g. `C5`.
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.col < 26 {
            write!(f, "{}{}", (b'A' + self.col as u8) as char, self.row + 1)
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

/// Parses typed coordinate entry such as `A5` or `j10`. Bounds against a
/// particular board are checked by the board itself.
impl FromStr for Coord {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let col_ch = chars.next().ok_or(CoordError::Empty)?.to_ascii_uppercase();
        if !col_ch.is_ascii_uppercase() {
            return Err(CoordError::InvalidColumn(col_ch));
        }
        let col = (col_ch as u8 - b'A') as usize;
        let row_str = chars.as_str();
        let row: usize = row_str
            .parse()
            .map_err(|_| CoordError::InvalidRow(String::from(row_str)))?;
        if row == 0 {
            return Err(CoordError::InvalidRow(String::from(row_str)));
        }
        Ok(Coord::new(row - 1, col))
    }
}

/// Resolution of a single attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    Hit,
    Miss,
    /// The cell was already resolved; nothing changed.
    AlreadyAttacked,
}

/// What an attack did, as reported back to the attacker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackReport {
    pub outcome: AttackOutcome,
    /// Ship struck, for `Hit` only.
    pub ship: Option<ShipId>,
    /// Segment struck, counted from the ship's origin along its axis.
    pub cell_index: Option<usize>,
    /// Whether this hit sank the ship.
    pub sunk: bool,
}

impl AttackReport {
    pub(crate) fn miss() -> Self {
        Self {
            outcome: AttackOutcome::Miss,
            ship: None,
            cell_index: None,
            sunk: false,
        }
    }

    pub(crate) fn already_attacked() -> Self {
        Self {
            outcome: AttackOutcome::AlreadyAttacked,
            ship: None,
            cell_index: None,
            sunk: false,
        }
    }

    pub(crate) fn hit(ship: ShipId, cell_index: usize, sunk: bool) -> Self {
        Self {
            outcome: AttackOutcome::Hit,
            ship: Some(ship),
            cell_index: Some(cell_index),
            sunk,
        }
    }

    /// Hit or Miss: the attack used up a turn.
    pub fn is_resolved(&self) -> bool {
        self.outcome != AttackOutcome::AlreadyAttacked
    }
}

/// Reason a placement was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlacementErrorKind {
    #[error("ship placement is out of bounds")]
    OutOfBounds,
    #[error("ship placement overlaps an occupied cell")]
    Overlap,
    #[error("ship spec is invalid")]
    InvalidShipSpec,
    #[error("orientation is not horizontal or vertical")]
    InvalidOrientation,
    #[error("a ship with that name is already placed")]
    AlreadyPlaced,
    #[error("no such ship on the board")]
    UnknownShip,
    /// Ships that have taken hits stay where they are.
    #[error("ship has been hit and cannot be moved")]
    ShipDamaged,
}

/// Error returned by a committing placement. Carries the rejected ship back
/// to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("could not place {} at {} ({}): {}", .ship.name(), .origin, .orientation, .reason)]
pub struct PlacementError {
    reason: PlacementErrorKind,
    ship: Ship,
    origin: Coord,
    orientation: Orientation,
}

impl PlacementError {
    pub(crate) fn new(
        reason: PlacementErrorKind,
        ship: Ship,
        origin: Coord,
        orientation: Orientation,
    ) -> Self {
        Self {
            reason,
            ship,
            origin,
            orientation,
        }
    }

    pub fn reason(&self) -> PlacementErrorKind {
        self.reason
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Take the rejected ship back.
    pub fn into_ship(self) -> Ship {
        self.ship
    }
}

/// Errors from `Board::receive_attack`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AttackError {
    #[error("attack at row {row}, col {col} is out of bounds")]
    OutOfBounds { row: usize, col: usize },
    /// An occupied cell references a ship the board does not hold.
    #[error("cell references an unknown ship")]
    UnknownShip,
}

/// Errors from the random fleet generator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FleetError {
    #[error("could not place {ship} after {attempts} attempts")]
    PlacementExhausted { ship: String, attempts: usize },
    #[error("could not place {ship}: {reason}")]
    Rejected {
        ship: String,
        reason: PlacementErrorKind,
    },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board size must be positive")]
    ZeroSize,
    #[error("max ship length {max_ship_length} must be within 1..={size}")]
    InvalidMaxShipLength { max_ship_length: usize, size: usize },
}

/// Errors parsing typed coordinate entry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoordError {
    #[error("empty coordinate")]
    Empty,
    #[error("invalid column '{0}', expected a letter")]
    InvalidColumn(char),
    #[error("invalid row '{0}', expected a number from 1")]
    InvalidRow(String),
}

/// Errors from the targeting agent's turn loop.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AgentError {
    #[error("no unresolved cells left to attack")]
    NoCandidates,
    #[error(transparent)]
    Attack(#[from] AttackError),
}

/// Errors from game orchestration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("game has not started")]
    NotStarted,
    #[error("game is already in progress")]
    AlreadyStarted,
    #[error("game is finished")]
    Finished,
    #[error("{0:?} has not placed a complete fleet")]
    FleetIncomplete(Player),
    #[error("it is the computer's turn")]
    ComputerTurn,
    #[error("it is not the computer's turn")]
    NotComputerTurn,
    #[error("forfeit is only allowed on the human player's turn")]
    ForfeitNotAllowed,
    #[error(transparent)]
    Attack(#[from] AttackError),
    #[error(transparent)]
    Agent(#[from] AgentError),
    #[error(transparent)]
    Fleet(#[from] FleetError),
}
