//! Ship definitions and damage tracking.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use crate::common::PlacementErrorKind;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The other orientation.
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Row and column step taken along this axis.
    pub fn step(self) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }
}

impl FromStr for Orientation {
    type Err = PlacementErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "h" | "H" | "horizontal" | "Horizontal" => Ok(Orientation::Horizontal),
            "v" | "V" | "vertical" | "Vertical" => Ok(Orientation::Vertical),
            _ => Err(PlacementErrorKind::InvalidOrientation),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => f.write_str("horizontal"),
            Orientation::Vertical => f.write_str("vertical"),
        }
    }
}

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipSpec {
    name: &'static str,
    length: usize,
}

impl ShipSpec {
    /// Create a new ship type.
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Build an undamaged ship from this spec.
    pub fn build(&self) -> Ship {
        Ship::new(self.name, self.length)
    }
}

/// A ship with its damage state. Placement lives on the board, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    name: String,
    length: usize,
    hit_count: usize,
    sunk: bool,
}

impl Ship {
    pub fn new(name: impl Into<String>, length: usize) -> Self {
        Self {
            name: name.into(),
            length,
            hit_count: 0,
            sunk: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn hit_count(&self) -> usize {
        self.hit_count
    }

    /// Register one more hit on this ship.
    pub fn hit(&mut self) {
        self.hit_count += 1;
        if self.hit_count >= self.length {
            self.sunk = true;
        }
    }

    /// Once sunk, a ship stays sunk.
    pub fn is_sunk(&self) -> bool {
        self.sunk || self.hit_count >= self.length
    }

    /// A spec is sane when the name is non-blank and the length is within
    /// `1..=max_length`.
    pub fn is_valid_spec(&self, max_length: usize) -> bool {
        !self.name.trim().is_empty() && self.length > 0 && self.length <= max_length
    }
}

impl From<ShipSpec> for Ship {
    fn from(spec: ShipSpec) -> Self {
        spec.build()
    }
}
