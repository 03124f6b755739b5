//! Board dimensions, fleet definitions, and search budgets.

use crate::common::ConfigError;
use crate::ship::ShipSpec;

pub const BOARD_SIZE: usize = 10;
pub const DEFAULT_MAX_SHIP_LENGTH: usize = 5;
/// Maximum ship length used by the stricter rule set.
pub const CLASSIC_MAX_SHIP_LENGTH: usize = 4;

/// Random origins tried per ship before the generator gives up.
pub const PLACEMENT_ATTEMPTS: usize = 100;
/// Hunt draws that insist on checkerboard parity before accepting any cell.
pub const HUNT_PARITY_ATTEMPTS: usize = 50;
/// Hard ceiling on hunt draws in a single selection.
pub const HUNT_ATTEMPT_CEILING: usize = 100;

pub const NUM_SHIPS: usize = 5;
pub const FLEET: [ShipSpec; NUM_SHIPS] = [
    ShipSpec::new("Carrier", 5),
    ShipSpec::new("Battleship", 4),
    ShipSpec::new("Cruiser", 3),
    ShipSpec::new("Submarine", 3),
    ShipSpec::new("Destroyer", 2),
];

/// Total number of ship segments in the canonical fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Look up the canonical spec for a ship name. Returns `None` if the name
/// does not match any ship in [`FLEET`].
pub fn ship_spec_named(name: &str) -> Option<ShipSpec> {
    FLEET.iter().copied().find(|spec| spec.name() == name)
}

/// Grid dimension and the longest ship a board accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardConfig {
    size: usize,
    max_ship_length: usize,
}

impl BoardConfig {
    pub fn new(size: usize, max_ship_length: usize) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::ZeroSize);
        }
        if max_ship_length == 0 || max_ship_length > size {
            return Err(ConfigError::InvalidMaxShipLength {
                max_ship_length,
                size,
            });
        }
        Ok(Self {
            size,
            max_ship_length,
        })
    }

    /// 10×10 board accepting ships up to length 5.
    pub const fn standard() -> Self {
        Self {
            size: BOARD_SIZE,
            max_ship_length: DEFAULT_MAX_SHIP_LENGTH,
        }
    }

    /// 10×10 board accepting ships up to length 4.
    pub const fn classic() -> Self {
        Self {
            size: BOARD_SIZE,
            max_ship_length: CLASSIC_MAX_SHIP_LENGTH,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn max_ship_length(&self) -> usize {
        self.max_ship_length
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Draw budgets for the targeting agent's hunt mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HuntConfig {
    pub parity_attempts: usize,
    pub attempt_ceiling: usize,
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self {
            parity_attempts: HUNT_PARITY_ATTEMPTS,
            attempt_ceiling: HUNT_ATTEMPT_CEILING,
        }
    }
}
