//! Random fleet placement.

use alloc::string::String;
use alloc::vec::Vec;

use log::{debug, warn};
use rand::Rng;

use crate::board::{Board, ShipId};
use crate::common::{FleetError, PlacementErrorKind};
use crate::config::PLACEMENT_ATTEMPTS;
use crate::ship::{Orientation, Ship, ShipSpec};

/// Returns a random valid (row, col, orientation) for `ship`, trying up to
/// `attempts` origins anywhere on the board. A ship the board can never
/// accept returns `None` without drawing.
pub fn random_placement<R: Rng + ?Sized>(
    board: &Board,
    ship: &Ship,
    rng: &mut R,
    attempts: usize,
) -> Option<(usize, usize, Orientation)> {
    if !ship.is_valid_spec(board.config().max_ship_length()) {
        return None;
    }
    let size = board.size();
    for _ in 0..attempts {
        let orientation = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let row = rng.random_range(0..size);
        let col = rng.random_range(0..size);
        if board.validate_placement(ship, row, col, orientation) {
            return Some((row, col, orientation));
        }
    }
    None
}

fn roll_back(board: &mut Board, placed: Vec<ShipId>) {
    for id in placed {
        board.remove_ship(id);
    }
}

/// Place each spec in order, rolling back this call's ships if any one of
/// them cannot be placed.
fn place_specs<'a, R, I>(
    board: &mut Board,
    specs: I,
    rng: &mut R,
) -> Result<Vec<ShipId>, FleetError>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = &'a ShipSpec>,
{
    let mut placed = Vec::new();
    for spec in specs {
        let ship = spec.build();
        if !ship.is_valid_spec(board.config().max_ship_length()) {
            warn!("{} is not a valid ship for this board", spec.name());
            roll_back(board, placed);
            return Err(FleetError::Rejected {
                ship: String::from(spec.name()),
                reason: PlacementErrorKind::InvalidShipSpec,
            });
        }
        let Some((row, col, orientation)) =
            random_placement(board, &ship, rng, PLACEMENT_ATTEMPTS)
        else {
            warn!(
                "gave up placing {} after {} attempts",
                spec.name(),
                PLACEMENT_ATTEMPTS
            );
            roll_back(board, placed);
            return Err(FleetError::PlacementExhausted {
                ship: String::from(spec.name()),
                attempts: PLACEMENT_ATTEMPTS,
            });
        };
        match board.try_place_ship(ship, row, col, orientation) {
            Ok(id) => placed.push(id),
            Err(e) => {
                roll_back(board, placed);
                return Err(FleetError::Rejected {
                    ship: String::from(spec.name()),
                    reason: e.reason(),
                });
            }
        }
    }
    Ok(placed)
}

/// Clear `board` and place the whole `fleet` at random.
///
/// On error the board is left empty. [`FleetError::PlacementExhausted`] is
/// worth retrying; [`FleetError::Rejected`] is not.
pub fn place_fleet_randomly<R: Rng + ?Sized>(
    board: &mut Board,
    fleet: &[ShipSpec],
    rng: &mut R,
) -> Result<Vec<ShipId>, FleetError> {
    board.reset_board();
    place_specs(board, fleet, rng)
}

/// Place only the ships of `fleet` whose names are not on `board` yet,
/// leaving manually placed ships where they are.
pub fn place_missing_ships_randomly<R: Rng + ?Sized>(
    board: &mut Board,
    fleet: &[ShipSpec],
    rng: &mut R,
) -> Result<Vec<ShipId>, FleetError> {
    let missing: Vec<&ShipSpec> = fleet
        .iter()
        .filter(|spec| board.ship_named(spec.name()).is_none())
        .collect();
    debug!("randomizing {} missing ships", missing.len());
    place_specs(board, missing, rng)
}
