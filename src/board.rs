//! Game board: the cell grid, the placed fleet, and attack resolution.

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use log::debug;

use crate::common::{AttackError, AttackReport, Coord, PlacementError, PlacementErrorKind};
use crate::config::BoardConfig;
use crate::ship::{Orientation, Ship, ShipSpec};

/// Handle to a ship placed on a particular board. Stays valid until the ship
/// is removed or the board is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipId(u32);

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Ship(ShipId),
    /// A ship segment that has been struck.
    Hit(ShipId),
    Miss,
}

impl Cell {
    /// Hit and miss cells are terminal.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Cell::Hit(_) | Cell::Miss)
    }

    /// The ship occupying this cell, hit or not.
    pub fn ship(&self) -> Option<ShipId> {
        match *self {
            Cell::Ship(id) | Cell::Hit(id) => Some(id),
            Cell::Empty | Cell::Miss => None,
        }
    }
}

/// Where a ship sits: its origin cell and the axis it extends along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub origin: Coord,
    pub orientation: Orientation,
}

impl Placement {
    pub fn new(row: usize, col: usize, orientation: Orientation) -> Self {
        Self {
            origin: Coord::new(row, col),
            orientation,
        }
    }

    /// Cells covered by a ship of `length` at this placement.
    pub fn cells(&self, length: usize) -> impl Iterator<Item = Coord> {
        let Coord { row, col } = self.origin;
        let (dr, dc) = self.orientation.step();
        (0..length).map(move |i| Coord::new(row + i * dr, col + i * dc))
    }

    /// Offset of `coord` from the origin along the placement axis, if it lies
    /// on that axis at or after the origin.
    pub fn index_of(&self, coord: Coord) -> Option<usize> {
        let Coord { row, col } = self.origin;
        match self.orientation {
            Orientation::Horizontal if coord.row == row => coord.col.checked_sub(col),
            Orientation::Vertical if coord.col == col => coord.row.checked_sub(row),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PlacedShip {
    ship: Ship,
    placement: Placement,
}

/// One player's board.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    config: BoardConfig,
    cells: Vec<Cell>,
    ships: BTreeMap<ShipId, PlacedShip>,
    next_id: u32,
}

impl Board {
    /// Create an empty board.
    pub fn new(config: BoardConfig) -> Self {
        let size = config.size();
        Board {
            config,
            cells: vec![Cell::Empty; size * size],
            ships: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Empty 10×10 board accepting ships up to length 5.
    pub fn standard() -> Self {
        Self::new(BoardConfig::standard())
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn size(&self) -> usize {
        self.config.size()
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        let size = self.size();
        (row < size && col < size).then(|| row * size + col)
    }

    /// The cell at (`row`, `col`), or `None` when out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Returns `true` if the cell has already been hit or missed.
    pub fn is_resolved(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_some_and(|c| c.is_resolved())
    }

    /// Cells not yet hit or missed, in row-major order.
    pub fn unresolved_cells(&self) -> Vec<Coord> {
        let size = self.size();
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_resolved())
            .map(|(i, _)| Coord::new(i / size, i % size))
            .collect()
    }

    /// Run every placement check in order: ship spec, name uniqueness, bounds,
    /// then overlap.
    fn check_placement(
        &self,
        ship: &Ship,
        placement: Placement,
    ) -> Result<(), PlacementErrorKind> {
        if !ship.is_valid_spec(self.config.max_ship_length()) {
            return Err(PlacementErrorKind::InvalidShipSpec);
        }
        if self.ship_named(ship.name()).is_some() {
            return Err(PlacementErrorKind::AlreadyPlaced);
        }
        let size = self.size();
        let Coord { row, col } = placement.origin;
        let (dr, dc) = placement.orientation.step();
        let last = ship.length() - 1;
        if row >= size || col >= size || row + last * dr >= size || col + last * dc >= size {
            return Err(PlacementErrorKind::OutOfBounds);
        }
        if placement
            .cells(ship.length())
            .any(|c| self.cells[c.row * size + c.col] != Cell::Empty)
        {
            return Err(PlacementErrorKind::Overlap);
        }
        Ok(())
    }

    /// Returns `true` if `ship` could be placed at (`row`, `col`) with
    /// `orientation`. Never mutates the board.
    pub fn validate_placement(
        &self,
        ship: &Ship,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> bool {
        self.check_placement(ship, Placement::new(row, col, orientation))
            .is_ok()
    }

    /// Place `ship` if the placement is valid. Returns `None` and leaves the
    /// board untouched otherwise.
    pub fn place_ship(
        &mut self,
        ship: Ship,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Option<ShipId> {
        self.try_place_ship(ship, row, col, orientation).ok()
    }

    /// Place `ship`, reporting why the placement was rejected.
    pub fn try_place_ship(
        &mut self,
        ship: Ship,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<ShipId, PlacementError> {
        let placement = Placement::new(row, col, orientation);
        if let Err(reason) = self.check_placement(&ship, placement) {
            return Err(PlacementError::new(
                reason,
                ship,
                placement.origin,
                orientation,
            ));
        }
        let id = ShipId(self.next_id);
        self.next_id += 1;
        self.commit(id, PlacedShip { ship, placement });
        Ok(id)
    }

    /// Place a canonical ship spec, reporting why the placement was rejected.
    pub fn try_place_spec(
        &mut self,
        spec: ShipSpec,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<ShipId, PlacementError> {
        self.try_place_ship(spec.build(), row, col, orientation)
    }

    fn commit(&mut self, id: ShipId, placed: PlacedShip) {
        let size = self.size();
        for c in placed.placement.cells(placed.ship.length()) {
            self.cells[c.row * size + c.col] = Cell::Ship(id);
        }
        debug!(
            "placed {} at {} {}",
            placed.ship.name(),
            placed.placement.origin,
            placed.placement.orientation
        );
        self.ships.insert(id, placed);
    }

    /// Remove a ship from the board, clearing every cell that references it.
    /// Returns the ship and the placement it had.
    pub fn remove_ship(&mut self, id: ShipId) -> Option<(Ship, Placement)> {
        let placed = self.ships.remove(&id)?;
        for cell in self.cells.iter_mut() {
            if cell.ship() == Some(id) {
                *cell = Cell::Empty;
            }
        }
        Some((placed.ship, placed.placement))
    }

    /// Remove the ship with the given name, if placed.
    pub fn remove_ship_named(&mut self, name: &str) -> Option<(Ship, Placement)> {
        let id = self.ship_named(name)?;
        self.remove_ship(id)
    }

    /// Move a placed ship to a new pose. On rejection the ship is restored to
    /// its previous pose under the same id. A ship that has been hit cannot
    /// be moved.
    pub fn move_ship(
        &mut self,
        id: ShipId,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), PlacementErrorKind> {
        let placed = self.ships.get(&id).ok_or(PlacementErrorKind::UnknownShip)?;
        if placed.ship.hit_count() > 0 {
            return Err(PlacementErrorKind::ShipDamaged);
        }
        let (ship, previous) = self
            .remove_ship(id)
            .ok_or(PlacementErrorKind::UnknownShip)?;
        let target = Placement::new(row, col, orientation);
        let result = self.check_placement(&ship, target);
        let placement = if result.is_ok() { target } else { previous };
        self.commit(id, PlacedShip { ship, placement });
        result
    }

    /// Rotate a placed ship about its origin.
    pub fn rotate_ship(&mut self, id: ShipId) -> Result<(), PlacementErrorKind> {
        let placement = self.placement(id).ok_or(PlacementErrorKind::UnknownShip)?;
        self.move_ship(
            id,
            placement.origin.row,
            placement.origin.col,
            placement.orientation.toggled(),
        )
    }

    /// Resolve an attack at (`row`, `col`).
    ///
    /// Attacking a cell that was already hit or missed returns
    /// [`AttackOutcome::AlreadyAttacked`](crate::AttackOutcome) and changes
    /// nothing.
    pub fn receive_attack(&mut self, row: usize, col: usize) -> Result<AttackReport, AttackError> {
        let idx = self
            .index(row, col)
            .ok_or(AttackError::OutOfBounds { row, col })?;
        match self.cells[idx] {
            Cell::Hit(_) | Cell::Miss => Ok(AttackReport::already_attacked()),
            Cell::Empty => {
                self.cells[idx] = Cell::Miss;
                Ok(AttackReport::miss())
            }
            Cell::Ship(id) => {
                let placed = self
                    .ships
                    .get_mut(&id)
                    .ok_or(AttackError::UnknownShip)?;
                let cell_index = placed
                    .placement
                    .index_of(Coord::new(row, col))
                    .ok_or(AttackError::UnknownShip)?;
                placed.ship.hit();
                let sunk = placed.ship.is_sunk();
                if sunk {
                    debug!("{} sunk", placed.ship.name());
                }
                self.cells[idx] = Cell::Hit(id);
                Ok(AttackReport::hit(id, cell_index, sunk))
            }
        }
    }

    /// Returns `true` when at least one ship is placed and every placed ship
    /// is sunk. An empty board is never defeated.
    pub fn all_ships_sunk(&self) -> bool {
        !self.ships.is_empty() && self.ships.values().all(|p| p.ship.is_sunk())
    }

    /// Clear all cells, ships, and placements.
    pub fn reset_board(&mut self) {
        self.cells.fill(Cell::Empty);
        self.ships.clear();
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(&id).map(|p| &p.ship)
    }

    pub fn placement(&self, id: ShipId) -> Option<Placement> {
        self.ships.get(&id).map(|p| p.placement)
    }

    /// Id of the placed ship with `name`.
    pub fn ship_named(&self, name: &str) -> Option<ShipId> {
        self.ships
            .iter()
            .find(|(_, p)| p.ship.name() == name)
            .map(|(id, _)| *id)
    }

    /// Iterator over placed ships in placement order.
    pub fn ships(&self) -> impl Iterator<Item = (ShipId, &Ship, Placement)> {
        self.ships.iter().map(|(id, p)| (*id, &p.ship, p.placement))
    }

    pub fn ship_count(&self) -> usize {
        self.ships.len()
    }

    /// Names of placed ships in placement order.
    pub fn placed_names(&self) -> impl Iterator<Item = &str> {
        self.ships.values().map(|p| p.ship.name())
    }

    /// Returns `true` when every ship in `fleet` is placed.
    pub fn is_fleet_complete(&self, fleet: &[ShipSpec]) -> bool {
        fleet
            .iter()
            .all(|spec| self.ship_named(spec.name()).is_some())
    }

    /// View of this board with unhit ships hidden.
    pub fn opponent_view(&self) -> OpponentView<'_> {
        OpponentView(self)
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, reveal: bool) -> fmt::Result {
        let size = self.size();
        write!(f, "   ")?;
        for c in 0..size {
            if c < 26 {
                write!(f, " {}", (b'A' + c as u8) as char)?;
            } else {
                write!(f, " ?")?;
            }
        }
        for r in 0..size {
            writeln!(f)?;
            write!(f, "{:3}", r + 1)?;
            for c in 0..size {
                let ch = match self.cells[r * size + c] {
                    Cell::Hit(_) => 'X',
                    Cell::Miss => 'o',
                    Cell::Ship(_) if reveal => 'S',
                    Cell::Ship(_) | Cell::Empty => '.',
                };
                write!(f, " {}", ch)?;
            }
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

/// Grid with ships shown: `S` ship, `X` hit, `o` miss, `.` water.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, true)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("config", &self.config)
            .field("ships", &self.ships)
            .finish_non_exhaustive()?;
        writeln!(f)?;
        self.render(f, true)
    }
}

/// Display adapter that hides ships that have not been hit.
pub struct OpponentView<'a>(&'a Board);

impl fmt::Display for OpponentView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.render(f, false)
    }
}
