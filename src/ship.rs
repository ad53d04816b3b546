//! Ship geometry, per-cell damage and the containment test every placement
//! and hit check is built on.

use core::fmt;

use crate::common::BoardError;
use crate::geometry::{Coordinate, Direction};

/// Named ship classes of the standard fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShipKind {
    PatrolBoat,
    Destroyer,
    Submarine,
    Battleship,
    Carrier,
}

impl ShipKind {
    /// Class for a `length` / submarine pair; `None` outside the 2..=5 range.
    pub fn classify(length: usize, submarine: bool) -> Option<Self> {
        match (length, submarine) {
            (2, _) => Some(ShipKind::PatrolBoat),
            (3, true) => Some(ShipKind::Submarine),
            (3, false) => Some(ShipKind::Destroyer),
            (4, _) => Some(ShipKind::Battleship),
            (5, _) => Some(ShipKind::Carrier),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShipKind::PatrolBoat => "Patrol Boat",
            ShipKind::Destroyer => "Destroyer",
            ShipKind::Submarine => "Submarine",
            ShipKind::Battleship => "Battleship",
            ShipKind::Carrier => "Carrier",
        }
    }
}

/// A ship anchored at `origin` and extending `length` cells along `direction`.
///
/// Damage is tracked per cell, indexed from the origin outward. Once every
/// cell is damaged the ship latches to sunk and stays revealed for good.
///
/// Equality compares only length and the submarine flag: two ships are the
/// same fleet slot regardless of where they sit.
#[derive(Clone)]
pub struct Ship {
    kind: ShipKind,
    origin: Coordinate,
    direction: Direction,
    submarine: bool,
    damage: Vec<bool>,
    sunk: bool,
    revealed: bool,
}

impl Ship {
    /// Build an undamaged, revealed ship. Placement on the board is checked
    /// separately with [`Ship::fits_on_board`].
    pub fn new(
        origin: Coordinate,
        direction: Direction,
        length: usize,
        submarine: bool,
    ) -> Result<Self, BoardError> {
        let kind =
            ShipKind::classify(length, submarine).ok_or(BoardError::InvalidLength(length))?;
        Ok(Ship {
            kind,
            origin,
            direction,
            submarine,
            damage: vec![false; length],
            sunk: false,
            revealed: true,
        })
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn length(&self) -> usize {
        self.damage.len()
    }

    pub fn is_submarine(&self) -> bool {
        self.submarine
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    /// Index of the cell at `coord`, if the ship covers it.
    ///
    /// This is the only containment test in the crate; hit resolution,
    /// shield validation and placement conflicts all reduce to it.
    pub fn contains(&self, coord: Coordinate) -> Option<usize> {
        let (dx, dy) = self.direction.delta();
        let rel_x = coord.x - self.origin.x;
        let rel_y = coord.y - self.origin.y;
        let along = if self.direction.is_vertical() {
            if rel_x != 0 {
                return None;
            }
            rel_y * dy
        } else {
            if rel_y != 0 {
                return None;
            }
            rel_x * dx
        };
        (0..self.length() as i32)
            .contains(&along)
            .then_some(along as usize)
    }

    /// Cells covered by the ship, from the origin outward.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let (dx, dy) = self.direction.delta();
        let origin = self.origin;
        (0..self.length() as i32).map(move |i| origin.offset(dx * i, dy * i))
    }

    /// Whether the ship is placeable: the origin is on the board and so is
    /// `origin + length` along the heading. The far edge row or column is
    /// therefore never the last cell of a ship.
    pub fn fits_on_board(&self) -> bool {
        let (dx, dy) = self.direction.delta();
        let len = self.length() as i32;
        self.origin.is_on_board() && self.origin.offset(dx * len, dy * len).is_on_board()
    }

    /// Whether any cell of `self` is covered by `other`.
    pub fn overlaps(&self, other: &Ship) -> bool {
        self.cells().any(|c| other.contains(c).is_some())
    }

    /// Damage the cell at `index`. Returns `true` if the cell was intact.
    /// A `passive` hit only probes and leaves the ship untouched.
    pub fn hit(&mut self, index: usize, passive: bool) -> bool {
        match self.damage.get(index) {
            Some(false) => {}
            _ => return false,
        }
        if !passive {
            self.damage[index] = true;
            if self.damage.iter().all(|&d| d) {
                self.sunk = true;
                self.revealed = true;
            }
        }
        true
    }

    pub fn is_damaged(&self, index: usize) -> bool {
        self.damage.get(index).copied().unwrap_or(false)
    }

    pub fn is_sunk(&self) -> bool {
        self.sunk
    }

    /// First cell that has not been damaged yet.
    pub fn first_intact_cell(&self) -> Option<Coordinate> {
        self.cells()
            .zip(self.damage.iter())
            .find(|&(_, &damaged)| !damaged)
            .map(|(cell, _)| cell)
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Show or hide the ship. A sunk ship stays revealed.
    pub fn set_revealed(&mut self, revealed: bool) {
        self.revealed = revealed || self.sunk;
    }
}

impl PartialEq for Ship {
    fn eq(&self, other: &Self) -> bool {
        self.length() == other.length() && self.submarine == other.submarine
    }
}

impl Eq for Ship {}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ kind: \"{}\", origin: {:?}, direction: {:?}, damage: {:?}, sunk: {} }}",
            self.kind().name(),
            (self.origin.x, self.origin.y),
            self.direction,
            self.damage,
            self.sunk,
        )
    }
}

impl fmt::Display for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {} facing {:?}",
            self.kind().name(),
            self.origin,
            self.direction
        )
    }
}
