//! Common types for broadside: move outcomes and board errors.

use core::fmt;

/// Result of resolving one shot against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveOutcome {
    /// The shot struck a ship cell.
    Hit,
    /// The shot struck open water, or was not accepted.
    Miss,
    /// A shield absorbed the shot.
    Shielded,
}

impl MoveOutcome {
    pub fn is_hit(self) -> bool {
        self == MoveOutcome::Hit
    }
}

impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveOutcome::Hit => f.write_str("hit"),
            MoveOutcome::Miss => f.write_str("miss"),
            MoveOutcome::Shielded => f.write_str("shielded"),
        }
    }
}

/// Errors returned while assembling a fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Ship length outside the 2..=5 range.
    InvalidLength(usize),
    /// Some cell of the ship lies off the board.
    ShipOutOfBounds,
    /// Ship placement overlaps another ship.
    ShipOverlaps,
    /// All fleet slots are taken.
    FleetFull,
    /// Ships can only be added before the game starts.
    NotInSetup,
    /// Random placement gave up after its attempt cap.
    UnableToPlaceShip,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidLength(len) => write!(f, "Ship length {} is not between 2 and 5", len),
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            BoardError::FleetFull => write!(f, "Fleet already holds five ships"),
            BoardError::NotInSetup => write!(f, "Ships can only be placed during setup"),
            BoardError::UnableToPlaceShip => write!(f, "Unable to place ship"),
        }
    }
}

impl std::error::Error for BoardError {}
