use core::time::Duration;

/// End-of-game statistics for one board. Built once when the fleet is
/// wiped out and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameplayResult {
    hits: u32,
    moves: u32,
    ships_sunk: usize,
    duration: Duration,
}

impl GameplayResult {
    pub fn new(hits: u32, moves: u32, ships_sunk: usize, duration: Duration) -> Self {
        Self {
            hits,
            moves,
            ships_sunk,
            duration,
        }
    }

    /// Moves that struck a ship.
    pub fn hits(&self) -> u32 {
        self.hits
    }

    /// Every counted move, hit or not.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn ships_sunk(&self) -> usize {
        self.ships_sunk
    }

    /// Time between the game starting and the final hit.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Hit ratio as a whole percentage, rounded to nearest.
    pub fn percent_hits(&self) -> u32 {
        if self.moves == 0 {
            return 0;
        }
        (f64::from(self.hits) * 100.0 / f64::from(self.moves)).round() as u32
    }
}
