use log::warn;
use rand::rngs::SmallRng;
use rand::Rng;

use super::Opponent;
use crate::bitboard::Grid;
use crate::board::Board;
use crate::config::BOARD_SIZE;
use crate::geometry::Coordinate;

pub(crate) fn random_coordinate<R: Rng + ?Sized>(rng: &mut R) -> Coordinate {
    let n = BOARD_SIZE as i32;
    Coordinate::new(rng.random_range(0..n), rng.random_range(0..n))
}

/// Uniform draw from `pool`, or from the whole board when the pool is empty.
pub(crate) fn draw_from<R: Rng + ?Sized>(rng: &mut R, pool: &Grid) -> Coordinate {
    if pool.is_empty() {
        warn!("untried pool exhausted, falling back to a random cell");
        return random_coordinate(rng);
    }
    let pick = rng.random_range(0..pool.len());
    pool.nth(pick).unwrap_or_else(|| random_coordinate(rng))
}

/// Easy tier: any cell, every time. Repeats are possible.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomStrategy;

impl RandomStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Opponent for RandomStrategy {
    fn next_move(&mut self, rng: &mut SmallRng, _target: &Board) -> Coordinate {
        random_coordinate(rng)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Moderate tier: random cells drawn without replacement. A shielded shot
/// still uses its cell up.
#[derive(Debug, Clone)]
pub struct UniqueRandomStrategy {
    pool: Grid,
}

impl UniqueRandomStrategy {
    pub fn new() -> Self {
        Self { pool: Grid::full() }
    }

    /// Cells not yet proposed.
    pub fn untried(&self) -> usize {
        self.pool.len()
    }
}

impl Default for UniqueRandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Opponent for UniqueRandomStrategy {
    fn next_move(&mut self, rng: &mut SmallRng, _target: &Board) -> Coordinate {
        let coord = draw_from(rng, &self.pool);
        self.pool.remove(coord);
        coord
    }

    fn name(&self) -> &'static str {
        "unique-random"
    }
}
