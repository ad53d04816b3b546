//! Computer opponents.
//!
//! Every difficulty tier implements [`Opponent`]:
//! - [`RandomStrategy`]: uniform shots, repeats allowed
//! - [`UniqueRandomStrategy`]: uniform shots from an untried pool
//! - [`HuntTargetStrategy`]: hunt/target tracking
//! - [`CheatingStrategy`]: hunt/target tracking that peeks at the fleet

mod hunt;
mod random;

pub use hunt::{CheatingStrategy, HuntTargetStrategy, TrackingMode};
pub use random::{RandomStrategy, UniqueRandomStrategy};

use rand::rngs::SmallRng;

use crate::board::Board;
use crate::common::MoveOutcome;
use crate::config::Difficulty;
use crate::geometry::Coordinate;

/// Targeting engine that shoots at a board it does not own.
pub trait Opponent: Send {
    /// Pick the next coordinate to fire at on `target`.
    fn next_move(&mut self, rng: &mut SmallRng, target: &Board) -> Coordinate;

    /// Report the outcome of the engine's last shot so it can adapt.
    /// `target` is the board after the shot was resolved.
    fn register_result(&mut self, _coord: Coordinate, _outcome: MoveOutcome, _target: &Board) {}

    /// Display name of the strategy.
    fn name(&self) -> &'static str;
}

/// The strategy backing a difficulty tier.
pub fn opponent_for(difficulty: Difficulty) -> Box<dyn Opponent> {
    match difficulty {
        Difficulty::Easy => Box::new(RandomStrategy::new()),
        Difficulty::Moderate => Box::new(UniqueRandomStrategy::new()),
        Difficulty::Hard => Box::new(HuntTargetStrategy::new()),
        Difficulty::Extreme => Box::new(CheatingStrategy::new()),
    }
}
