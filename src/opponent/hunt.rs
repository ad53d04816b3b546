//! Hunt/target tracking shared by the Hard and Extreme tiers.
//!
//! The tracker searches at random until a shot hits. From that first hit
//! (the contact) it probes the four neighbours clockwise, and once a second
//! hit fixes the ship's axis it follows that axis away from the contact,
//! reversing once at the first miss. A sunk ship, detected through the target
//! board's live ship count, returns the tracker to searching.

use log::{debug, warn};
use rand::rngs::SmallRng;

use super::random::draw_from;
use super::Opponent;
use crate::bitboard::Grid;
use crate::board::Board;
use crate::common::MoveOutcome;
use crate::config::CHEAT_INTERVAL;
use crate::geometry::{Coordinate, Direction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingMode {
    /// No live contact; shots are random.
    Searching,
    /// One hit; probing its neighbours for the ship's axis.
    Hunting,
    /// Axis known; walking along it.
    Tracking,
}

#[derive(Debug, Clone)]
struct TrackingState {
    pool: Grid,
    struck: Grid,
    mode: TrackingMode,
    contact: Option<Coordinate>,
    hits: Vec<Coordinate>,
    prohibited: [bool; 4],
    heading: Direction,
    flipped: bool,
    /// Target's live ship count when the pending shot was chosen.
    ships_before: Option<usize>,
}

impl TrackingState {
    fn new() -> Self {
        Self {
            pool: Grid::full(),
            struck: Grid::new(),
            mode: TrackingMode::Searching,
            contact: None,
            hits: Vec::new(),
            prohibited: [false; 4],
            heading: Direction::Right,
            flipped: false,
            ships_before: None,
        }
    }

    fn lose_contact(&mut self) {
        self.mode = TrackingMode::Searching;
        self.contact = None;
        self.hits.clear();
        self.prohibited = [false; 4];
        self.heading = Direction::Right;
        self.flipped = false;
    }

    /// First untried cell from `from` along `direction`, stepping over
    /// cells already hit. `None` at a miss or the board edge.
    fn walk(&self, from: Coordinate, direction: Direction) -> Option<Coordinate> {
        let mut cell = from.step(direction);
        while self.struck.contains(cell) {
            cell = cell.step(direction);
        }
        self.pool.contains(cell).then_some(cell)
    }

    /// Next open neighbour of the contact, clockwise from the heading.
    fn probe(&mut self) -> Option<Coordinate> {
        let contact = self.contact?;
        let mut direction = self.heading;
        for _ in 0..4 {
            if !self.prohibited[direction.ordinal()] {
                match self.walk(contact, direction) {
                    Some(cell) => {
                        self.heading = direction;
                        return Some(cell);
                    }
                    None => self.prohibited[direction.ordinal()] = true,
                }
            }
            direction = direction.rotate_right();
        }
        warn!("no open neighbour around contact {}, dropping it", contact);
        self.lose_contact();
        None
    }

    /// Continue along the locked axis, reversing once; when both ends are
    /// closed the hits belong to more than one ship, so go back to probing
    /// across the axis.
    fn follow(&mut self) -> Option<Coordinate> {
        let contact = self.contact?;
        if let Some(cell) = self.walk(contact, self.heading) {
            return Some(cell);
        }
        if !self.flipped {
            self.flipped = true;
            self.heading = self.heading.opposite();
            if let Some(cell) = self.walk(contact, self.heading) {
                return Some(cell);
            }
        }
        debug!("axis through {} closed at both ends, probing across it", contact);
        self.prohibited[self.heading.ordinal()] = true;
        self.prohibited[self.heading.opposite().ordinal()] = true;
        self.hits = vec![contact];
        self.flipped = false;
        self.mode = TrackingMode::Hunting;
        self.probe()
    }

    fn next_move(&mut self, rng: &mut SmallRng, target: &Board) -> Coordinate {
        self.ships_before = Some(target.ships_remaining());
        let planned = match self.mode {
            TrackingMode::Searching => None,
            TrackingMode::Hunting => self.probe(),
            TrackingMode::Tracking => self.follow(),
        };
        let coord = planned.unwrap_or_else(|| draw_from(rng, &self.pool));
        self.pool.remove(coord);
        coord
    }

    fn register_result(&mut self, coord: Coordinate, outcome: MoveOutcome, target: &Board) {
        match outcome {
            MoveOutcome::Shielded => {
                self.pool.insert(coord);
            }
            MoveOutcome::Hit => {
                self.pool.remove(coord);
                self.struck.insert(coord);
            }
            MoveOutcome::Miss => {
                self.pool.remove(coord);
            }
        }

        if let Some(before) = self.ships_before.take() {
            if target.ships_remaining() < before {
                debug!("ship sunk at {}, back to searching", coord);
                self.lose_contact();
                return;
            }
        }

        if outcome != MoveOutcome::Hit {
            return;
        }
        match self.mode {
            TrackingMode::Searching => {
                self.contact = Some(coord);
                self.hits = vec![coord];
                self.mode = TrackingMode::Hunting;
                debug!("contact at {}", coord);
            }
            TrackingMode::Hunting => {
                self.hits.push(coord);
                self.flipped = false;
                self.mode = TrackingMode::Tracking;
                debug!("axis locked heading {:?}", self.heading);
            }
            TrackingMode::Tracking => self.hits.push(coord),
        }
    }
}

/// Hard tier.
#[derive(Debug, Clone)]
pub struct HuntTargetStrategy {
    state: TrackingState,
}

impl HuntTargetStrategy {
    pub fn new() -> Self {
        Self {
            state: TrackingState::new(),
        }
    }

    pub fn mode(&self) -> TrackingMode {
        self.state.mode
    }

    /// Hits recorded against the ship currently being tracked.
    pub fn tracked_hits(&self) -> &[Coordinate] {
        &self.state.hits
    }
}

impl Default for HuntTargetStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Opponent for HuntTargetStrategy {
    fn next_move(&mut self, rng: &mut SmallRng, target: &Board) -> Coordinate {
        self.state.next_move(rng, target)
    }

    fn register_result(&mut self, coord: Coordinate, outcome: MoveOutcome, target: &Board) {
        self.state.register_result(coord, outcome, target);
    }

    fn name(&self) -> &'static str {
        "hunt-target"
    }
}

/// Extreme tier: hunt/target tracking that, while searching, takes a sure
/// hit from the target's fleet every [`CHEAT_INTERVAL`] moves.
#[derive(Debug, Clone)]
pub struct CheatingStrategy {
    inner: HuntTargetStrategy,
}

impl CheatingStrategy {
    pub fn new() -> Self {
        Self {
            inner: HuntTargetStrategy::new(),
        }
    }

    pub fn mode(&self) -> TrackingMode {
        self.inner.mode()
    }

    fn cheat(&mut self, target: &Board) -> Option<Coordinate> {
        if self.inner.mode() != TrackingMode::Searching
            || target.move_count() % CHEAT_INTERVAL != 0
        {
            return None;
        }
        let coord = target.cheat_move()?;
        debug!("peeking at the fleet: {}", coord);
        let state = &mut self.inner.state;
        state.ships_before = Some(target.ships_remaining());
        state.pool.remove(coord);
        Some(coord)
    }
}

impl Default for CheatingStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Opponent for CheatingStrategy {
    fn next_move(&mut self, rng: &mut SmallRng, target: &Board) -> Coordinate {
        match self.cheat(target) {
            Some(coord) => coord,
            None => self.inner.next_move(rng, target),
        }
    }

    fn register_result(&mut self, coord: Coordinate, outcome: MoveOutcome, target: &Board) {
        self.inner.register_result(coord, outcome, target);
    }

    fn name(&self) -> &'static str {
        "cheating"
    }
}
