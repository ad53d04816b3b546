//! Board state: fleet, shields, move counters, the special-ability meter and
//! the setup/active/finished phase machine.

use std::sync::Arc;
use std::time::Instant;

use core::fmt;
use log::{debug, info, warn};
use rand::Rng;

use crate::bitboard::Grid;
use crate::common::{BoardError, MoveOutcome};
use crate::config::{GameConfig, BOARD_SIZE, PLACEMENT_ATTEMPT_CAP, SHIP_LENGTHS, SUBMARINE_SLOT};
use crate::events::{EventSink, GameEvent};
use crate::fleet::FleetCollection;
use crate::geometry::{Coordinate, Direction};
use crate::meter::SpecialMeter;
use crate::ship::{Ship, ShipKind};
use crate::stats::GameplayResult;

/// Lifecycle of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Fleet is being assembled; shots are not accepted.
    Setup,
    /// Combat in progress.
    Active,
    /// Every ship has been sunk.
    Finished,
}

/// Special abilities resolved by the board itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpecialMove {
    /// 3×3 block of shots around the center.
    Nuke,
    /// Five shots in a vertical line through the center.
    StrafingRun,
    /// Expose one hidden ship.
    Reveal,
}

/// What a successful special move did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialOutcome {
    /// Shots fired by a nuke or strafing run, in firing order.
    Salvo(Vec<(Coordinate, MoveOutcome)>),
    /// Kind of the ship that was revealed; `None` when nothing was hidden.
    Revealed(Option<ShipKind>),
}

impl SpecialOutcome {
    /// Outcomes of the salvo, empty for a reveal.
    pub fn outcomes(&self) -> Vec<MoveOutcome> {
        match self {
            SpecialOutcome::Salvo(shots) => shots.iter().map(|&(_, o)| o).collect(),
            SpecialOutcome::Revealed(_) => Vec::new(),
        }
    }
}

pub struct Board {
    fleet: FleetCollection,
    shielded: Grid,
    fired: Grid,
    hits: Vec<Coordinate>,
    moves: u32,
    hit_count: u32,
    meter: SpecialMeter,
    started: Instant,
    ai_owned: bool,
    phase: Phase,
    result: Option<GameplayResult>,
    sink: Arc<dyn EventSink>,
}

impl Board {
    fn build(
        fleet: FleetCollection,
        ai_owned: bool,
        config: &GameConfig,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Board {
            fleet,
            shielded: Grid::new(),
            fired: Grid::new(),
            hits: Vec::new(),
            moves: 0,
            hit_count: 0,
            meter: SpecialMeter::new(config.meter_tick, Arc::clone(&sink)),
            started: Instant::now(),
            ai_owned,
            phase: Phase::Setup,
            result: None,
            sink,
        }
    }

    /// A player's board around an already assembled fleet. Ships stay
    /// visible and the board never accrues the special meter.
    pub fn with_fleet(fleet: FleetCollection, sink: Arc<dyn EventSink>) -> Self {
        Self::build(fleet, false, &GameConfig::default(), sink)
    }

    /// An AI-owned board with a freshly generated, hidden fleet.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        config: &GameConfig,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, BoardError> {
        let fleet = generate_random_fleet(rng)?;
        let mut board = Self::build(fleet, true, config, sink);
        board.set_ship_rendering(false);
        Ok(board)
    }

    /// An AI-owned board around an explicit fleet, e.g. a known layout.
    pub fn ai_with_fleet(
        fleet: FleetCollection,
        config: &GameConfig,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self::build(fleet, true, config, sink)
    }

    /// Add a ship while the board is in setup.
    pub fn add_ship(&mut self, ship: Ship) -> Result<(), BoardError> {
        if self.phase != Phase::Setup {
            return Err(BoardError::NotInSetup);
        }
        if self.fleet.is_full() {
            return Err(BoardError::FleetFull);
        }
        if !ship.fits_on_board() {
            return Err(BoardError::ShipOutOfBounds);
        }
        if self.fleet.conflicts(&ship) {
            return Err(BoardError::ShipOverlaps);
        }
        self.fleet.add(ship)
    }

    /// Take a ship equal to `ship` back out of the fleet during setup.
    pub fn remove_ship(&mut self, ship: &Ship) -> bool {
        self.phase == Phase::Setup && self.fleet.remove(ship).is_some()
    }

    /// Enter combat: resets the counters, the meter and the clock.
    pub fn start(&mut self) {
        self.moves = 0;
        self.hit_count = 0;
        self.hits.clear();
        self.fired.clear();
        self.result = None;
        self.meter.reset();
        self.started = Instant::now();
        self.phase = if self.fleet.is_empty() {
            Phase::Finished
        } else {
            Phase::Active
        };
        info!(
            "board started with {} ships (ai_owned={})",
            self.fleet.remaining(),
            self.ai_owned
        );
    }

    /// Resolve a shot at `coord`.
    ///
    /// Off-board shots, and shots outside the active phase, are misses that
    /// do not count as moves.
    pub fn enter_move(&mut self, coord: Coordinate) -> MoveOutcome {
        if !coord.is_on_board() {
            return MoveOutcome::Miss;
        }
        if self.phase != Phase::Active {
            debug!("ignoring shot at {} during {:?}", coord, self.phase);
            return MoveOutcome::Miss;
        }

        self.moves += 1;
        self.fired.insert(coord);
        if self.ai_owned {
            self.meter.earn();
        }

        let outcome = if self.shielded.remove(coord) {
            MoveOutcome::Shielded
        } else if self.fleet.try_move(coord, false) {
            self.hits.push(coord);
            self.hit_count += 1;
            MoveOutcome::Hit
        } else {
            MoveOutcome::Miss
        };
        debug!("shot at {} -> {}", coord, outcome);
        self.sink.emit(GameEvent::MoveResolved {
            coordinate: coord,
            outcome,
        });

        if outcome.is_hit() && self.fleet.is_empty() {
            self.finish();
        }
        outcome
    }

    fn finish(&mut self) {
        self.phase = Phase::Finished;
        let sunk = self.fleet.iter().filter(|s| s.is_sunk()).count();
        let result = GameplayResult::new(self.hit_count, self.moves, sunk, self.started.elapsed());
        self.result = Some(result);
        info!(
            "fleet destroyed after {} moves ({} hits)",
            self.moves, self.hit_count
        );

        self.sink.emit(GameEvent::GameOver {
            target_board_empty: true,
        });
        // only the board a human attacks reports statistics
        if self.ai_owned {
            self.sink.emit(GameEvent::StatsReady(result));
        }
    }

    /// Place a shield over one of this board's own ship cells.
    pub fn place_shield(&mut self, coord: Coordinate) -> MoveOutcome {
        let outcome = if self.fleet.try_move(coord, true) && self.shielded.insert(coord) {
            MoveOutcome::Shielded
        } else {
            MoveOutcome::Miss
        };
        self.sink.emit(GameEvent::MoveResolved {
            coordinate: coord,
            outcome,
        });
        outcome
    }

    /// Whether the special meter is full.
    pub fn can_make_shield_move(&self) -> bool {
        self.meter.is_full()
    }

    /// Spend a full meter without resolving anything on this board. Used for
    /// abilities the caller carries out itself.
    pub fn consume_special(&mut self) -> bool {
        self.meter.consume()
    }

    /// Launch `kind` around `center`. Returns `None` unless the meter is full.
    pub fn attempt_special_move(
        &mut self,
        kind: SpecialMove,
        center: Coordinate,
    ) -> Option<SpecialOutcome> {
        if !self.meter.is_full() {
            return None;
        }
        let outcome = match kind {
            SpecialMove::Nuke => {
                let targets = (-1..=1)
                    .flat_map(|dy| (-1..=1).map(move |dx| center.offset(dx, dy)))
                    .collect::<Vec<_>>();
                SpecialOutcome::Salvo(self.salvo(targets))
            }
            SpecialMove::StrafingRun => {
                let targets = (-2..=2).map(|dy| center.offset(0, dy)).collect::<Vec<_>>();
                SpecialOutcome::Salvo(self.salvo(targets))
            }
            SpecialMove::Reveal => SpecialOutcome::Revealed(self.reveal_next()),
        };
        self.meter.consume();
        info!("special {:?} launched at {}", kind, center);
        Some(outcome)
    }

    fn salvo(&mut self, targets: Vec<Coordinate>) -> Vec<(Coordinate, MoveOutcome)> {
        targets
            .into_iter()
            .map(|c| (c, self.enter_move(c)))
            .collect()
    }

    /// Reveal the first hidden ship still afloat.
    fn reveal_next(&mut self) -> Option<ShipKind> {
        let ship = self
            .fleet
            .iter_mut()
            .find(|s| !s.is_revealed() && !s.is_sunk())?;
        ship.set_revealed(true);
        Some(ship.kind())
    }

    /// Show or hide every ship.
    pub fn set_ship_rendering(&mut self, revealed: bool) {
        for ship in self.fleet.iter_mut() {
            ship.set_revealed(revealed);
        }
    }

    /// Reveal the ship equal to `target`.
    pub fn reveal_ship(&mut self, target: &Ship) -> bool {
        match self.fleet.iter_mut().find(|s| **s == *target) {
            Some(ship) => {
                ship.set_revealed(true);
                true
            }
            None => false,
        }
    }

    /// Omniscient lookup: the first intact cell of the first ship afloat.
    pub fn cheat_move(&self) -> Option<Coordinate> {
        self.fleet
            .iter()
            .filter(|s| !s.is_sunk())
            .find_map(Ship::first_intact_cell)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_ai_owned(&self) -> bool {
        self.ai_owned
    }

    /// `true` once every ship is sunk.
    pub fn is_empty(&self) -> bool {
        self.fleet.is_empty()
    }

    /// Ships still afloat.
    pub fn ships_remaining(&self) -> usize {
        self.fleet.remaining()
    }

    pub fn fleet(&self) -> &FleetCollection {
        &self.fleet
    }

    pub fn move_count(&self) -> u32 {
        self.moves
    }

    pub fn hit_count(&self) -> u32 {
        self.hit_count
    }

    /// Hit coordinates in the order they landed.
    pub fn hits(&self) -> &[Coordinate] {
        &self.hits
    }

    /// Every on-board cell a counted move has landed on.
    pub fn fired(&self) -> Grid {
        self.fired
    }

    /// Cells currently under a shield.
    pub fn shielded(&self) -> Grid {
        self.shielded
    }

    pub fn meter(&self) -> u8 {
        self.meter.value()
    }

    /// Final statistics, once the board is finished.
    pub fn gameplay_result(&self) -> Option<GameplayResult> {
        self.result
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("phase", &self.phase)
            .field("ai_owned", &self.ai_owned)
            .field("moves", &self.moves)
            .field("hits", &self.hit_count)
            .field("meter", &self.meter)
            .field("fleet", &self.fleet)
            .finish()
    }
}

/// Five ships of lengths 2, 3, 3, 4, 5 at random positions; the third is the
/// submarine.
///
/// Each ship samples origins no placed ship covers and tries the four
/// headings clockwise from a random start until one fits.
pub fn generate_random_fleet<R: Rng + ?Sized>(rng: &mut R) -> Result<FleetCollection, BoardError> {
    let mut fleet = FleetCollection::new();
    for (slot, &length) in SHIP_LENGTHS.iter().enumerate() {
        let ship = place_randomly(rng, &fleet, length, slot == SUBMARINE_SLOT)?;
        fleet.add(ship)?;
    }
    Ok(fleet)
}

fn place_randomly<R: Rng + ?Sized>(
    rng: &mut R,
    fleet: &FleetCollection,
    length: usize,
    submarine: bool,
) -> Result<Ship, BoardError> {
    let n = BOARD_SIZE as i32;
    for _ in 0..PLACEMENT_ATTEMPT_CAP {
        let origin = Coordinate::new(rng.random_range(0..n), rng.random_range(0..n));
        if fleet.iter().any(|s| s.contains(origin).is_some()) {
            continue;
        }
        let mut direction = Direction::ALL[rng.random_range(0..4)];
        for _ in 0..4 {
            let candidate = Ship::new(origin, direction, length, submarine)?;
            if candidate.fits_on_board() && !fleet.conflicts(&candidate) {
                return Ok(candidate);
            }
            direction = direction.rotate_right();
        }
    }
    warn!(
        "gave up placing a ship of length {} after {} origins",
        length, PLACEMENT_ATTEMPT_CAP
    );
    Err(BoardError::UnableToPlaceShip)
}
