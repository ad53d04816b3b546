//! A human-versus-computer game session, plus computer-versus-computer duels.

use std::sync::Arc;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{generate_random_fleet, Board, Phase, SpecialMove, SpecialOutcome};
use crate::common::{BoardError, MoveOutcome};
use crate::config::{GameConfig, BOARD_SIZE, FLEET_CAPACITY};
use crate::events::{EventSink, NullSink};
use crate::fleet::FleetCollection;
use crate::geometry::Coordinate;
use crate::opponent::{opponent_for, Opponent};

/// Current status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

/// What the human does with a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// A plain shot at the computer's board.
    Fire,
    /// Spend a full meter on a board special around the target.
    Special(SpecialMove),
    /// Spend a full meter on a shot the computer does not answer.
    SecondChance,
    /// Spend a full meter shielding one of the human's own ship cells.
    Shield,
}

/// Everything that happened during one human turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub special: Option<SpecialOutcome>,
    /// The human's plain shot, if one was fired.
    pub shot: Option<MoveOutcome>,
    pub shield: Option<MoveOutcome>,
    /// The computer's answering shot on the human's board.
    pub reply: Option<(Coordinate, MoveOutcome)>,
    pub status: GameStatus,
}

impl TurnReport {
    fn new() -> Self {
        Self {
            special: None,
            shot: None,
            shield: None,
            reply: None,
            status: GameStatus::InProgress,
        }
    }
}

/// Where each board's events go.
#[derive(Clone)]
pub struct SessionSinks {
    pub human: Arc<dyn EventSink>,
    pub ai: Arc<dyn EventSink>,
}

impl SessionSinks {
    /// Both boards report to the same sink.
    pub fn shared(sink: Arc<dyn EventSink>) -> Self {
        Self {
            human: Arc::clone(&sink),
            ai: sink,
        }
    }
}

impl Default for SessionSinks {
    fn default() -> Self {
        Self::shared(Arc::new(NullSink))
    }
}

/// The human's board, the computer's board and the computer's targeting
/// strategy. The human's special meter lives on the computer's board, since
/// it fills as the human fires there.
pub struct GameSession {
    config: GameConfig,
    human: Board,
    ai: Board,
    opponent: Box<dyn Opponent>,
    rng: SmallRng,
    sinks: SessionSinks,
}

impl GameSession {
    pub fn new(
        config: GameConfig,
        human_fleet: FleetCollection,
        mut rng: SmallRng,
        sinks: SessionSinks,
    ) -> Result<Self, BoardError> {
        let ai = Board::random(&mut rng, &config, Arc::clone(&sinks.ai))?;
        Ok(Self {
            config,
            human: Board::with_fleet(human_fleet, Arc::clone(&sinks.human)),
            ai,
            opponent: opponent_for(config.difficulty),
            rng,
            sinks,
        })
    }

    /// Move both boards from setup into combat.
    pub fn start(&mut self) {
        self.human.start();
        self.ai.start();
        info!(
            "new game against the {} opponent ({})",
            self.config.difficulty,
            self.opponent.name()
        );
    }

    /// Drop both boards, cancelling the meter ticker, and set up a new game
    /// against a fresh fleet.
    pub fn reset(&mut self, human_fleet: FleetCollection) -> Result<(), BoardError> {
        self.ai = Board::random(&mut self.rng, &self.config, Arc::clone(&self.sinks.ai))?;
        self.human = Board::with_fleet(human_fleet, Arc::clone(&self.sinks.human));
        self.opponent = opponent_for(self.config.difficulty);
        Ok(())
    }

    pub fn status(&self) -> GameStatus {
        if self.ai.is_empty() {
            GameStatus::Won
        } else if self.human.is_empty() {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        }
    }

    /// Play one human turn against `target`.
    ///
    /// Targets are on the computer's board except for [`Action::Shield`],
    /// which targets the human's own board. Turns taken outside an active
    /// game do nothing.
    pub fn human_turn(&mut self, target: Coordinate, action: Action) -> TurnReport {
        let mut report = TurnReport::new();
        if self.status() != GameStatus::InProgress
            || self.ai.phase() != Phase::Active
            || self.human.phase() != Phase::Active
        {
            report.status = self.status();
            return report;
        }

        let answer = match action {
            Action::Shield => {
                if self.ai.can_make_shield_move() {
                    let outcome = self.human.place_shield(target);
                    if outcome == MoveOutcome::Shielded {
                        self.ai.consume_special();
                    }
                    report.shield = Some(outcome);
                }
                false
            }
            Action::SecondChance => {
                let free = self.ai.consume_special();
                report.shot = Some(self.ai.enter_move(target));
                !free
            }
            Action::Special(kind) => {
                match self.ai.attempt_special_move(kind, target) {
                    Some(outcome) => {
                        report.special = Some(outcome);
                        if kind == SpecialMove::Reveal {
                            report.shot = Some(self.ai.enter_move(target));
                        }
                    }
                    None => {
                        debug!("{:?} rejected, meter at {}", kind, self.ai.meter());
                        report.shot = Some(self.ai.enter_move(target));
                    }
                }
                true
            }
            Action::Fire => {
                report.shot = Some(self.ai.enter_move(target));
                true
            }
        };

        if answer && self.ai.phase() == Phase::Active {
            report.reply = Some(self.computer_turn());
        }
        report.status = self.status();
        if report.status != GameStatus::InProgress {
            info!("game over: {:?}", report.status);
        }
        report
    }

    fn computer_turn(&mut self) -> (Coordinate, MoveOutcome) {
        let coord = self.opponent.next_move(&mut self.rng, &self.human);
        let outcome = self.human.enter_move(coord);
        self.opponent.register_result(coord, outcome, &self.human);
        (coord, outcome)
    }

    pub fn human_board(&self) -> &Board {
        &self.human
    }

    pub fn ai_board(&self) -> &Board {
        &self.ai
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn opponent_name(&self) -> &'static str {
        self.opponent.name()
    }
}

/// Hard ceiling on shots per side in a duel; the random tier may repeat
/// cells indefinitely.
pub const DUEL_MOVE_CAP: u32 = (BOARD_SIZE * BOARD_SIZE * 100) as u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Seat {
    First,
    Second,
}

/// Outcome of one computer-versus-computer game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DuelReport {
    /// `None` if both sides ran into [`DUEL_MOVE_CAP`].
    pub winner: Option<Seat>,
    pub first_moves: u32,
    pub second_moves: u32,
    pub first_hits: u32,
    pub second_hits: u32,
    /// Ships the first player sank.
    pub first_sunk: usize,
    pub second_sunk: usize,
}

/// Let two strategies fire at each other's random fleets, `first` shooting
/// first, until one fleet is sunk.
pub fn play_duel(
    first: &mut dyn Opponent,
    second: &mut dyn Opponent,
    rng: &mut SmallRng,
) -> Result<DuelReport, BoardError> {
    let mut first_rng = SmallRng::from_rng(rng);
    let mut second_rng = SmallRng::from_rng(rng);
    play_seeded_duel(first, second, &mut first_rng, &mut second_rng)
}

/// [`play_duel`] with one generator per side: `first_rng` places the first
/// player's fleet and drives its shots, `second_rng` does the same for the
/// second player.
pub fn play_seeded_duel(
    first: &mut dyn Opponent,
    second: &mut dyn Opponent,
    first_rng: &mut SmallRng,
    second_rng: &mut SmallRng,
) -> Result<DuelReport, BoardError> {
    let sink: Arc<dyn EventSink> = Arc::new(NullSink);
    let mut first_fleet = Board::with_fleet(generate_random_fleet(first_rng)?, Arc::clone(&sink));
    let mut second_fleet = Board::with_fleet(generate_random_fleet(second_rng)?, sink);
    first_fleet.start();
    second_fleet.start();

    let mut winner = None;
    while second_fleet.move_count() < DUEL_MOVE_CAP {
        volley(first, &mut second_fleet, first_rng);
        if second_fleet.is_empty() {
            winner = Some(Seat::First);
            break;
        }
        volley(second, &mut first_fleet, second_rng);
        if first_fleet.is_empty() {
            winner = Some(Seat::Second);
            break;
        }
    }

    let report = DuelReport {
        winner,
        first_moves: second_fleet.move_count(),
        second_moves: first_fleet.move_count(),
        first_hits: second_fleet.hit_count(),
        second_hits: first_fleet.hit_count(),
        first_sunk: FLEET_CAPACITY - second_fleet.ships_remaining(),
        second_sunk: FLEET_CAPACITY - first_fleet.ships_remaining(),
    };
    debug!("duel {} vs {}: {:?}", first.name(), second.name(), report);
    Ok(report)
}

fn volley(shooter: &mut dyn Opponent, target: &mut Board, rng: &mut SmallRng) {
    let coord = shooter.next_move(rng, target);
    let outcome = target.enter_move(coord);
    shooter.register_result(coord, outcome, target);
}
