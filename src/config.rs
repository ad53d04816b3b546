use core::fmt;
use core::str::FromStr;
use core::time::Duration;

pub const BOARD_SIZE: usize = 10;
pub const FLEET_CAPACITY: usize = 5;
/// Ship lengths in slot order: patrol boat, destroyer, submarine, battleship, carrier.
pub const SHIP_LENGTHS: [usize; FLEET_CAPACITY] = [2, 3, 3, 4, 5];
/// Slot of `SHIP_LENGTHS` that is built as a submarine.
pub const SUBMARINE_SLOT: usize = 2;

/// Total number of ship segments used in the standard configuration.
pub const TOTAL_SHIP_CELLS: usize = 2 + 3 + 3 + 4 + 5;

/// Special-ability meter ceiling; a full meter unlocks one special move.
pub const METER_MAX: u8 = 100;
/// Points credited to the meter by each counted move.
pub const METER_STEP: u8 = 10;
/// Delay between two background meter increments.
pub const METER_TICK: Duration = Duration::from_millis(45);

/// The cheating opponent peeks at the target board every this many moves.
pub const CHEAT_INTERVAL: u32 = 6;

/// Upper bound on origins sampled while placing a single random ship.
pub const PLACEMENT_ATTEMPT_CAP: usize = 10_000;

/// Opponent strength tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    /// Uniform random shots, repeats allowed.
    Easy,
    /// Uniform random shots without repeats.
    Moderate,
    /// Hunt/target tracking.
    Hard,
    /// Hunt/target tracking that periodically peeks at the fleet.
    Extreme,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Moderate,
        Difficulty::Hard,
        Difficulty::Extreme,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a difficulty name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDifficulty(pub String);

impl fmt::Display for UnknownDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown difficulty \"{}\"", self.0)
    }
}

impl std::error::Error for UnknownDifficulty {}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownDifficulty(s.to_string()))
    }
}

/// Per-game settings handed to boards and sessions at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    /// Period of the background meter ticker. `Duration::ZERO` credits each
    /// decile synchronously.
    pub meter_tick: Duration,
}

impl GameConfig {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            meter_tick: METER_TICK,
        }
    }

    /// Same difficulty, with the meter credited synchronously.
    pub fn instant_meter(self) -> Self {
        Self {
            meter_tick: Duration::ZERO,
            ..self
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(Difficulty::Hard)
    }
}
