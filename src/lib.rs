mod bitboard;
mod board;
mod common;
mod config;
mod events;
mod fleet;
mod game;
mod geometry;
mod logging;
mod meter;
pub mod opponent;
mod ship;
mod stats;
pub mod ui;

pub use bitboard::{BitBoard, Grid};
pub use board::*;
pub use common::*;
pub use config::*;
pub use events::*;
pub use fleet::FleetCollection;
pub use game::*;
pub use geometry::{Coordinate, Direction};
pub use logging::init_logging;
pub use meter::SpecialMeter;
pub use opponent::{opponent_for, Opponent};
pub use ship::{Ship, ShipKind};
pub use stats::GameplayResult;
