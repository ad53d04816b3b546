//! The five-slot ship collection owned by a board.

use log::warn;

use crate::common::BoardError;
use crate::config::FLEET_CAPACITY;
use crate::geometry::Coordinate;
use crate::ship::Ship;

/// Up to five ships kept in insertion order, plus a live count of the ones
/// still afloat.
#[derive(Clone, Debug, Default)]
pub struct FleetCollection {
    slots: [Option<Ship>; FLEET_CAPACITY],
    remaining: usize,
}

impl FleetCollection {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Number of ships not yet sunk.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// `true` when no ship is left afloat.
    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// Put `ship` into the first free slot.
    ///
    /// Callers are expected to check [`FleetCollection::is_full`] first; an
    /// overflow here is logged and rejected.
    pub fn add(&mut self, ship: Ship) -> Result<(), BoardError> {
        let Some(slot) = self.slots.iter_mut().find(|s| s.is_none()) else {
            warn!("fleet overflow: rejected {}", ship);
            return Err(BoardError::FleetFull);
        };
        if !ship.is_sunk() {
            self.remaining += 1;
        }
        *slot = Some(ship);
        Ok(())
    }

    /// Take out the first ship equal to `ship` (same length and submarine
    /// flag), leaving its slot empty.
    pub fn remove(&mut self, ship: &Ship) -> Option<Ship> {
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.as_ref().is_some_and(|s| s == ship))?;
        let removed = slot.take()?;
        if !removed.is_sunk() {
            self.remaining -= 1;
        }
        Some(removed)
    }

    /// Resolve a shot at `coord`.
    ///
    /// The first unsunk ship in slot order that covers `coord` takes the hit
    /// and `true` is returned. A `passive` shot only probes.
    pub fn try_move(&mut self, coord: Coordinate, passive: bool) -> bool {
        for ship in self.slots.iter_mut().flatten() {
            if ship.is_sunk() {
                continue;
            }
            if let Some(index) = ship.contains(coord) {
                ship.hit(index, passive);
                if ship.is_sunk() {
                    self.remaining -= 1;
                }
                return true;
            }
        }
        false
    }

    /// Whether `candidate` overlaps any ship already in the collection.
    pub fn conflicts(&self, candidate: &Ship) -> bool {
        self.iter().any(|ship| candidate.overlaps(ship))
    }

    /// Ships in slot order, skipping empty slots.
    pub fn iter(&self) -> impl Iterator<Item = &Ship> {
        self.slots.iter().flatten()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Ship> {
        self.slots.iter_mut().flatten()
    }

    /// Ship stored in `slot`, if any.
    pub fn get(&self, slot: usize) -> Option<&Ship> {
        self.slots.get(slot)?.as_ref()
    }
}

impl<'a> IntoIterator for &'a FleetCollection {
    type Item = &'a Ship;
    type IntoIter = core::iter::Flatten<core::slice::Iter<'a, Option<Ship>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter().flatten()
    }
}
