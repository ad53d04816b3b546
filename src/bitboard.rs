//! A fixed-size set of board cells packed into one unsigned integer.
//!
//! Boards are represented as an `N×N` grid stored in `T`; cell `(x, y)` maps
//! to bit `y * N + x`. Coordinates outside the grid are never members, so
//! callers may probe with off-board shots without a separate bounds check.

use core::fmt;
use core::{any, mem};
use num_traits::{PrimInt, Unsigned, Zero};

use crate::config::BOARD_SIZE;
use crate::geometry::Coordinate;

/// The standard 10×10 cell set.
pub type Grid = BitBoard<u128, BOARD_SIZE>;

/// A fixed-size N×N bitboard stored in the unsigned integer `T`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BitBoard<T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
}

impl<T, const N: usize> BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    /// Number of usable bits in the board (`N * N`).
    const BOARD_BITS: usize = N * N;

    /// Fails to compile when `N * N` does not fit in `T`.
    const FITS: () = assert!(N * N <= mem::size_of::<T>() * 8, "board does not fit in T");

    #[inline]
    fn mask() -> T {
        if Self::BOARD_BITS == mem::size_of::<T>() * 8 {
            !T::zero()
        } else {
            (T::one() << Self::BOARD_BITS) - T::one()
        }
    }

    /// An empty set.
    #[inline]
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::FITS;
        BitBoard { bits: T::zero() }
    }

    /// A set holding every cell of the grid.
    #[inline]
    pub fn full() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::FITS;
        BitBoard { bits: Self::mask() }
    }

    #[inline]
    fn bit(coord: Coordinate) -> Option<usize> {
        let n = N as i32;
        if (0..n).contains(&coord.x) && (0..n).contains(&coord.y) {
            Some(coord.y as usize * N + coord.x as usize)
        } else {
            None
        }
    }

    /// Number of cells in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        match Self::bit(coord) {
            Some(idx) => ((self.bits >> idx) & T::one()) != T::zero(),
            None => false,
        }
    }

    /// Adds `coord`; returns `false` if it was already present or off the grid.
    pub fn insert(&mut self, coord: Coordinate) -> bool {
        match Self::bit(coord) {
            Some(idx) if !self.contains(coord) => {
                self.bits = self.bits | (T::one() << idx);
                true
            }
            _ => false,
        }
    }

    /// Removes `coord`; returns `false` if it was not present.
    pub fn remove(&mut self, coord: Coordinate) -> bool {
        match Self::bit(coord) {
            Some(idx) if self.contains(coord) => {
                self.bits = self.bits & !(T::one() << idx);
                true
            }
            _ => false,
        }
    }

    /// Clears every cell.
    #[inline]
    pub fn clear(&mut self) {
        self.bits = T::zero();
    }

    /// The `n`th member in row-major order. Used to sample uniformly from the
    /// set with a single random index.
    pub fn nth(&self, n: usize) -> Option<Coordinate> {
        self.iter().nth(n)
    }

    /// Members in row-major order.
    #[inline]
    pub fn iter(&self) -> Cells<'_, T, N> {
        Cells {
            board: self,
            idx: 0,
        }
    }
}

impl<T, const N: usize> Default for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> fmt::Debug for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}, {}>:", any::type_name::<T>(), N)?;
        for y in 0..N {
            for x in 0..N {
                let cell = if self.contains(Coordinate::new(x as i32, y as i32)) {
                    '■'
                } else {
                    '□'
                };
                write!(f, "{} ", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over the members of a bitboard.
#[derive(Clone, Copy)]
pub struct Cells<'a, T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    board: &'a BitBoard<T, N>,
    idx: usize,
}

impl<'a, T, const N: usize> Iterator for Cells<'a, T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = Coordinate;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        while self.idx < N * N {
            let idx = self.idx;
            self.idx += 1;
            if ((self.board.bits >> idx) & T::one()) != T::zero() {
                return Some(Coordinate::new((idx % N) as i32, (idx / N) as i32));
            }
        }
        None
    }
}
