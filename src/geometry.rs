//! Board coordinates and the four headings a ship can extend in.

use core::fmt;

use crate::config::BOARD_SIZE;

/// A cell on the grid. `x` is the column and `y` the row; both are signed so
/// that shots aimed past an edge stay representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether both components lie in `[0, BOARD_SIZE)`.
    pub fn is_on_board(&self) -> bool {
        let n = BOARD_SIZE as i32;
        (0..n).contains(&self.x) && (0..n).contains(&self.y)
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The neighbouring cell one step along `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }

    /// Cell at row-major `index`.
    pub fn from_index(index: usize) -> Self {
        Self::new((index % BOARD_SIZE) as i32, (index / BOARD_SIZE) as i32)
    }

    /// Every on-board cell in row-major order.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..BOARD_SIZE * BOARD_SIZE).map(Coordinate::from_index)
    }
}

/// Renders as column letter plus one-based row, e.g. `C5` for `(2, 4)`.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            let col = (b'A' + self.x as u8) as char;
            write!(f, "{}{}", col, self.y + 1)
        } else {
            write!(f, "({}, {})", self.x, self.y)
        }
    }
}

/// Heading from a ship's origin towards its other cells.
///
/// The variants are declared in clockwise order so that
/// [`Direction::rotate_right`] walks the cycle Right, Down, Left, Up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// Position in the clockwise cycle.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Turn 90 degrees clockwise.
    pub fn rotate_right(self) -> Self {
        Self::ALL[(self.ordinal() + 1) % 4]
    }

    /// Reverse along the same axis.
    pub fn opposite(self) -> Self {
        Self::ALL[(self.ordinal() + 2) % 4]
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Unit step `(dx, dy)`; `y` grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
        }
    }
}
