use serde::{Deserialize, Serialize};
use std::fmt;

pub type Bitboard = u128;

/// Playable columns.
pub const WIDTH: u8 = 11;
/// Playable rows.
pub const HEIGHT: u8 = 9;
/// Row stride of the encoded grid. Each row carries two padding cells so
/// that a knight jump off the east or west edge lands on a closed cell
/// instead of wrapping onto the neighbouring row.
pub const STRIDE: u8 = WIDTH + 2;
/// Number of encoded cells (the padding after the last row is not stored).
pub const SIZE: u8 = STRIDE * HEIGHT - 2;
/// Centre of the playable grid, used by the positional heuristics.
pub const CENTER: (u8, u8) = (WIDTH / 2, HEIGHT / 2);

pub const BLANK_BOARD: Bitboard = blank_board();

const fn blank_board() -> Bitboard {
    let mut board: Bitboard = 0;
    let mut y = 0;
    while y < HEIGHT {
        let mut x = 0;
        while x < WIDTH {
            board |= 1 << (y as u32 * STRIDE as u32 + x as u32);
            x += 1;
        }
        y += 1;
    }
    board
}

/// Decodes a flat cell index into `(x, y)` using the board stride.
#[must_use]
pub const fn decode(index: u8) -> (u8, u8) {
    (index % STRIDE, index / STRIDE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell(u8);

impl Cell {
    /// Returns `None` for coordinates outside the playable grid.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Option<Self> {
        if x < WIDTH && y < HEIGHT {
            Some(Self(y * STRIDE + x))
        } else {
            None
        }
    }

    /// Wraps a raw encoded index. Padding indices are valid cells that are
    /// simply never open.
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn x(self) -> u8 {
        self.0 % STRIDE
    }

    #[must_use]
    pub const fn y(self) -> u8 {
        self.0 / STRIDE
    }

    #[must_use]
    pub const fn coords(self) -> (u8, u8) {
        decode(self.0)
    }

    /// Euclidean distance between two cells on the decoded grid.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let (x1, y1) = self.coords();
        let (x2, y2) = other.coords();
        distance((x1, y1), (x2, y2))
    }

    /// Target of a knight jump, or `None` when it leaves the encoded grid.
    #[must_use]
    pub fn jump(self, knight: Knight) -> Option<Self> {
        let target = i16::from(self.0) + knight.offset();
        if (0..i16::from(SIZE)).contains(&target) {
            u8::try_from(target).ok().map(Self)
        } else {
            None
        }
    }

    const fn bit(self) -> Bitboard {
        if self.0 < SIZE {
            1 << self.0
        } else {
            0
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x(), self.y())
    }
}

/// Euclidean distance between two decoded coordinates.
#[must_use]
pub fn distance(a: (u8, u8), b: (u8, u8)) -> f64 {
    let dx = f64::from(a.0) - f64::from(b.0);
    let dy = f64::from(a.1) - f64::from(b.1);
    dx.hypot(dy)
}

/// The eight knight jumps, named by compass direction (long leg first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Knight {
    Nne,
    Ene,
    Ese,
    Sse,
    Ssw,
    Wsw,
    Wnw,
    Nnw,
}

impl Knight {
    pub const ALL: [Self; 8] = [
        Self::Nne,
        Self::Ene,
        Self::Ese,
        Self::Sse,
        Self::Ssw,
        Self::Wsw,
        Self::Wnw,
        Self::Nnw,
    ];

    /// Offset in encoded index space.
    #[must_use]
    pub const fn offset(self) -> i16 {
        let row = STRIDE as i16;
        match self {
            Self::Nne => 2 * row + 1,
            Self::Ene => row + 2,
            Self::Ese => -row + 2,
            Self::Sse => -2 * row + 1,
            Self::Ssw => -2 * row - 1,
            Self::Wsw => -row - 2,
            Self::Wnw => row - 2,
            Self::Nnw => 2 * row - 1,
        }
    }
}

/// Open cells of the grid. Visited cells are closed for the rest of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    open: Bitboard,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    #[must_use]
    pub const fn new() -> Self {
        Self { open: BLANK_BOARD }
    }

    /// Board where only the given cells are open. Padding cells are ignored.
    pub fn from_open_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        let open = cells
            .into_iter()
            .fold(0, |acc: Bitboard, cell| acc | cell.bit());
        Self {
            open: open & BLANK_BOARD,
        }
    }

    #[must_use]
    pub const fn is_open(self, cell: Cell) -> bool {
        self.open & cell.bit() != 0
    }

    #[must_use]
    pub const fn with_closed(self, cell: Cell) -> Self {
        Self {
            open: self.open & !cell.bit(),
        }
    }

    #[must_use]
    pub const fn count_open(self) -> u32 {
        self.open.count_ones()
    }

    #[must_use]
    pub const fn open_cells(self) -> BitboardIterator {
        BitboardIterator::new(self.open)
    }

    /// Open knight targets of `cell`, in `Knight::ALL` order.
    pub fn open_neighbors(self, cell: Cell) -> impl Iterator<Item = Cell> {
        Knight::ALL
            .into_iter()
            .filter_map(move |knight| cell.jump(knight))
            .filter(move |&target| self.is_open(target))
    }
}

pub struct BitboardIterator {
    bb: Bitboard,
}

impl BitboardIterator {
    #[must_use]
    pub const fn new(bb: Bitboard) -> Self {
        Self { bb }
    }
}

impl Iterator for BitboardIterator {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bb == 0 {
            return None;
        }
        #[allow(clippy::cast_possible_truncation)]
        let index = self.bb.trailing_zeros() as u8;
        self.bb &= self.bb - 1;
        Some(Cell(index))
    }
}
