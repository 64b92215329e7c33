use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::board::BOARD_WIDTH;

/// Anchor every new piece starts from.
pub const SPAWN_ANCHOR: Anchor = Anchor::new(4, 1);

/// A falling piece: shape, orientation and anchor on the board.
///
/// Pieces are plain values. Movement and rotation return new `Piece`s and
/// leave it to the caller to decide whether the result is acceptable.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Orientation, Piece, PieceKind};
///
/// let piece = Piece::new(PieceKind::I);
/// assert_eq!(piece.orientation(), Orientation::Up);
/// assert_eq!(piece.cells(), [14, 13, 15, 16]);
///
/// let rotated = piece.rotated();
/// assert_eq!(rotated.orientation(), Orientation::Right);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    kind: PieceKind,
    orientation: Orientation,
    anchor: Anchor,
}

impl Piece {
    /// Creates a piece of the given kind at the spawn anchor, facing up.
    #[must_use]
    pub const fn new(kind: PieceKind) -> Self {
        Self::with_placement(kind, Orientation::Up, SPAWN_ANCHOR)
    }

    #[must_use]
    pub const fn with_placement(kind: PieceKind, orientation: Orientation, anchor: Anchor) -> Self {
        Self {
            kind,
            orientation,
            anchor,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub const fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Returns the flat board indices of the four cells this piece covers.
    ///
    /// This is the only place piece geometry is turned into board positions;
    /// collision checks and locking both go through it.
    ///
    /// Indices are signed: a piece rotated against an edge can reach past the
    /// board, and callers range-check before touching cells.
    #[must_use]
    pub fn cells(&self) -> [isize; 4] {
        let base = self.anchor.base_index();
        self.kind.offsets(self.orientation).map(|offset| base + offset)
    }

    #[must_use]
    pub const fn left(&self) -> Self {
        Self {
            anchor: self.anchor.left(),
            ..*self
        }
    }

    #[must_use]
    pub const fn right(&self) -> Self {
        Self {
            anchor: self.anchor.right(),
            ..*self
        }
    }

    #[must_use]
    pub const fn down(&self) -> Self {
        Self {
            anchor: self.anchor.down(),
            ..*self
        }
    }

    /// Returns this piece turned one step clockwise, anchor unchanged.
    #[must_use]
    pub const fn rotated(&self) -> Self {
        Self {
            orientation: self.orientation.rotated(),
            ..*self
        }
    }
}

/// Reference cell of a piece on the board.
///
/// `x` is the column and `y` the row, both counted from the top-left corner.
/// The anchor itself is always one of the piece's cells (offset `0`) except
/// for the I-piece facing right, whose run sits one column to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Anchor {
    x: isize,
    y: isize,
}

impl Anchor {
    #[must_use]
    pub const fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> isize {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> isize {
        self.y
    }

    /// Flat board index of the anchor cell (`y * width + x`).
    #[expect(clippy::cast_possible_wrap)]
    #[must_use]
    pub const fn base_index(self) -> isize {
        self.y * BOARD_WIDTH as isize + self.x
    }

    #[must_use]
    pub const fn left(self) -> Self {
        Self::new(self.x - 1, self.y)
    }

    #[must_use]
    pub const fn right(self) -> Self {
        Self::new(self.x + 1, self.y)
    }

    #[must_use]
    pub const fn down(self) -> Self {
        Self::new(self.x, self.y + 1)
    }
}

/// Facing of a piece, cycled clockwise by rotation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Orientation {
    pub const LEN: usize = 4;

    /// All orientations in rotation order.
    pub const ALL: [Self; Self::LEN] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Next orientation in the cycle `Up -> Right -> Down -> Left -> Up`.
    #[must_use]
    pub const fn rotated(self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }

    const fn as_usize(self) -> usize {
        self as usize
    }
}

/// The seven piece shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        Self::I,
        Self::O,
        Self::T,
        Self::S,
        Self::Z,
        Self::J,
        Self::L,
    ];

    /// Returns the four cell offsets of this shape in the given orientation.
    ///
    /// Offsets are relative to the anchor's flat board index. The lookup is
    /// total over every kind and orientation.
    ///
    /// ```
    /// use blockfall_engine::{Orientation, PieceKind};
    ///
    /// assert_eq!(PieceKind::I.offsets(Orientation::Up), [0, -1, 1, 2]);
    /// assert_eq!(PieceKind::I.offsets(Orientation::Left), [0, -10, 10, 20]);
    /// ```
    #[must_use]
    pub const fn offsets(self, orientation: Orientation) -> [isize; 4] {
        SHAPE_OFFSETS[self as usize][orientation.as_usize()]
    }

    /// Returns the single character representation of this piece kind.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('T'), Some(PieceKind::T));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }
}

/// Offsets of one shape in one orientation.
type ShapeOffsets = [isize; 4];

/// Builds flat offsets from `(dx, dy)` pairs relative to the anchor.
#[expect(clippy::cast_possible_wrap)]
const fn offsets(cells: [(isize, isize); 4]) -> ShapeOffsets {
    let mut out = [0; 4];
    let mut i = 0;
    while i < 4 {
        out[i] = cells[i].1 * BOARD_WIDTH as isize + cells[i].0;
        i += 1;
    }
    out
}

/// Cell offsets indexed by `[PieceKind][Orientation]`.
///
/// The first entry is the anchor-relative cell the piece pivots around. The
/// O-piece is the same in every orientation. S and Z have the same left and
/// right states.
const SHAPE_OFFSETS: [[ShapeOffsets; Orientation::LEN]; PieceKind::LEN] = [
    // I-piece
    [
        offsets([(0, 0), (-1, 0), (1, 0), (2, 0)]),
        offsets([(1, 0), (1, -1), (1, 1), (1, 2)]),
        offsets([(0, 1), (-1, 1), (1, 1), (2, 1)]),
        offsets([(0, 0), (0, -1), (0, 1), (0, 2)]),
    ],
    // O-piece
    [
        offsets([(0, 0), (0, -1), (1, -1), (1, 0)]),
        offsets([(0, 0), (0, -1), (1, -1), (1, 0)]),
        offsets([(0, 0), (0, -1), (1, -1), (1, 0)]),
        offsets([(0, 0), (0, -1), (1, -1), (1, 0)]),
    ],
    // T-piece
    [
        offsets([(0, 0), (-1, 0), (1, 0), (0, -1)]),
        offsets([(0, 0), (0, -1), (0, 1), (1, 0)]),
        offsets([(0, 0), (-1, 0), (1, 0), (0, 1)]),
        offsets([(0, 0), (0, -1), (0, 1), (-1, 0)]),
    ],
    // S-piece
    [
        offsets([(0, 0), (-1, 0), (0, -1), (1, -1)]),
        offsets([(0, 0), (1, 0), (0, -1), (1, 1)]),
        offsets([(0, 0), (1, 0), (0, 1), (-1, 1)]),
        offsets([(0, 0), (1, 0), (0, -1), (1, 1)]),
    ],
    // Z-piece
    [
        offsets([(0, 0), (0, -1), (-1, -1), (1, 0)]),
        offsets([(0, 0), (1, 0), (0, 1), (1, -1)]),
        offsets([(0, 0), (-1, 0), (0, 1), (1, 1)]),
        offsets([(0, 0), (1, 0), (0, 1), (1, -1)]),
    ],
    // J-piece
    [
        offsets([(0, 0), (-1, 0), (1, 0), (-1, -1)]),
        offsets([(0, 0), (0, -1), (0, 1), (1, -1)]),
        offsets([(0, 0), (-1, 0), (1, 0), (1, 1)]),
        offsets([(0, 0), (0, -1), (0, 1), (-1, 1)]),
    ],
    // L-piece
    [
        offsets([(0, 0), (-1, 0), (1, 0), (1, -1)]),
        offsets([(0, 0), (0, -1), (0, 1), (1, 1)]),
        offsets([(0, 0), (-1, 0), (1, 0), (-1, 1)]),
        offsets([(0, 0), (0, -1), (0, 1), (-1, -1)]),
    ],
];
