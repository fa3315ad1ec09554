use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use super::board::BOARD_WIDTH;

/// A falling piece with position, rotation, and variant.
///
/// Pieces are immutable value types - movement and rotation return new
/// `Piece` instances, and the caller decides whether to commit them.
///
/// # Coordinate System
///
/// - The origin is the top-left corner of the piece's 4×4 bounding box,
///   in board coordinates (x grows rightward, y grows downward)
/// - The origin may be negative while every *occupied* cell stays in bounds
/// - Rotation is an index 0..=3, advancing clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    rotation: Rotation,
    x: i16,
    y: i16,
}

impl Piece {
    #[expect(clippy::cast_possible_truncation)]
    const SPAWN_X: i16 = (BOARD_WIDTH / 2) as i16;

    /// Creates a fresh piece at the horizontal center of the top row,
    /// rotation 0. Whether the spawn cells are actually free is the
    /// caller's concern.
    #[must_use]
    pub const fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation(0),
            x: Self::SPAWN_X,
            y: 0,
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub fn x(&self) -> i16 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i16 {
        self.y
    }

    /// Returns the piece translated by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: i16, dy: i16) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Returns the piece rotated one step clockwise.
    #[must_use]
    pub fn rotated(self) -> Self {
        Self {
            rotation: self.rotation.rotated(),
            ..self
        }
    }

    /// Returns the absolute board coordinates of the piece's 4 occupied
    /// cells at its current origin and rotation.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.kind
            .cells(self.rotation)
            .iter()
            .map(move |&(dx, dy)| (self.x + i16::from(dx), self.y + i16::from(dy)))
    }
}

/// Rotation state of a piece.
///
/// One of four orientations, advancing clockwise and wrapping modulo 4.
/// There is no counterclockwise step and no kick offsets: a rotation either
/// fits at the current origin or is rejected outright.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rotation(u8);

impl Rotation {
    #[must_use]
    pub fn rotated(self) -> Self {
        Rotation((self.0 + 1) % 4)
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Enum representing the variant of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
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
        match rng.random_range(0..7) {
            0 => PieceKind::I,
            1 => PieceKind::O,
            2 => PieceKind::T,
            3 => PieceKind::S,
            4 => PieceKind::Z,
            5 => PieceKind::J,
            _ => PieceKind::L,
        }
    }
}

impl PieceKind {
    /// Number of piece variants (7).
    pub const LEN: usize = 7;

    /// All variants, in discriminant order.
    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Returns the 4 occupied `(local_x, local_y)` cells of the variant's
    /// 4×4 bounding box in the given rotation.
    #[must_use]
    pub fn cells(self, rotation: Rotation) -> &'static PieceCells {
        &PIECE_CELLS[self as usize][rotation.as_usize()]
    }

    /// Returns whether the bounding-box cell at `(local_x, local_y)` is part
    /// of the variant's shape in the given rotation.
    ///
    /// Total over its domain: coordinates outside the 4×4 box are simply not
    /// occupied.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadris_engine::{PieceKind, Rotation};
    ///
    /// let spawn = Rotation::default();
    /// assert!(PieceKind::O.occupies(spawn, 0, 0));
    /// assert!(!PieceKind::O.occupies(spawn, 2, 0));
    /// assert!(!PieceKind::O.occupies(spawn, 200, 0));
    /// ```
    #[must_use]
    pub fn occupies(self, rotation: Rotation, local_x: u8, local_y: u8) -> bool {
        self.cells(rotation)
            .iter()
            .any(|&cell| cell == (local_x, local_y))
    }

    /// Returns the single character representation of this variant.
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
}

/// Occupied cells of a piece within its 4×4 bounding box, as
/// `(local_x, local_y)` pairs. Every shape occupies exactly 4 cells.
pub type PieceCells = [(u8, u8); 4];

// Hand-written shape data indexed by [variant][rotation]. The rotation
// states are not uniform 90° turns of one another, so they stay literal
// data rather than being generated from the spawn shape. Cells are listed
// in row order (by local_y, then local_x).
static PIECE_CELLS: [[PieceCells; 4]; PieceKind::LEN] = [
    // I-piece
    [
        [(1, 0), (1, 1), (1, 2), (1, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 1), (1, 1), (2, 1), (3, 1)],
    ],
    // O-piece: the mapping ignores rotation entirely
    [[(0, 0), (1, 0), (0, 1), (1, 1)]; 4],
    // T-piece
    [
        [(1, 0), (0, 1), (1, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
    ],
    // S-piece
    [
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
    ],
    // Z-piece
    [
        [(0, 0), (0, 1), (1, 1), (1, 2)],
        [(1, 1), (0, 2), (1, 2), (2, 2)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
        [(0, 0), (1, 0), (2, 0), (1, 1)],
    ],
    // J-piece
    [
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (2, 1)],
    ],
    // L-piece
    [
        [(1, 0), (1, 1), (0, 2), (1, 2)],
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (2, 1)],
    ],
];
