use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Relative cell coordinate within a shape, as `(row, col)` offsets from the
/// shape's origin.
///
/// Offsets are normalized: the minimum offset on each axis is 0.
pub type CellOffset = (usize, usize);

/// Enum representing the type of block shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum ShapeKind {
    /// L-shape.
    L = 0,
    /// T-shape.
    T = 1,
    /// I-shape.
    I = 2,
    /// O-shape (2×2 square).
    O = 3,
    /// Z-shape.
    Z = 4,
    /// S-shape.
    S = 5,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        match rng.random_range(0..=5) {
            0 => ShapeKind::L,
            1 => ShapeKind::T,
            2 => ShapeKind::I,
            3 => ShapeKind::O,
            4 => ShapeKind::Z,
            _ => ShapeKind::S,
        }
    }
}

impl ShapeKind {
    /// Number of shape types (6).
    pub const LEN: usize = 6;

    /// Number of cells every shape covers (4).
    pub const CELL_COUNT: usize = 4;

    /// Returns the relative cell offsets of this shape.
    ///
    /// The table is fixed at compile time; offsets are ordered and normalized
    /// so the minimum offset on each axis is 0.
    #[must_use]
    pub const fn cells(self) -> &'static [CellOffset; Self::CELL_COUNT] {
        &SHAPE_CELLS[self as usize]
    }

    /// Returns the single character representation of this shape kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use oxiblast_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::I.as_char(), 'I');
    /// assert_eq!(ShapeKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            ShapeKind::L => 'L',
            ShapeKind::T => 'T',
            ShapeKind::I => 'I',
            ShapeKind::O => 'O',
            ShapeKind::Z => 'Z',
            ShapeKind::S => 'S',
        }
    }

    /// Parses a shape kind from a single character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'L' => Some(ShapeKind::L),
            'T' => Some(ShapeKind::T),
            'I' => Some(ShapeKind::I),
            'O' => Some(ShapeKind::O),
            'Z' => Some(ShapeKind::Z),
            'S' => Some(ShapeKind::S),
            _ => None,
        }
    }
}

const SHAPE_CELLS: [[CellOffset; ShapeKind::CELL_COUNT]; ShapeKind::LEN] = [
    // L-shape
    [(0, 0), (1, 0), (2, 0), (2, 1)],
    // T-shape
    [(0, 1), (1, 0), (1, 1), (1, 2)],
    // I-shape
    [(0, 0), (1, 0), (2, 0), (3, 0)],
    // O-shape
    [(0, 0), (0, 1), (1, 0), (1, 1)],
    // Z-shape
    [(0, 0), (0, 1), (1, 1), (1, 2)],
    // S-shape
    [(0, 1), (0, 2), (1, 0), (1, 1)],
];

/// Color assigned to a block, drawn from a fixed palette.
///
/// Colors carry no gameplay semantics; occupied cells remember their color
/// only so the presentation layer can render them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum BlockColor {
    Red = 0,
    Green = 1,
    Blue = 2,
    Yellow = 3,
    Purple = 4,
    Orange = 5,
}

impl Distribution<BlockColor> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BlockColor {
        match rng.random_range(0..=5) {
            0 => BlockColor::Red,
            1 => BlockColor::Green,
            2 => BlockColor::Blue,
            3 => BlockColor::Yellow,
            4 => BlockColor::Purple,
            _ => BlockColor::Orange,
        }
    }
}

impl BlockColor {
    /// Number of palette entries (6).
    pub const LEN: usize = 6;

    /// Returns the display color as an `(r, g, b)` triple.
    #[must_use]
    pub const fn as_rgb(self) -> (u8, u8, u8) {
        match self {
            BlockColor::Red => (0xFF, 0x52, 0x52),
            BlockColor::Green => (0x4C, 0xAF, 0x50),
            BlockColor::Blue => (0x21, 0x96, 0xF3),
            BlockColor::Yellow => (0xFF, 0xC1, 0x07),
            BlockColor::Purple => (0x9C, 0x27, 0xB0),
            BlockColor::Orange => (0xFF, 0x98, 0x00),
        }
    }
}

/// A placeable block: a shape plus an assigned color.
///
/// A `Block` is a value; it has no identity beyond its contents and is never
/// mutated after creation. Its cell layout derives from the shape catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Block {
    kind: ShapeKind,
    color: BlockColor,
}

impl Block {
    #[must_use]
    pub const fn new(kind: ShapeKind, color: BlockColor) -> Self {
        Self { kind, color }
    }

    #[must_use]
    pub const fn kind(self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub const fn color(self) -> BlockColor {
        self.color
    }

    /// Returns the relative cell offsets this block covers.
    #[must_use]
    pub const fn cells(self) -> &'static [CellOffset; ShapeKind::CELL_COUNT] {
        self.kind.cells()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [ShapeKind; ShapeKind::LEN] = [
        ShapeKind::L,
        ShapeKind::T,
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::Z,
        ShapeKind::S,
    ];

    #[test]
    fn test_shape_cells_are_normalized() {
        for kind in ALL_KINDS {
            let cells = kind.cells();
            let min_row = cells.iter().map(|&(r, _)| r).min().unwrap();
            let min_col = cells.iter().map(|&(_, c)| c).min().unwrap();
            assert_eq!(min_row, 0, "{kind:?} has unnormalized rows");
            assert_eq!(min_col, 0, "{kind:?} has unnormalized cols");
        }
    }

    #[test]
    fn test_shape_cells_are_distinct() {
        for kind in ALL_KINDS {
            let cells = kind.cells();
            for (i, a) in cells.iter().enumerate() {
                for b in &cells[i + 1..] {
                    assert_ne!(a, b, "{kind:?} has duplicate cell {a:?}");
                }
            }
        }
    }

    #[test]
    fn test_every_shape_covers_four_cells() {
        for kind in ALL_KINDS {
            assert_eq!(kind.cells().len(), ShapeKind::CELL_COUNT);
        }
    }

    #[test]
    fn test_shape_kind_char_conversion() {
        for kind in ALL_KINDS {
            assert_eq!(ShapeKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(ShapeKind::from_char('X'), None);
        assert_eq!(ShapeKind::from_char('l'), None);
    }

    #[test]
    fn test_o_shape_is_square() {
        assert_eq!(ShapeKind::O.cells(), &[(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_block_cells_follow_shape() {
        let block = Block::new(ShapeKind::I, BlockColor::Blue);
        assert_eq!(block.cells(), ShapeKind::I.cells());
        assert_eq!(block.color(), BlockColor::Blue);
    }
}
