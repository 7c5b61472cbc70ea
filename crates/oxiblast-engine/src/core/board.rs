use arrayvec::ArrayVec;

use super::block::{Block, BlockColor, ShapeKind};

/// Side length of the square board.
pub const BOARD_SIZE: usize = 8;

/// A single board cell.
///
/// Occupied cells retain the originating shape in addition to the color so
/// the presentation layer can re-render the correct texture per cell even
/// after rows and columns clear independently around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by a placed block fragment.
    Filled { color: BlockColor, shape: ShapeKind },
}

/// Position of a block's origin cell on the board.
///
/// `(0, 0)` is the top-left corner; rows increase downward and columns
/// increase rightward. Both coordinates are bounded by [`BOARD_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        assert!(row < BOARD_SIZE);
        assert!(col < BOARD_SIZE);
        Self { row, col }
    }

    #[must_use]
    pub const fn row(self) -> usize {
        self.row
    }

    #[must_use]
    pub const fn col(self) -> usize {
        self.col
    }
}

/// The 8×8 playing field.
///
/// `Board` is an immutable value: [`Board::with_block`] and
/// [`Board::clear_full_lines`] return a new board and never touch the
/// receiver. Dimensions never change after initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    /// The all-empty board every game starts from.
    pub const EMPTY: Self = Self {
        cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
    };

    /// Returns the cell at the given coordinates.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is out of bounds.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Returns an iterator over the board's rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; BOARD_SIZE]> {
        self.cells.iter()
    }

    /// Checks whether every cell is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(|cell| cell.is_empty())
    }

    /// Checks whether the block fits at `position` without collision or
    /// running out of bounds.
    ///
    /// The placement is legal iff every covered cell lies on the board and
    /// is empty. A single violating cell rejects the whole placement; no
    /// partial placement exists.
    #[must_use]
    pub fn can_place(&self, block: Block, position: Position) -> bool {
        block.cells().iter().all(|&(dr, dc)| {
            let row = position.row() + dr;
            let col = position.col() + dc;
            row < BOARD_SIZE && col < BOARD_SIZE && self.cells[row][col].is_empty()
        })
    }

    /// Returns a new board with the block's cells filled at `position`.
    ///
    /// Precondition: the caller has confirmed [`Board::can_place`]. Calling
    /// this with an illegal placement is a caller bug, checked in debug
    /// builds only.
    #[must_use]
    pub fn with_block(&self, block: Block, position: Position) -> Self {
        debug_assert!(self.can_place(block, position));
        let mut placed = *self;
        for &(dr, dc) in block.cells() {
            placed.cells[position.row() + dr][position.col() + dc] = Cell::Filled {
                color: block.color(),
                shape: block.kind(),
            };
        }
        placed
    }

    /// Clears every full row and full column, returning the new board and
    /// the number of lines cleared.
    ///
    /// Rows and columns are both judged against the pre-clear snapshot, not
    /// sequentially: a row is full based on its state before any column
    /// clears apply, and vice versa. A cell at the intersection of a full
    /// row and a full column is cleared once, but the count credits the row
    /// and the column separately (two lines, not one).
    #[must_use]
    pub fn clear_full_lines(&self) -> (Self, usize) {
        let full_rows: ArrayVec<usize, BOARD_SIZE> = (0..BOARD_SIZE)
            .filter(|&row| self.cells[row].iter().all(|cell| cell.is_filled()))
            .collect();
        let full_cols: ArrayVec<usize, BOARD_SIZE> = (0..BOARD_SIZE)
            .filter(|&col| self.cells.iter().all(|row| row[col].is_filled()))
            .collect();

        let mut cleared = *self;
        for &row in &full_rows {
            cleared.cells[row] = [Cell::Empty; BOARD_SIZE];
        }
        for &col in &full_cols {
            for row in &mut cleared.cells {
                row[col] = Cell::Empty;
            }
        }
        (cleared, full_rows.len() + full_cols.len())
    }

    #[cfg(test)]
    pub(crate) fn set_cell(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row][col] = cell;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filler_cell() -> Cell {
        Cell::Filled {
            color: BlockColor::Red,
            shape: ShapeKind::O,
        }
    }

    /// Fills every listed `(row, col)` cell of an empty board.
    fn board_with_filled(cells: &[(usize, usize)]) -> Board {
        let mut board = Board::EMPTY;
        for &(row, col) in cells {
            board.cells[row][col] = filler_cell();
        }
        board
    }

    /// Fills the whole board except the listed `(row, col)` cells.
    fn board_with_holes(holes: &[(usize, usize)]) -> Board {
        let mut board = Board {
            cells: [[filler_cell(); BOARD_SIZE]; BOARD_SIZE],
        };
        for &(row, col) in holes {
            board.cells[row][col] = Cell::Empty;
        }
        board
    }

    #[test]
    fn test_can_place_on_empty_board() {
        let board = Board::EMPTY;
        let block = Block::new(ShapeKind::O, BlockColor::Green);
        assert!(board.can_place(block, Position::new(0, 0)));
        assert!(board.can_place(block, Position::new(6, 6)));
    }

    #[test]
    fn test_can_place_rejects_out_of_bounds() {
        let board = Board::EMPTY;
        // O extends 1 past the origin on both axes.
        let o = Block::new(ShapeKind::O, BlockColor::Green);
        assert!(!board.can_place(o, Position::new(7, 0)));
        assert!(!board.can_place(o, Position::new(0, 7)));
        // I extends 3 rows past the origin.
        let i = Block::new(ShapeKind::I, BlockColor::Blue);
        assert!(board.can_place(i, Position::new(4, 0)));
        assert!(!board.can_place(i, Position::new(5, 0)));
    }

    #[test]
    fn test_can_place_rejects_any_collision() {
        // A single occupied covered cell invalidates the whole placement.
        let board = board_with_filled(&[(1, 1)]);
        let o = Block::new(ShapeKind::O, BlockColor::Green);
        assert!(!board.can_place(o, Position::new(0, 0)));
        assert!(!board.can_place(o, Position::new(1, 1)));
        assert!(board.can_place(o, Position::new(2, 2)));
    }

    #[test]
    fn test_with_block_fills_covered_cells_only() {
        let board = Board::EMPTY;
        let block = Block::new(ShapeKind::L, BlockColor::Purple);
        let placed = board.with_block(block, Position::new(2, 3));

        for &(dr, dc) in block.cells() {
            assert_eq!(
                placed.cell(2 + dr, 3 + dc),
                Cell::Filled {
                    color: BlockColor::Purple,
                    shape: ShapeKind::L,
                }
            );
        }
        let filled = placed.rows().flatten().filter(|c| c.is_filled()).count();
        assert_eq!(filled, ShapeKind::CELL_COUNT);
        // The input board is a value; the original stays untouched.
        assert!(board.is_empty());
    }

    #[test]
    fn test_place_then_can_place_same_spot_is_false() {
        let board = Board::EMPTY;
        let block = Block::new(ShapeKind::T, BlockColor::Orange);
        let position = Position::new(3, 2);
        let placed = board.with_block(block, position);
        assert!(!placed.can_place(block, position));
    }

    #[test]
    fn test_clear_full_lines_noop_without_full_line() {
        let board = board_with_filled(&[(0, 0), (3, 4), (7, 7)]);
        let (cleared, lines) = board.clear_full_lines();
        assert_eq!(lines, 0);
        assert_eq!(cleared, board);
    }

    #[test]
    fn test_clear_single_full_row() {
        let full_row: Vec<_> = (0..BOARD_SIZE).map(|col| (3, col)).collect();
        let mut filled = full_row.clone();
        filled.push((5, 5));
        let board = board_with_filled(&filled);

        let (cleared, lines) = board.clear_full_lines();
        assert_eq!(lines, 1);
        for col in 0..BOARD_SIZE {
            assert!(cleared.cell(3, col).is_empty());
        }
        // Cells outside the cleared row survive.
        assert!(cleared.cell(5, 5).is_filled());
    }

    #[test]
    fn test_clear_single_full_column() {
        let full_col: Vec<_> = (0..BOARD_SIZE).map(|row| (row, 6)).collect();
        let board = board_with_filled(&full_col);

        let (cleared, lines) = board.clear_full_lines();
        assert_eq!(lines, 1);
        for row in 0..BOARD_SIZE {
            assert!(cleared.cell(row, 6).is_empty());
        }
    }

    #[test]
    fn test_intersecting_row_and_column_count_as_two_lines() {
        let mut filled: Vec<_> = (0..BOARD_SIZE).map(|col| (2, col)).collect();
        filled.extend((0..BOARD_SIZE).map(|row| (row, 4)));
        let board = board_with_filled(&filled);

        let (cleared, lines) = board.clear_full_lines();
        // The shared cell (2, 4) is cleared once but both lines count.
        assert_eq!(lines, 2);
        assert!(cleared.is_empty());
    }

    #[test]
    fn test_lines_judged_against_pre_clear_snapshot() {
        // Column 0 is full; row 0 is full only if column clearing has not
        // cascaded first. Both must be credited from the same snapshot.
        let mut filled: Vec<_> = (0..BOARD_SIZE).map(|col| (0, col)).collect();
        filled.extend((1..BOARD_SIZE).map(|row| (row, 0)));
        let board = board_with_filled(&filled);

        let (cleared, lines) = board.clear_full_lines();
        assert_eq!(lines, 2);
        assert!(cleared.is_empty());
    }

    #[test]
    fn test_full_board_clears_all_sixteen_lines() {
        let board = board_with_holes(&[]);
        let (cleared, lines) = board.clear_full_lines();
        assert_eq!(lines, BOARD_SIZE * 2);
        assert!(cleared.is_empty());
    }

    #[test]
    #[should_panic(expected = "row < BOARD_SIZE")]
    fn test_position_rejects_out_of_range_row() {
        let _ = Position::new(BOARD_SIZE, 0);
    }
}
