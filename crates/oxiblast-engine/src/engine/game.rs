use crate::{
    core::{
        block::Block,
        board::{BOARD_SIZE, Board, Position},
    },
    engine::{block_tray::BlockTray, scoring::ScoreTracker},
};

use super::block_tray::TraySeed;

/// A full game snapshot: board, offered blocks, score, and terminal flag.
///
/// `GameState` is a value: [`GameState::apply_move`] returns a new state and
/// never mutates the receiver, so a caller can hold the previous snapshot
/// for rendering or comparison. All game rules run inside `apply_move`; the
/// presentation layer only supplies a tray slot and a board position.
///
/// Invariants:
///
/// - The tray always offers exactly [`BlockTray::SLOTS`] blocks.
/// - Once the terminal flag is set, no move changes the state; starting over
///   requires a fresh [`GameState::new`].
/// - The score never decreases within a game.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    tray: BlockTray,
    scoring: ScoreTracker,
    game_over: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates the initial state: empty board, three fresh blocks, zero
    /// score, zero combo, not over.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tray(BlockTray::new())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic block
    /// generation.
    #[must_use]
    pub fn with_seed(seed: TraySeed) -> Self {
        Self::with_tray(BlockTray::with_seed(seed))
    }

    fn with_tray(tray: BlockTray) -> Self {
        Self {
            board: Board::EMPTY,
            tray,
            scoring: ScoreTracker::new(),
            game_over: false,
        }
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the blocks currently offered to the player.
    #[must_use]
    pub const fn blocks(&self) -> &[Block; BlockTray::SLOTS] {
        self.tray.blocks()
    }

    #[must_use]
    pub const fn scoring(&self) -> &ScoreTracker {
        &self.scoring
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.scoring.score()
    }

    #[must_use]
    pub const fn combo_streak(&self) -> usize {
        self.scoring.combo_streak()
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.game_over
    }

    /// Checks whether the block in `slot` fits at `position`.
    ///
    /// Useful for presentation-layer previews; `apply_move` re-checks on its
    /// own.
    #[must_use]
    pub fn can_place(&self, slot: usize, position: Position) -> bool {
        self.tray
            .block(slot)
            .is_some_and(|block| self.board.can_place(block, position))
    }

    /// Checks whether the block in `slot` fits anywhere on the board.
    #[must_use]
    pub fn can_place_anywhere(&self, slot: usize) -> bool {
        self.tray
            .block(slot)
            .is_some_and(|block| fits_somewhere(&self.board, block))
    }

    /// Applies one player move, returning the resulting state.
    ///
    /// A legal move places the block from `slot` at `position`, clears full
    /// lines, updates score and combo, refills the consumed slot only, and
    /// runs the terminal check. The move is rejected as a silent no-op (the
    /// state comes back unchanged) when:
    ///
    /// - the game is already over,
    /// - `slot` does not reference an offered block, or
    /// - the block does not fit at `position`.
    ///
    /// Rejection is the expected outcome of most failed drop gestures, not
    /// an error condition.
    #[must_use]
    pub fn apply_move(&self, slot: usize, position: Position) -> Self {
        if self.game_over {
            return self.clone();
        }
        let Some(block) = self.tray.block(slot) else {
            return self.clone();
        };
        if !self.board.can_place(block, position) {
            return self.clone();
        }

        let (board, cleared_lines) = self.board.with_block(block, position).clear_full_lines();

        let mut next = self.clone();
        next.board = board;
        next.scoring.record_placement(block.cells().len(), cleared_lines);
        next.tray.replace(slot);
        // Exhaustive: a single placeable position for a single block keeps
        // the game alive.
        next.game_over = !next
            .tray
            .blocks()
            .iter()
            .any(|&block| fits_somewhere(&next.board, block));
        next
    }
}

fn fits_somewhere(board: &Board, block: Block) -> bool {
    (0..BOARD_SIZE).any(|row| {
        (0..BOARD_SIZE).any(|col| board.can_place(block, Position::new(row, col)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlockColor, Cell, ShapeKind};

    fn seeded_state() -> GameState {
        GameState::with_seed("0123456789abcdeffedcba9876543210".parse().unwrap())
    }

    /// Builds a state with a hand-crafted board and tray contents.
    fn state_with(board: Board, blocks: [Block; BlockTray::SLOTS]) -> GameState {
        let mut state = seeded_state();
        state.board = board;
        state.tray.set_blocks(blocks);
        state
    }

    const FILLER: Cell = Cell::Filled {
        color: BlockColor::Red,
        shape: ShapeKind::O,
    };

    /// Fills the listed `(row, col)` cells of an empty board.
    fn board_with_filled(cells: &[(usize, usize)]) -> Board {
        let mut board = Board::EMPTY;
        for &(row, col) in cells {
            board.set_cell(row, col, FILLER);
        }
        board
    }

    /// Fills the whole board except the listed `(row, col)` cells.
    fn filled_board_with_holes(holes: &[(usize, usize)]) -> Board {
        let mut board = Board::EMPTY;
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if !holes.contains(&(row, col)) {
                    board.set_cell(row, col, FILLER);
                }
            }
        }
        board
    }

    #[test]
    fn test_initial_state() {
        let state = GameState::new();
        assert!(state.board().is_empty());
        assert_eq!(state.blocks().len(), BlockTray::SLOTS);
        assert_eq!(state.score(), 0);
        assert_eq!(state.combo_streak(), 0);
        assert!(!state.is_over());
    }

    #[test]
    fn test_first_move_on_empty_board_scores_forty() {
        let state = state_with(
            Board::EMPTY,
            [Block::new(ShapeKind::O, BlockColor::Green); BlockTray::SLOTS],
        );
        let next = state.apply_move(0, Position::new(0, 0));
        assert_eq!(next.score(), 40);
        assert_eq!(next.combo_streak(), 0);
        assert!(!next.is_over());
        // The consumed slot was refilled; the board kept the placement.
        assert_eq!(next.blocks().len(), BlockTray::SLOTS);
        assert!(next.board().cell(0, 0).is_filled());
    }

    #[test]
    fn test_move_replaces_consumed_slot_only() {
        let blocks = [
            Block::new(ShapeKind::L, BlockColor::Red),
            Block::new(ShapeKind::T, BlockColor::Blue),
            Block::new(ShapeKind::I, BlockColor::Purple),
        ];
        let state = state_with(Board::EMPTY, blocks);
        let next = state.apply_move(1, Position::new(0, 0));
        assert_eq!(next.blocks()[0], blocks[0]);
        assert_eq!(next.blocks()[2], blocks[2]);
    }

    #[test]
    fn test_illegal_placement_is_noop() {
        let state = state_with(
            Board::EMPTY,
            [Block::new(ShapeKind::I, BlockColor::Blue); BlockTray::SLOTS],
        );
        // I spans 4 rows; row 5 runs off the board.
        let next = state.apply_move(0, Position::new(5, 0));
        assert_eq!(next.score(), 0);
        assert!(next.board().is_empty());
        assert_eq!(next.blocks(), state.blocks());
    }

    #[test]
    fn test_bad_slot_is_noop() {
        let state = seeded_state();
        let next = state.apply_move(BlockTray::SLOTS, Position::new(0, 0));
        assert_eq!(next.score(), 0);
        assert!(next.board().is_empty());
    }

    #[test]
    fn test_completing_a_row_clears_and_scores() {
        // Row 3 full except (3, 7); a vertical I placed at (0, 7) covers it.
        let row_3_cells: Vec<(usize, usize)> = (0..7).map(|col| (3, col)).collect();
        let board = board_with_filled(&row_3_cells);
        let state = state_with(
            board,
            [Block::new(ShapeKind::I, BlockColor::Yellow); BlockTray::SLOTS],
        );
        let next = state.apply_move(0, Position::new(0, 7));

        // delta = 10 * 4 + 1 * 50 * (0 + 1)
        assert_eq!(next.score(), 90);
        assert_eq!(next.combo_streak(), 1);
        assert_eq!(next.scoring().total_cleared_lines(), 1);
        // Row 3 is gone; the other I cells remain.
        for col in 0..BOARD_SIZE {
            assert!(next.board().cell(3, col).is_empty());
        }
        assert!(next.board().cell(0, 7).is_filled());
    }

    #[test]
    fn test_consecutive_clears_raise_combo() {
        // Each setup leaves one row full except its last cell; a vertical I
        // placed in column 7 completes it.
        let row_missing_last = |row: usize| {
            let cells: Vec<(usize, usize)> = (0..7).map(|col| (row, col)).collect();
            board_with_filled(&cells)
        };

        let state = state_with(
            row_missing_last(0),
            [Block::new(ShapeKind::I, BlockColor::Red); BlockTray::SLOTS],
        );
        let after_first = state.apply_move(0, Position::new(0, 7));
        assert_eq!(after_first.combo_streak(), 1);
        let first_bonus = after_first.score() - 40;
        assert_eq!(first_bonus, 50);

        // Hand the follow-up state another clearable row.
        let mut second = after_first.clone();
        second.board = row_missing_last(2);
        second
            .tray
            .set_blocks([Block::new(ShapeKind::I, BlockColor::Red); BlockTray::SLOTS]);
        let after_second = second.apply_move(0, Position::new(2, 7));
        assert_eq!(after_second.combo_streak(), 2);
        // Per-line bonus doubled: 50 * (1 + 1).
        assert_eq!(after_second.score() - after_first.score(), 40 + 100);
    }

    /// An O pocket at the top-left corner plus one isolated hole per row and
    /// column. After the O lands, every line still misses a cell and no two
    /// empty cells are orthogonally adjacent, so nothing clears and no
    /// 4-cell shape fits anywhere.
    fn almost_dead_board() -> Board {
        filled_board_with_holes(&[
            (0, 0),
            (0, 1),
            (1, 0),
            (1, 1),
            (0, 4),
            (1, 6),
            (2, 5),
            (3, 2),
            (4, 0),
            (5, 7),
            (6, 1),
            (7, 3),
        ])
    }

    #[test]
    fn test_terminal_when_no_block_fits_after_move() {
        let board = almost_dead_board();
        let state = state_with(
            board,
            [Block::new(ShapeKind::O, BlockColor::Purple); BlockTray::SLOTS],
        );
        assert!(!state.is_over());

        let next = state.apply_move(0, Position::new(0, 0));
        assert!(next.is_over());
        assert_eq!(next.scoring().total_cleared_lines(), 0);
    }

    #[test]
    fn test_moves_after_game_over_are_noops() {
        let state = state_with(
            almost_dead_board(),
            [Block::new(ShapeKind::O, BlockColor::Purple); BlockTray::SLOTS],
        );
        let over = state.apply_move(0, Position::new(0, 0));
        assert!(over.is_over());

        let frozen = over.apply_move(0, Position::new(4, 4));
        assert_eq!(frozen.score(), over.score());
        assert!(frozen.is_over());
    }

    #[test]
    fn test_fresh_state_after_any_history() {
        let mut state = seeded_state();
        for _ in 0..5 {
            state = state.apply_move(0, Position::new(0, 0));
            state = state.apply_move(1, Position::new(4, 4));
        }
        let fresh = GameState::new();
        assert!(fresh.board().is_empty());
        assert_eq!(fresh.score(), 0);
        assert_eq!(fresh.combo_streak(), 0);
        assert!(!fresh.is_over());
    }

    #[test]
    fn test_can_place_preview_matches_apply_move() {
        let state = state_with(
            Board::EMPTY,
            [Block::new(ShapeKind::I, BlockColor::Blue); BlockTray::SLOTS],
        );
        assert!(state.can_place(0, Position::new(4, 0)));
        assert!(!state.can_place(0, Position::new(5, 0)));
        assert!(state.can_place_anywhere(0));
        assert!(!state.can_place(BlockTray::SLOTS, Position::new(0, 0)));
    }
}
