/// Points awarded per placed cell.
const CELL_POINTS: usize = 10;

/// Base points per cleared line, before the combo multiplier.
const LINE_POINTS: usize = 50;

/// Score and combo accounting for a single game.
///
/// Each placement of a block covering `k` cells that clears `lines` lines
/// scores:
///
/// ```text
/// delta = 10 * k + lines * 50 * (combo_streak + 1)
/// ```
///
/// where `combo_streak` is the streak entering the move. The streak counts
/// consecutive moves that each cleared at least one line: a clearing move
/// increments it, any other move resets it to zero. Consecutive clearing
/// moves therefore multiply the per-line bonus by an incrementing factor.
///
/// The score never decreases within a game.
///
/// # Example
///
/// ```
/// use oxiblast_engine::ScoreTracker;
///
/// let mut tracker = ScoreTracker::new();
/// assert_eq!(tracker.record_placement(4, 0), 40);
/// assert_eq!(tracker.record_placement(4, 1), 40 + 50);
/// assert_eq!(tracker.record_placement(4, 1), 40 + 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreTracker {
    score: usize,
    combo_streak: usize,
    placed_blocks: usize,
    total_cleared_lines: usize,
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreTracker {
    /// Creates a tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            combo_streak: 0,
            placed_blocks: 0,
            total_cleared_lines: 0,
        }
    }

    /// Returns the current score.
    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the current combo streak (consecutive clearing moves ending
    /// at the last recorded move).
    #[must_use]
    pub const fn combo_streak(&self) -> usize {
        self.combo_streak
    }

    /// Returns the total number of blocks placed.
    #[must_use]
    pub const fn placed_blocks(&self) -> usize {
        self.placed_blocks
    }

    /// Returns the total number of lines cleared across the game.
    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Records one placement and returns the score delta it earned.
    ///
    /// # Arguments
    ///
    /// * `placed_cells` - Number of cells the placed block covers
    /// * `cleared_lines` - Lines (rows + columns) the placement cleared
    pub const fn record_placement(&mut self, placed_cells: usize, cleared_lines: usize) -> usize {
        let delta = CELL_POINTS * placed_cells + cleared_lines * LINE_POINTS * (self.combo_streak + 1);
        self.score += delta;
        self.combo_streak = if cleared_lines > 0 {
            self.combo_streak + 1
        } else {
            0
        };
        self.placed_blocks += 1;
        self.total_cleared_lines += cleared_lines;
        delta
    }
}
