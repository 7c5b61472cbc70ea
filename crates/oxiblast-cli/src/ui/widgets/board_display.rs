use std::iter;

use oxiblast_engine::{BOARD_SIZE, Block, Board, Position};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::ui::widgets::CellDisplay;

/// Renders the 8×8 board, optionally overlaying a placement preview.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    ghost: Option<(Block, Position, bool)>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            ghost: None,
            block: None,
        }
    }

    /// Overlays the selected block at the cursor position, styled by whether
    /// the placement would be legal.
    pub fn ghost(self, ghost_block: Block, position: Position, legal: bool) -> Self {
        Self {
            ghost: Some((ghost_block, position, legal)),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        u16::try_from(BOARD_SIZE).unwrap() * CellDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(BOARD_SIZE).unwrap() * CellDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        // Ghost cells running off the board are simply not drawn; the
        // illegal styling on the in-range cells is signal enough.
        let mut ghost_mask = [[false; BOARD_SIZE]; BOARD_SIZE];
        let mut ghost_legal = false;
        if let Some((ghost_block, position, legal)) = self.ghost {
            ghost_legal = legal;
            for &(dr, dc) in ghost_block.cells() {
                let row = position.row() + dr;
                let col = position.col() + dc;
                if row < BOARD_SIZE && col < BOARD_SIZE {
                    ghost_mask[row][col] = true;
                }
            }
        }

        let col_constraints = (0..BOARD_SIZE).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..BOARD_SIZE).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_rows = area
            .layout::<BOARD_SIZE>(&vertical)
            .into_iter()
            .map(|row| row.layout::<BOARD_SIZE>(&horizontal));

        for (grid_row, (cells, mask_row)) in
            iter::zip(grid_rows, iter::zip(self.board.rows(), &ghost_mask))
        {
            for (grid_cell, (&cell, &masked)) in
                iter::zip(grid_row, iter::zip(cells, mask_row))
            {
                let cell_display = if masked {
                    CellDisplay::ghost(ghost_legal)
                } else {
                    CellDisplay::from_cell(cell, true)
                };
                cell_display.render(grid_cell, buf);
            }
        }
    }
}
