use std::iter;

use oxiblast_engine::{Block, BlockTray};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, Widget},
};

use crate::ui::widgets::{CellDisplay, color, style};

/// Side of the mini-grid every shape fits into (the tallest shape, I, spans
/// 4 rows).
const SLOT_GRID: usize = 4;

/// Renders the three offered blocks as numbered slots.
///
/// The selected slot gets a highlighted border; a slot whose block fits
/// nowhere on the board is bordered in red.
#[derive(Debug)]
pub struct TrayDisplay<'a> {
    blocks: &'a [Block; BlockTray::SLOTS],
    selected: usize,
    stuck: [bool; BlockTray::SLOTS],
}

impl<'a> TrayDisplay<'a> {
    pub fn new(blocks: &'a [Block; BlockTray::SLOTS], selected: usize) -> Self {
        Self {
            blocks,
            selected,
            stuck: [false; BlockTray::SLOTS],
        }
    }

    /// Marks the slots whose blocks cannot be placed anywhere.
    pub fn stuck(self, stuck: [bool; BlockTray::SLOTS]) -> Self {
        Self { stuck, ..self }
    }

    pub fn width(&self) -> u16 {
        u16::try_from(SLOT_GRID).unwrap() * CellDisplay::width() + 2
    }

    pub fn height(&self) -> u16 {
        let slot_height = u16::try_from(SLOT_GRID).unwrap() * CellDisplay::height() + 2;
        let slots = u16::try_from(BlockTray::SLOTS).unwrap();
        slot_height * slots + (slots - 1)
    }

    fn slot_height() -> u16 {
        u16::try_from(SLOT_GRID).unwrap() * CellDisplay::height() + 2
    }
}

impl Widget for TrayDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &TrayDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let slot_constraints = [Constraint::Length(TrayDisplay::slot_height()); BlockTray::SLOTS];
        let slot_areas = area.layout::<{ BlockTray::SLOTS }>(
            &Layout::vertical(slot_constraints).spacing(1),
        );

        for (slot, (slot_area, &slot_block)) in
            iter::zip(slot_areas, self.blocks).enumerate()
        {
            let border_color = if slot == self.selected {
                color::YELLOW
            } else if self.stuck[slot] {
                color::RED
            } else {
                color::WHITE
            };
            let panel = BlockWidget::bordered()
                .title(Line::from((slot + 1).to_string()).centered())
                .border_style(border_color)
                .style(style::DEFAULT);
            let inner = panel.inner(slot_area);
            panel.render(slot_area, buf);

            render_shape(slot_block, inner, buf);
        }
    }
}

fn render_shape(shape_block: Block, area: Rect, buf: &mut Buffer) {
    let mut occupied = [[false; SLOT_GRID]; SLOT_GRID];
    for &(dr, dc) in shape_block.cells() {
        occupied[dr][dc] = true;
    }

    let col_constraints = (0..SLOT_GRID).map(|_| Constraint::Length(CellDisplay::width()));
    let row_constraints = (0..SLOT_GRID).map(|_| Constraint::Length(CellDisplay::height()));
    let horizontal = Layout::horizontal(col_constraints);
    let vertical = Layout::vertical(row_constraints);

    let grid_rows = area
        .layout::<SLOT_GRID>(&vertical)
        .into_iter()
        .map(|row| row.layout::<SLOT_GRID>(&horizontal));

    for (grid_row, occupied_row) in iter::zip(grid_rows, &occupied) {
        for (grid_cell, &filled) in iter::zip(grid_row, occupied_row) {
            let cell_display = if filled {
                CellDisplay::new(style::block(shape_block.color()), "")
            } else {
                CellDisplay::new(style::EMPTY, "")
            };
            cell_display.render(grid_cell, buf);
        }
    }
}
