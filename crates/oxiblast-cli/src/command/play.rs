use crossterm::event::{self, Event, KeyCode};
use oxiblast_engine::{BOARD_SIZE, BlockTray, GameState, Position, TraySeed};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block as BlockWidget, Clear, Padding},
};

use crate::ui::widgets::{BoardDisplay, StatsDisplay, TrayDisplay, color, style};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for the block sequence (32 hex digits); random if omitted
    #[clap(long)]
    seed: Option<TraySeed>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { seed } = arg;

    let state = match seed {
        Some(seed) => GameState::with_seed(*seed),
        None => GameState::new(),
    };
    let mut screen = PlayScreen::new(state);

    ratatui::run(|terminal| {
        while !screen.is_exiting() {
            terminal.draw(|frame| screen.draw(frame))?;
            screen.handle_event(&event::read()?);
        }
        Ok(())
    })
}

#[derive(Debug)]
struct PlayScreen {
    state: GameState,
    cursor: (usize, usize),
    selected: usize,
    is_exiting: bool,
}

impl PlayScreen {
    fn new(state: GameState) -> Self {
        Self {
            state,
            cursor: (0, 0),
            selected: 0,
            is_exiting: false,
        }
    }

    fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        let help_text = if self.state.is_over() {
            "Controls: R (New Game) | Q (Quit)"
        } else {
            "Controls: ← ↑ → ↓ (Move Cursor) | Tab 1 2 3 (Select Block) | Enter (Place) | R (New Game) | Q (Quit)"
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
                .areas::<2>(frame.area());

        self.draw_main(frame, main_area);
        frame.render_widget(help_text, help_area);
    }

    fn draw_main(&self, frame: &mut Frame<'_>, area: Rect) {
        let border_color = if self.state.is_over() {
            color::RED
        } else {
            color::WHITE
        };
        let block_padding = Padding::symmetric(1, 0);

        let stats = StatsDisplay::new(&self.state).block(
            BlockWidget::bordered()
                .title(Line::from("STATS").centered())
                .padding(block_padding)
                .border_style(border_color)
                .style(style::DEFAULT),
        );

        let (cursor_row, cursor_col) = self.cursor;
        let position = Position::new(cursor_row, cursor_col);
        let board = {
            let widget = BoardDisplay::new(self.state.board())
                .block(BlockWidget::bordered().border_style(border_color).style(style::DEFAULT));
            match self.state.blocks().get(self.selected) {
                Some(&selected_block) if !self.state.is_over() => widget.ghost(
                    selected_block,
                    position,
                    self.state.can_place(self.selected, position),
                ),
                _ => widget,
            }
        };

        let mut stuck = [false; BlockTray::SLOTS];
        for (slot, flag) in stuck.iter_mut().enumerate() {
            *flag = !self.state.can_place_anywhere(slot);
        }
        let tray = TrayDisplay::new(self.state.blocks(), self.selected).stuck(stuck);

        let [stats_column, board_column, tray_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(board.width()),
            Constraint::Length(tray.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(stats.height())]).areas(stats_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(board.height())]).areas(board_column);
        let [tray_area] = Layout::vertical([Constraint::Length(tray.height())]).areas(tray_column);

        let board_width = board.width();
        frame.render_widget(stats, stats_area);
        frame.render_widget(board, board_area);
        frame.render_widget(tray, tray_area);

        if self.state.is_over() {
            let popup_style = Style::new().fg(color::WHITE).bg(color::RED);
            let popup_block = BlockWidget::new().style(popup_style);
            let text = Text::styled("GAME OVER!!", popup_style).centered();
            let popup_area = board_area
                .centered(Constraint::Length(board_width), Constraint::Length(3));
            let inner = popup_block.inner(popup_area);
            frame.render_widget(Clear, popup_area);
            frame.render_widget(popup_block, popup_area);
            frame.render_widget(text, inner.centered_vertically(Constraint::Length(1)));
        }
    }

    fn handle_event(&mut self, event: &Event) {
        let is_playing = !self.state.is_over();
        let (row, col) = self.cursor;

        if let Some(event) = event.as_key_event() {
            match event.code {
                KeyCode::Left if is_playing => self.cursor = (row, col.saturating_sub(1)),
                KeyCode::Right if is_playing => {
                    self.cursor = (row, usize::min(col + 1, BOARD_SIZE - 1));
                }
                KeyCode::Up if is_playing => self.cursor = (row.saturating_sub(1), col),
                KeyCode::Down if is_playing => {
                    self.cursor = (usize::min(row + 1, BOARD_SIZE - 1), col);
                }
                KeyCode::Tab if is_playing => {
                    self.selected = (self.selected + 1) % BlockTray::SLOTS;
                }
                KeyCode::Char(c @ '1'..='3') if is_playing => {
                    self.selected = c as usize - '1' as usize;
                }
                KeyCode::Enter | KeyCode::Char(' ') if is_playing => {
                    self.state = self.state.apply_move(self.selected, Position::new(row, col));
                }
                KeyCode::Char('r') => {
                    self.state = GameState::new();
                    self.cursor = (0, 0);
                    self.selected = 0;
                }
                KeyCode::Char('q') => self.is_exiting = true,
                _ => {}
            }
        }
    }
}
