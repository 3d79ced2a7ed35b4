//! Keyboard and mouse controls plus the on-screen menu and playback button.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Clear, Paragraph},
};

pub const MENU_TITLE: &str = "Select a visualization:";
const MENU_COLUMNS: usize = 2;
const PLAY_GLYPH: &str = "▶";
const PAUSE_GLYPH: &str = "⏸";
const BUTTON_WIDTH: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    ToggleMenu,
    /// 0-based display slot.
    Select(usize),
    Next,
    TogglePlayback,
    ToggleFullscreen,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub menu_displayed: bool,
    pub fullscreen: bool,
}

impl Controls {
    pub fn handle_key(&self, code: KeyCode, mods: KeyModifiers) -> Action {
        if mods.contains(KeyModifiers::CONTROL) && matches!(code, KeyCode::Char('c')) {
            return Action::Quit;
        }
        match code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Action::Quit,
            KeyCode::Char(' ') => Action::ToggleMenu,
            KeyCode::Char(c @ '1'..='9') => Action::Select((c as u8 - b'1') as usize),
            KeyCode::Tab | KeyCode::Char('n') => Action::Next,
            KeyCode::Char('p') => Action::TogglePlayback,
            KeyCode::Char('f') => Action::ToggleFullscreen,
            _ => Action::None,
        }
    }

    /// A click on the playback button toggles playback; anywhere else toggles
    /// fullscreen.
    pub fn handle_click(&self, column: u16, row: u16, canvas: Rect) -> Action {
        if play_button(canvas).contains(Position::new(column, row)) {
            Action::TogglePlayback
        } else {
            Action::ToggleFullscreen
        }
    }

    /// Applies the parts of an action that only touch overlay state.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::ToggleMenu => self.menu_displayed = !self.menu_displayed,
            Action::ToggleFullscreen => self.fullscreen = !self.fullscreen,
            _ => {}
        }
    }

    pub fn draw(&self, f: &mut Frame, canvas: Rect, playing: bool, names: &[&str]) {
        let glyph = if playing { PAUSE_GLYPH } else { PLAY_GLYPH };
        f.render_widget(
            Paragraph::new(glyph).style(Style::default().fg(Color::White).bold()),
            play_button(canvas),
        );
        if self.menu_displayed {
            draw_menu(f, canvas, names);
        }
    }
}

/// Top-left cell block of the canvas.
pub fn play_button(canvas: Rect) -> Rect {
    Rect::new(canvas.x, canvas.y, BUTTON_WIDTH.min(canvas.width), canvas.height.min(1))
}

/// `N: name` labels split into columns, filled left to right then top to bottom.
pub fn menu_columns(names: &[&str]) -> [Vec<String>; MENU_COLUMNS] {
    let mut columns: [Vec<String>; MENU_COLUMNS] = Default::default();
    for (i, name) in names.iter().enumerate() {
        columns[i % MENU_COLUMNS].push(format!("{}: {name}", i + 1));
    }
    columns
}

fn menu_area(canvas: Rect, rows: u16) -> Rect {
    let width = (canvas.width * 2 / 3).max(MENU_TITLE.len() as u16 + 4).min(canvas.width);
    let height = (rows + 2).min(canvas.height);
    Rect::new(
        canvas.x + (canvas.width - width) / 2,
        canvas.y + (canvas.height - height) / 2,
        width,
        height,
    )
}

fn draw_menu(f: &mut Frame, canvas: Rect, names: &[&str]) {
    let columns = menu_columns(names);
    let rows = names.len().div_ceil(MENU_COLUMNS) as u16;
    let area = menu_area(canvas, rows);

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .title(Line::from(MENU_TITLE).centered())
        .style(Style::default().fg(Color::Rgb(51, 51, 51)).bg(Color::White));
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let cells = Layout::horizontal([Constraint::Ratio(1, MENU_COLUMNS as u32); MENU_COLUMNS])
        .split(inner);
    for (column, cell) in columns.into_iter().zip(cells.iter()) {
        let lines: Vec<Line> = column.into_iter().map(Line::from).collect();
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), *cell);
    }
}
