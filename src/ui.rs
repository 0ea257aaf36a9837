use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::game::Game;
use crate::session::Phase;

const INFO_HEIGHT: u16 = 1;
const INPUT_HEIGHT: u16 = 3;
const DIALOG_WIDTH: u16 = 44;
const DIALOG_HEIGHT: u16 = 7;

struct Areas {
    info: Rect,
    field: Rect,
    input: Rect,
}

fn split(area: Rect) -> Areas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(INFO_HEIGHT),
                Constraint::Min(3),
                Constraint::Length(INPUT_HEIGHT),
            ]
            .as_ref(),
        )
        .split(area);
    Areas {
        info: chunks[0],
        field: chunks[1],
        input: chunks[2],
    }
}

/// Columns and rows available to falling words inside a terminal area
pub fn field_cells(area: Rect) -> (u16, u16) {
    let inner = Block::default().borders(Borders::ALL).inner(split(area).field);
    (inner.width, inner.height)
}

impl Widget for &Game {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state();
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let areas = split(area);

        let info = Line::from(vec![
            Span::styled(format!("♥ {}", state.lives), bold_style.fg(Color::Red)),
            Span::raw("   "),
            Span::styled(format!("WPM: {}", state.wpm), bold_style),
            Span::raw("   "),
            Span::styled(format!("{}s", state.elapsed_secs), bold_style.fg(Color::Cyan)),
            Span::raw("   "),
            Span::styled(self.mode().kind().to_string(), dim_style),
        ]);
        Paragraph::new(info)
            .alignment(Alignment::Center)
            .render(areas.info, buf);

        let field_block = Block::default().borders(Borders::ALL);
        let field = field_block.inner(areas.field);
        field_block.render(areas.field, buf);

        match self.mode().prompt() {
            Some((line, cursor)) => render_prompt(line, cursor, field, buf),
            None => render_falling(self, field, buf),
        }

        Paragraph::new(state.input.as_str())
            .block(Block::default().borders(Borders::ALL).title("type here"))
            .render(areas.input, buf);

        match state.phase {
            Phase::Running => {}
            Phase::Idle => render_dialog(
                area,
                buf,
                &["wordfall", "", "(enter) start / (tab) mode / (esc) quit"],
            ),
            Phase::GameOver => {
                let lasted = format!("you lasted {} seconds", state.elapsed_secs);
                let wpm = format!("{} wpm", state.wpm);
                render_dialog(
                    area,
                    buf,
                    &["game over", lasted.as_str(), wpm.as_str(), "(enter) play again / (esc) quit"],
                );
            }
        }
    }
}

fn render_falling(game: &Game, field: Rect, buf: &mut Buffer) {
    let viewport = game.viewport();
    let word_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    for word in &game.state().active_words {
        let (col, row) = viewport.to_cell(word.left, word.top, field.width, field.height);
        let x = field.x + col;
        let y = field.y + row;
        let room = (field.right() - x) as usize;
        if room > 0 && y < field.bottom() {
            buf.set_stringn(x, y, &word.text, room, word_style);
        }
    }
}

fn render_prompt(line: &[String], cursor: usize, field: Rect, buf: &mut Buffer) {
    let spans: Vec<Span> = line
        .iter()
        .enumerate()
        .flat_map(|(idx, word)| {
            let style = match idx.cmp(&cursor) {
                std::cmp::Ordering::Less => Style::default().fg(Color::Green),
                std::cmp::Ordering::Equal => Style::default()
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                std::cmp::Ordering::Greater => Style::default().add_modifier(Modifier::DIM),
            };
            [Span::styled(word.clone(), style), Span::raw(" ")]
        })
        .collect();

    let text_width: usize = line.iter().map(|w| w.width() + 1).sum();
    let lines_needed = (text_width as u16 / field.width.max(1)) + 1;
    let top_pad = field.height.saturating_sub(lines_needed) / 2;
    let area = Rect {
        y: field.y + top_pad,
        height: field.height - top_pad,
        ..field
    };
    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

fn render_dialog(area: Rect, buf: &mut Buffer, lines: &[&str]) {
    let width = DIALOG_WIDTH.min(area.width);
    let height = DIALOG_HEIGHT.min(area.height);
    let dialog = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    Clear.render(dialog, buf);
    let text: Vec<Line> = lines
        .iter()
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default())))
        .collect();
    Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(dialog, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::ModeKind;
    use crate::viewport::Viewport;
    use crate::words::WordSource;
    use std::time::Duration;

    fn render_to_string(game: &Game, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    fn game(kind: ModeKind) -> Game {
        Game::new(kind, WordSource::new(["kelebek"]), Viewport::from_cells(78, 18), Some(1))
    }

    #[test]
    fn field_cells_excludes_chrome() {
        assert_eq!(field_cells(Rect::new(0, 0, 80, 24)), (78, 18));
    }

    #[test]
    fn idle_screen_offers_start() {
        let rendered = render_to_string(&game(ModeKind::Falling), 80, 24);
        assert!(rendered.contains("(enter) start"));
        assert!(rendered.contains("♥ 5"));
    }

    #[test]
    fn running_screen_shows_falling_words() {
        let mut g = game(ModeKind::Falling);
        g.start();
        g.advance(Duration::from_secs(1));
        let rendered = render_to_string(&g, 80, 24);
        assert!(rendered.contains("kelebek"));
        assert!(rendered.contains("WPM: 0"));
        assert!(!rendered.contains("(enter) start"));
    }

    #[test]
    fn game_over_screen_shows_summary() {
        let mut g = game(ModeKind::Sprint);
        g.start();
        g.advance(Duration::from_secs(60));
        assert_eq!(g.phase(), Phase::GameOver);
        let rendered = render_to_string(&g, 80, 24);
        assert!(rendered.contains("game over"));
        assert!(rendered.contains("you lasted 60 seconds"));
    }

    #[test]
    fn sprint_screen_shows_prompt() {
        let mut g = game(ModeKind::Sprint);
        g.start();
        let rendered = render_to_string(&g, 80, 24);
        assert!(rendered.contains("kelebek"));
        assert!(rendered.contains("sprint"));
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let mut g = game(ModeKind::Falling);
        g.start();
        g.advance(Duration::from_secs(3));
        for (w, h) in [(1, 1), (5, 3), (10, 8), (200, 60)] {
            let _ = render_to_string(&g, w, h);
        }
    }
}
