//! Main UI application
//!
//! One screen for play, a popup for nickname entry, and a final
//! scoreboard screen. The app owns the engine and forwards typed command
//! lines to it verbatim.

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::game::Game;
use crate::score::{format_elapsed, Leaderboard};

use super::minimap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Playing,
    EnterName,
    Scores,
    Quit,
}

/// Main UI application
pub struct App {
    game: Game,
    screen: Screen,
    input: String,
    log: Vec<String>,
    name_buffer: String,
    score_lines: Vec<String>,
}

impl App {
    pub fn new(game: Game) -> Self {
        let log = vec![
            "You step through the castle gate. It does not reopen behind you.".to_string(),
            "Commands: move <dir>, look, take <item>, use <item>, equip <item>,".to_string(),
            "          talk, attack, inventory, status, quit.".to_string(),
            String::new(),
            game.room_view(),
            String::new(),
        ];
        Self {
            game,
            screen: Screen::Playing,
            input: String::new(),
            log,
            name_buffer: String::new(),
            score_lines: Vec::new(),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.screen == Screen::Quit
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.screen {
            Screen::Playing => self.handle_play_key(key),
            Screen::EnterName => self.handle_name_key(key),
            Screen::Scores => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
                    self.screen = Screen::Quit;
                }
            }
            Screen::Quit => {}
        }
    }

    fn handle_play_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.screen = Screen::Quit,
            KeyCode::Enter => self.submit_command(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    fn submit_command(&mut self) {
        let command = std::mem::take(&mut self.input);
        if command.trim().is_empty() {
            return;
        }

        self.log.push(format!("> {}", command));
        let reply = self.game.handle_command(&command);
        for line in reply.lines() {
            self.log.push(line.to_string());
        }
        self.log.push(String::new());

        if !self.game.is_running() {
            if self.game.is_cleared() {
                self.log
                    .push(format!("Cleared in {}.", format_elapsed(self.game.elapsed_ms())));
                self.screen = Screen::EnterName;
            } else {
                self.log.push("Press Esc to leave the dungeon.".to_string());
            }
        }
    }

    fn handle_name_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_alphabetic() && self.name_buffer.len() < 3 => {
                self.name_buffer.push(c.to_ascii_uppercase());
            }
            KeyCode::Backspace => {
                self.name_buffer.pop();
            }
            KeyCode::Enter if self.name_buffer.len() == 3 => self.record_score(),
            // Skipping the board is allowed; the run still counts.
            KeyCode::Esc => {
                let board = Leaderboard::open();
                self.show_scores(&board, None);
            }
            _ => {}
        }
    }

    fn record_score(&mut self) {
        let mut board = Leaderboard::open();
        let nickname = std::mem::take(&mut self.name_buffer);
        let warning = match board.insert(
            &nickname,
            self.game.elapsed_ms(),
            Local::now(),
            self.game.seed(),
        ) {
            Ok(()) => None,
            Err(e) => {
                log::warn!("failed to record score: {}", e);
                Some(format!("Could not record the score: {}", e))
            }
        };
        self.show_scores(&board, warning);
    }

    fn show_scores(&mut self, board: &Leaderboard, warning: Option<String>) {
        let elapsed = self.game.elapsed_ms();
        let mut lines = Vec::new();
        if let Some(w) = warning {
            lines.push(w);
            lines.push(String::new());
        }
        lines.push(format!(
            "Your time: {}  (rank {})",
            format_elapsed(elapsed),
            board.rank(elapsed)
        ));
        lines.push(String::new());
        lines.push("Fastest delves".to_string());
        let top = board.top(10);
        if top.is_empty() {
            lines.push("No recorded runs yet.".to_string());
        }
        lines.extend(top);
        lines.push(String::new());
        lines.push("Press Enter to leave.".to_string());

        self.score_lines = lines;
        self.screen = Screen::Scores;
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    pub fn draw(&self, frame: &mut Frame) {
        if self.screen == Screen::Scores {
            self.draw_scores(frame);
            return;
        }
        self.draw_play(frame);
        if self.screen == Screen::EnterName {
            self.draw_name_popup(frame);
        }
    }

    fn draw_play(&self, frame: &mut Frame) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(40), Constraint::Length(26)])
            .split(frame.area());
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(columns[0]);

        // Scrollback: render whatever tail fits the pane.
        let visible = left[0].height.saturating_sub(2) as usize;
        let start = self.log.len().saturating_sub(visible);
        let log_lines: Vec<Line> = self.log[start..]
            .iter()
            .map(|l| Line::from(l.clone()))
            .collect();
        frame.render_widget(
            Paragraph::new(log_lines)
                .block(Block::default().borders(Borders::ALL).title("Gloomkeep")),
            left[0],
        );

        frame.render_widget(
            Paragraph::new(format!("> {}", self.input))
                .block(Block::default().borders(Borders::ALL).title("Command")),
            left[1],
        );

        let map_height = (self.game.grid().height() * 2 + 1) as u16;
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(map_height), Constraint::Min(4)])
            .split(columns[1]);

        frame.render_widget(
            Paragraph::new(minimap::minimap_lines(&self.game))
                .block(Block::default().borders(Borders::ALL).title("Map")),
            right[0],
        );

        let status = vec![
            Line::from(format!("Health  {}", self.game.player_health())),
            Line::from(format!("Time    {}", format_elapsed(self.game.elapsed_ms()))),
            Line::from(format!("Seed    {}", self.game.seed())),
            Line::from("Esc quits".to_string()),
        ];
        frame.render_widget(
            Paragraph::new(status).block(Block::default().borders(Borders::ALL).title("Status")),
            right[1],
        );
    }

    fn draw_name_popup(&self, frame: &mut Frame) {
        let area = centered_rect(34, 5, frame.area());
        frame.render_widget(Clear, area);
        let lines = vec![
            Line::from("Enter a 3-letter name:"),
            Line::from(""),
            Line::styled(
                format!("   {:_<3}", self.name_buffer),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL).title("Cleared!")),
            area,
        );
    }

    fn draw_scores(&self, frame: &mut Frame) {
        let lines: Vec<Line> = self
            .score_lines
            .iter()
            .map(|l| Line::from(l.clone()))
            .collect();
        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL).title("Leaderboard")),
            frame.area(),
        );
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
