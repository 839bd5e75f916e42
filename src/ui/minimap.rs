//! Minimap pane
//!
//! Shows visited rooms, whatever lies through a door of the current room,
//! and the doors between shown rooms. The current room is highlighted.

use std::collections::HashSet;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::game::Game;
use crate::world::grid::{Coord, Direction};

pub fn minimap_lines(game: &Game) -> Vec<Line<'static>> {
    let grid = game.grid();
    let current = game.current_coord();

    let mut visible: HashSet<Coord> = game.visited().clone();
    visible.insert(current);
    for (_, neighbor) in grid.room(current).exits() {
        visible.insert(neighbor);
    }

    let mut lines = Vec::new();
    for y in 0..grid.height() {
        let mut cells: Vec<Span> = Vec::new();
        let mut connectors: Vec<Span> = Vec::new();
        for x in 0..grid.width() {
            let c = Coord::new(x, y);
            let shown = visible.contains(&c);

            let cell = if c == current {
                Span::styled(
                    "(@)",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )
            } else if game.visited().contains(&c) {
                Span::raw("[ ]")
            } else if shown {
                Span::styled("[?]", Style::default().fg(Color::DarkGray))
            } else {
                Span::raw("   ")
            };
            cells.push(cell);

            let east_door = shown
                && grid
                    .room(c)
                    .exit(Direction::East)
                    .map_or(false, |n| visible.contains(&n));
            cells.push(Span::raw(if east_door { "-" } else { " " }));

            let south_door = shown
                && grid
                    .room(c)
                    .exit(Direction::South)
                    .map_or(false, |n| visible.contains(&n));
            connectors.push(Span::raw(if south_door { " | " } else { "   " }));
            connectors.push(Span::raw(" "));
        }
        lines.push(Line::from(cells));
        if y + 1 < grid.height() {
            lines.push(Line::from(connectors));
        }
    }
    lines
}
