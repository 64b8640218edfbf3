// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Day 11: Space Police

use std::collections::HashMap;
use std::ops::AddAssign;

use super::{PuzzleError, Solver};
use crate::Interpreter;
use crate::host::{TurnHost, drive};

pub(super) struct Day11;

#[derive(Clone, Copy, Debug, PartialEq)]
enum PanelColor {
    Black { repainted: bool },
    White,
}

impl Default for PanelColor {
    fn default() -> Self {
        Self::Black { repainted: false }
    }
}

impl PanelColor {
    fn report(self) -> i64 {
        i64::from(self == Self::White)
    }

    fn paint(&mut self, color: i64) {
        *self = match color {
            1 => Self::White,
            0 => Self::Black { repainted: true },
            i => {
                log::warn!("invalid paint color {i}, leaving panel alone");
                *self
            }
        };
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    fn turn_left(&mut self) {
        *self = match self {
            Self::Up => Self::Left,
            Self::Right => Self::Up,
            Self::Down => Self::Right,
            Self::Left => Self::Down,
        }
    }

    fn turn_right(&mut self) {
        *self = match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }
}

/// A panel on the hull, with `y` increasing downwards
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
struct Location {
    x: i32,
    y: i32,
}

impl AddAssign<Direction> for Location {
    fn add_assign(&mut self, dir: Direction) {
        match dir {
            Direction::Up => self.y -= 1,
            Direction::Right => self.x += 1,
            Direction::Down => self.y += 1,
            Direction::Left => self.x -= 1,
        }
    }
}

#[derive(Debug)]
struct Robot {
    location: Location,
    facing: Direction,
}

impl Robot {
    fn rotate(&mut self, code: i64) {
        match code {
            0 => self.facing.turn_left(),
            1 => self.facing.turn_right(),
            i => log::warn!("invalid turn code {i}, facing {:?} still", self.facing),
        }
    }

    fn advance(&mut self) {
        self.location += self.facing;
    }
}

/// The hull as the robot sees it: it reports the panel under it, then paints, turns, and moves
#[derive(Debug)]
struct Hull {
    robot: Robot,
    panels: HashMap<Location, PanelColor>,
}

impl Hull {
    fn new(start: PanelColor) -> Self {
        Self {
            robot: Robot {
                location: Location::default(),
                facing: Direction::Up,
            },
            panels: HashMap::from([(Location::default(), start)]),
        }
    }

    fn painted(&self) -> usize {
        self.panels
            .values()
            .filter(|&&v| v != PanelColor::default())
            .count()
    }

    /// Draw the white panels, with `#` for white and a space for black
    fn render(&self) -> Option<String> {
        let white = || {
            self.panels
                .iter()
                .filter(|&(_, &color)| color == PanelColor::White)
                .map(|(loc, _)| loc)
        };
        let min_x = white().map(|loc| loc.x).min()?;
        let max_x = white().map(|loc| loc.x).max()?;
        let min_y = white().map(|loc| loc.y).min()?;
        let max_y = white().map(|loc| loc.y).max()?;

        let rows: Vec<String> = (min_y..=max_y)
            .map(|y| {
                (min_x..=max_x)
                    .map(|x| match self.panels.get(&Location { x, y }) {
                        Some(PanelColor::White) => '#',
                        _ => ' ',
                    })
                    .collect()
            })
            .collect();
        Some(rows.join("\n"))
    }
}

impl TurnHost for Hull {
    const GROUP: usize = 2;

    fn observe(&mut self, group: &[i64]) {
        let &[color, turn] = group else {
            unreachable!("groups are always 2 long")
        };
        self.panels
            .entry(self.robot.location)
            .or_default()
            .paint(color);
        self.robot.rotate(turn);
        self.robot.advance();
    }

    fn respond(&mut self) -> i64 {
        self.panels
            .get(&self.robot.location)
            .copied()
            .unwrap_or_default()
            .report()
    }
}

impl Solver for Day11 {
    fn title(&self) -> &'static str {
        "Space Police"
    }

    fn solve(&self, input: &str, part: u8) -> Result<String, PuzzleError> {
        let start = match part {
            1 => PanelColor::default(),
            2 => PanelColor::White,
            _ => return Err(PuzzleError::BadPart(part)),
        };
        let mut interp: Interpreter = input.parse()?;
        let mut hull = Hull::new(start);
        drive(&mut interp, &mut hull)?;
        if part == 1 {
            Ok(hull.painted().to_string())
        } else {
            hull.render().ok_or(PuzzleError::NoSolution)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // paints the starting panel white and turns left, then paints the next one black and turns
    // left again
    const TWO_PANELS: &str = "3,100,104,1,104,0,3,100,104,0,104,0,99";

    #[test]
    fn robot_movement() {
        let mut robot = Robot {
            location: Location::default(),
            facing: Direction::Up,
        };
        robot.rotate(0);
        robot.advance();
        assert_eq!(robot.location, Location { x: -1, y: 0 });
        robot.rotate(1);
        robot.rotate(1);
        robot.advance();
        robot.advance();
        assert_eq!(robot.location, Location { x: 1, y: 0 });
        assert_eq!(robot.facing, Direction::Right);
    }

    #[test]
    fn part1() {
        assert_eq!(Day11.solve(TWO_PANELS, 1).unwrap(), "2");
    }

    #[test]
    fn part2() {
        assert_eq!(Day11.solve(TWO_PANELS, 2).unwrap(), "#");
    }

    #[test]
    fn repainting_black_still_counts() {
        let mut hull = Hull::new(PanelColor::default());
        hull.observe(&[0, 1]);
        hull.observe(&[1, 1]);
        assert_eq!(hull.respond(), 0);
        assert_eq!(hull.painted(), 2);
        assert_eq!(hull.robot.location, Location { x: 1, y: 1 });
    }

    #[test]
    fn render_grid() {
        let mut hull = Hull::new(PanelColor::White);
        hull.panels.insert(Location { x: 2, y: 1 }, PanelColor::White);
        hull.panels.insert(Location { x: 1, y: 1 }, PanelColor::Black { repainted: true });
        assert_eq!(hull.render().unwrap(), "#  \n  #");
        assert_eq!(Hull::new(PanelColor::default()).render(), None);
    }
}
