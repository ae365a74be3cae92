//! Turtle Commands
//!
//! One command per line, Logo style:
//!
//! ```text
//! forward 100     (fd)
//! backward 20     (back, bk)
//! left 90         (lt)
//! right 45        (rt)
//! penup           (pu)
//! pendown         (pd)
//! goto 10 -20
//! toward 0 100    (face)
//! clear
//! reset
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::geometry::Point;

/// Error type for command parsing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Missing argument for {command}: expected {expected}")]
    MissingArgument {
        command: String,
        expected: &'static str,
    },

    #[error("Invalid number '{value}' for {command}")]
    InvalidNumber { command: String, value: String },

    #[error("Unexpected input after {command}: {rest}")]
    TrailingInput { command: String, rest: String },
}

/// An operation a host can queue on a turtle session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TurtleCommand {
    Forward(f64),
    Backward(f64),
    TurnLeft(f64),
    TurnRight(f64),
    PenUp,
    PenDown,
    GoTo(Point),
    TurnToward(Point),
    /// Wipe the drawing, keep the turtle where it is
    Clear,
    /// Send the turtle home
    Reset,
}

impl TurtleCommand {
    /// Name used in scripts
    pub fn name(&self) -> &'static str {
        match self {
            TurtleCommand::Forward(_) => "forward",
            TurtleCommand::Backward(_) => "backward",
            TurtleCommand::TurnLeft(_) => "left",
            TurtleCommand::TurnRight(_) => "right",
            TurtleCommand::PenUp => "penup",
            TurtleCommand::PenDown => "pendown",
            TurtleCommand::GoTo(_) => "goto",
            TurtleCommand::TurnToward(_) => "toward",
            TurtleCommand::Clear => "clear",
            TurtleCommand::Reset => "reset",
        }
    }
}

impl FromStr for TurtleCommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let keyword = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();

        let command = match keyword.as_str() {
            "forward" | "fd" => TurtleCommand::Forward(number(&keyword, &mut words, "a distance")?),
            "backward" | "back" | "bk" => {
                TurtleCommand::Backward(number(&keyword, &mut words, "a distance")?)
            }
            "left" | "lt" => TurtleCommand::TurnLeft(number(&keyword, &mut words, "an angle")?),
            "right" | "rt" => TurtleCommand::TurnRight(number(&keyword, &mut words, "an angle")?),
            "penup" | "pu" => TurtleCommand::PenUp,
            "pendown" | "pd" => TurtleCommand::PenDown,
            "goto" => TurtleCommand::GoTo(point(&keyword, &mut words)?),
            "toward" | "face" => TurtleCommand::TurnToward(point(&keyword, &mut words)?),
            "clear" => TurtleCommand::Clear,
            "reset" => TurtleCommand::Reset,
            _ => return Err(CommandError::UnknownCommand(keyword)),
        };

        let rest: Vec<&str> = words.collect();
        if !rest.is_empty() {
            return Err(CommandError::TrailingInput {
                command: keyword,
                rest: rest.join(" "),
            });
        }

        Ok(command)
    }
}

impl fmt::Display for TurtleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurtleCommand::Forward(v)
            | TurtleCommand::Backward(v)
            | TurtleCommand::TurnLeft(v)
            | TurtleCommand::TurnRight(v) => write!(f, "{} {}", self.name(), v),
            TurtleCommand::GoTo(p) | TurtleCommand::TurnToward(p) => {
                write!(f, "{} {} {}", self.name(), p.x, p.y)
            }
            _ => f.write_str(self.name()),
        }
    }
}

fn number<'a>(
    command: &str,
    words: &mut impl Iterator<Item = &'a str>,
    expected: &'static str,
) -> Result<f64, CommandError> {
    let word = words.next().ok_or_else(|| CommandError::MissingArgument {
        command: command.to_string(),
        expected,
    })?;
    word.parse().map_err(|_| CommandError::InvalidNumber {
        command: command.to_string(),
        value: word.to_string(),
    })
}

fn point<'a>(
    command: &str,
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<Point, CommandError> {
    let x = number(command, words, "x and y coordinates")?;
    let y = number(command, words, "x and y coordinates")?;
    Ok(Point::new(x, y))
}
