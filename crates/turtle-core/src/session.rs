//! Turtle session
//!
//! A session owns one turtle drawing on one [`Canvas`]. Hosts queue commands
//! as they arrive (button clicks, script lines) and drain the queue in order.
//! The turtle itself is not synchronized, so a session shared between
//! threads goes behind one lock: [`SharedSession`].

use std::sync::Arc;

use parking_lot::Mutex;

use crate::command::TurtleCommand;
use crate::geometry::{Point, Vector};
use crate::surface::{Canvas, Segment};
use crate::turtle::{Turtle, TurtleError, TurtleResult};

/// Shared session handle
pub type SharedSession = Arc<Mutex<Session>>;

/// A turtle, its canvas and the commands waiting to run
#[derive(Debug)]
pub struct Session {
    turtle: Turtle<Canvas>,
    pending: Vec<TurtleCommand>,
}

impl Session {
    /// Create a session around an already configured turtle
    pub fn new(turtle: Turtle<Canvas>) -> Self {
        Self {
            turtle,
            pending: Vec::new(),
        }
    }

    /// Wrap this session for sharing between threads
    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    pub fn turtle(&self) -> &Turtle<Canvas> {
        &self.turtle
    }

    pub fn turtle_mut(&mut self) -> &mut Turtle<Canvas> {
        &mut self.turtle
    }

    pub fn canvas(&self) -> &Canvas {
        self.turtle.surface()
    }

    pub fn segments(&self) -> &[Segment] {
        self.canvas().segments()
    }

    pub fn position(&self) -> Point {
        self.turtle.position()
    }

    pub fn heading(&self) -> Vector {
        self.turtle.heading()
    }

    /// Run a single command now
    pub fn execute(&mut self, command: TurtleCommand) -> TurtleResult<()> {
        match command {
            TurtleCommand::Forward(distance) => self.turtle.forward(distance),
            TurtleCommand::Backward(distance) => self.turtle.backward(distance),
            TurtleCommand::TurnLeft(angle) => self.turtle.turn_left(angle),
            TurtleCommand::TurnRight(angle) => self.turtle.turn_right(angle),
            TurtleCommand::PenUp => {
                self.turtle.pen_up();
                Ok(())
            }
            TurtleCommand::PenDown => {
                self.turtle.pen_down();
                Ok(())
            }
            TurtleCommand::GoTo(target) => self.turtle.go_to(target),
            TurtleCommand::TurnToward(target) => self.turtle.turn_toward(target),
            TurtleCommand::Clear => {
                self.turtle.surface_mut().clear();
                Ok(())
            }
            TurtleCommand::Reset => {
                self.turtle.reset();
                Ok(())
            }
        }
    }

    /// Queue a command
    pub fn queue(&mut self, command: TurtleCommand) {
        self.pending.push(command);
    }

    /// Number of queued commands
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Run every queued command in order.
    ///
    /// A failing command is logged and skipped; the rest still run. Returns
    /// the failures alongside the command that caused them.
    pub fn process_pending(&mut self) -> Vec<(TurtleCommand, TurtleError)> {
        let mut failures = Vec::new();
        for command in std::mem::take(&mut self.pending) {
            if let Err(e) = self.execute(command) {
                tracing::warn!("Command '{}' failed: {}", command, e);
                failures.push((command, e));
            }
        }
        failures
    }
}
