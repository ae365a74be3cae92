//! Logo Turtle
//!
//! A turtle keeps a position, a unit heading and a pen. Moves are checked
//! against the bounds of the drawing surface it is bound to, either by
//! rejecting moves that would leave the surface ([`MovementPolicy::Strict`])
//! or by shortening them so the turtle stops on the edge
//! ([`MovementPolicy::Clamped`]).
//!
//! A failed operation never changes the turtle or its surface.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::EPSILON;
use crate::geometry::{Point, Vector};
use crate::surface::{DrawingSurface, SurfaceBounds};

/// Error type for turtle operations
#[derive(Debug, Clone, Error)]
pub enum TurtleError {
    #[error("Invalid argument for {operation}: {reason}")]
    InvalidArgument {
        operation: &'static str,
        reason: String,
    },

    #[error(
        "Destination {destination} is outside the {}x{} surface",
        .bounds.width,
        .bounds.height
    )]
    OutOfBounds {
        destination: Point,
        bounds: SurfaceBounds,
    },

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

/// Result type for turtle operations
pub type TurtleResult<T> = Result<T, TurtleError>;

/// How a move that would leave the surface is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MovementPolicy {
    /// Reject the move with `OutOfBounds`
    #[default]
    Strict,
    /// Shorten the move so the turtle stops on the boundary
    Clamped,
}

/// How the clamped displacement is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClampAlgorithm {
    /// Shrink by the smallest per-axis ratio; always lands inside
    #[default]
    MinRatio,
    /// Shrink by the ratio of the first overflowing edge only, checked in the
    /// order +X, -X, +Y, -Y. A move overflowing both axes can still land
    /// outside, which the clamped post-condition reports.
    FirstAxis,
}

/// A Logo turtle bound to a drawing surface
#[derive(Debug, Clone)]
pub struct Turtle<S> {
    surface: S,
    position: Point,
    heading: Vector,
    pen_down: bool,
    policy: MovementPolicy,
    clamp: ClampAlgorithm,
}

impl<S: DrawingSurface> Turtle<S> {
    /// Create a turtle at the origin, facing +X, pen lifted
    pub fn new(mut surface: S) -> Self {
        surface.move_icon(Point::ORIGIN, Vector::UNIT);
        Self {
            surface,
            position: Point::ORIGIN,
            heading: Vector::UNIT,
            pen_down: false,
            policy: MovementPolicy::default(),
            clamp: ClampAlgorithm::default(),
        }
    }

    /// Set the default movement policy
    pub fn with_policy(mut self, policy: MovementPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the clamping algorithm used by the clamped policy
    pub fn with_clamp(mut self, clamp: ClampAlgorithm) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn policy(&self) -> MovementPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: MovementPolicy) {
        self.policy = policy;
    }

    pub fn clamp_algorithm(&self) -> ClampAlgorithm {
        self.clamp
    }

    // ============== Snapshots ==============

    /// Current position (a copy)
    pub fn position(&self) -> Point {
        self.position
    }

    /// Current unit heading (a copy)
    pub fn heading(&self) -> Vector {
        self.heading
    }

    pub fn is_pen_down(&self) -> bool {
        self.pen_down
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    // ============== Moves ==============

    /// Move `distance` units along the heading using the turtle's policy
    pub fn forward(&mut self, distance: f64) -> TurtleResult<()> {
        self.forward_with(distance, self.policy)
    }

    /// Move `distance` units along the heading using `policy`
    pub fn forward_with(&mut self, distance: f64, policy: MovementPolicy) -> TurtleResult<()> {
        check_non_negative("forward", distance)?;
        self.travel(self.heading.scaled(distance), policy)
    }

    /// Move `distance` units against the heading using the turtle's policy
    pub fn backward(&mut self, distance: f64) -> TurtleResult<()> {
        self.backward_with(distance, self.policy)
    }

    /// Move `distance` units against the heading using `policy`.
    ///
    /// The heading itself is not reversed.
    pub fn backward_with(&mut self, distance: f64, policy: MovementPolicy) -> TurtleResult<()> {
        check_non_negative("backward", distance)?;
        self.travel(self.heading.opposite().scaled(distance), policy)
    }

    /// Move in a straight line to `target` using the turtle's policy
    pub fn go_to(&mut self, target: Point) -> TurtleResult<()> {
        self.go_to_with(target, self.policy)
    }

    /// Move in a straight line to `target` using `policy`; the heading is unchanged
    pub fn go_to_with(&mut self, target: Point, policy: MovementPolicy) -> TurtleResult<()> {
        check_finite_point("go_to", target)?;
        self.travel(target - self.position, policy)
    }

    // ============== Turns ==============

    /// Rotate the heading clockwise by `angle` degrees
    pub fn turn_right(&mut self, angle: f64) -> TurtleResult<()> {
        check_non_negative("turn_right", angle)?;
        self.rotate_heading(-angle)
    }

    /// Rotate the heading counter-clockwise by `angle` degrees
    pub fn turn_left(&mut self, angle: f64) -> TurtleResult<()> {
        check_non_negative("turn_left", angle)?;
        self.rotate_heading(angle)
    }

    /// Point the heading at `target`
    pub fn turn_toward(&mut self, target: Point) -> TurtleResult<()> {
        check_finite_point("turn_toward", target)?;
        let heading = (target - self.position).normalized().ok_or_else(|| {
            TurtleError::InvalidArgument {
                operation: "turn_toward",
                reason: format!("target {} is the current position", target),
            }
        })?;
        self.set_heading(heading);
        Ok(())
    }

    // ============== Pen ==============

    pub fn pen_up(&mut self) {
        self.pen_down = false;
    }

    pub fn pen_down(&mut self) {
        self.pen_down = true;
    }

    /// Back to the origin, facing +X, pen lifted. Drawn segments are kept.
    pub fn reset(&mut self) {
        self.position = Point::ORIGIN;
        self.heading = Vector::UNIT;
        self.pen_down = false;
        self.surface.move_icon(self.position, self.heading);
        self.surface.request_redraw();
    }

    // ============== Visibility ==============

    /// Check that the turtle is inside the surface bounds
    pub fn is_visible(&self) -> bool {
        self.surface.visibility_bounds().contains(self.position)
    }

    /// Check whether moving `distance` along `direction` would stay visible.
    /// Does not move the turtle.
    pub fn will_be_visible(&self, distance: f64, direction: Vector) -> bool {
        let destination = self.position + direction.scaled(distance);
        self.surface.visibility_bounds().contains(destination)
    }

    /// Displacement for moving `distance` along `direction`, shortened so the
    /// destination stays on the surface. Does not move the turtle.
    pub fn clamped_displacement(&self, distance: f64, direction: Vector) -> Vector {
        self.clamped_displacement_of(direction.scaled(distance))
    }

    /// Shorten the raw displacement `d` so the destination stays on the surface
    pub fn clamped_displacement_of(&self, d: Vector) -> Vector {
        let bounds = self.surface.visibility_bounds();
        let (hw, hh) = (bounds.half_width(), bounds.half_height());
        let p = self.position;

        let ratio = match self.clamp {
            ClampAlgorithm::MinRatio => axis_ratio(p.x, d.dx, hw).min(axis_ratio(p.y, d.dy, hh)),
            ClampAlgorithm::FirstAxis => {
                let target = p + d;
                if target.x > hw {
                    edge_ratio(p.x, d.dx, hw)
                } else if target.x < -hw {
                    edge_ratio(p.x, d.dx, -hw)
                } else if target.y > hh {
                    edge_ratio(p.y, d.dy, hh)
                } else if target.y < -hh {
                    edge_ratio(p.y, d.dy, -hh)
                } else {
                    1.0
                }
            }
        };

        let clamped = d.scaled(ratio);
        Vector::new(
            snap_to_edge(p.x, clamped.dx, hw),
            snap_to_edge(p.y, clamped.dy, hh),
        )
    }

    // ============== Internals ==============

    fn travel(&mut self, requested: Vector, policy: MovementPolicy) -> TurtleResult<()> {
        let bounds = self.surface.visibility_bounds();
        let from = self.position;

        let displacement = match policy {
            MovementPolicy::Strict => {
                let destination = from + requested;
                if !bounds.contains(destination) {
                    return Err(TurtleError::OutOfBounds {
                        destination,
                        bounds,
                    });
                }
                requested
            }
            MovementPolicy::Clamped => {
                let displacement = self.clamped_displacement_of(requested);
                let destination = from + displacement;
                if bounds.contains(from) && !bounds.contains(destination) {
                    tracing::error!(
                        "Clamped move from {} by {} landed outside the surface at {}",
                        from,
                        displacement,
                        destination
                    );
                    return Err(TurtleError::InvariantViolation(format!(
                        "clamped destination {} is not visible",
                        destination
                    )));
                }
                displacement
            }
        };

        let to = from + displacement;
        self.position = to;

        if self.pen_down {
            self.surface.emit_segment(from, to);
        } else {
            self.surface.request_redraw();
        }
        self.surface.move_icon(to, self.heading);

        tracing::debug!("Turtle moved {} -> {} ({:?})", from, to, policy);
        Ok(())
    }

    fn rotate_heading(&mut self, degrees: f64) -> TurtleResult<()> {
        let heading = self.heading.rotated(degrees).normalized().ok_or_else(|| {
            TurtleError::InvariantViolation(format!("heading {} collapsed", self.heading))
        })?;
        self.set_heading(heading);
        Ok(())
    }

    fn set_heading(&mut self, heading: Vector) {
        debug_assert!((heading.magnitude() - 1.0).abs() < EPSILON);
        let before = self.heading;
        self.heading = heading;
        self.surface.move_icon(self.position, heading);
        self.surface.request_redraw();
        tracing::debug!("Turtle turned {} -> {}", before, heading);
    }
}

impl<S> fmt::Display for Turtle<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Turtle[{},{}]", self.position, self.heading)
    }
}

fn check_non_negative(operation: &'static str, value: f64) -> TurtleResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TurtleError::InvalidArgument {
            operation,
            reason: format!("{} must be a finite value >= 0", value),
        })
    }
}

fn check_finite_point(operation: &'static str, point: Point) -> TurtleResult<()> {
    if point.x.is_finite() && point.y.is_finite() {
        Ok(())
    } else {
        Err(TurtleError::InvalidArgument {
            operation,
            reason: format!("{} is not a finite point", point),
        })
    }
}

/// Fraction of `delta` that keeps `pos + delta` within `[-half, half]` on one axis
fn axis_ratio(pos: f64, delta: f64, half: f64) -> f64 {
    let target = pos + delta;
    if target > half && delta > 0.0 {
        edge_ratio(pos, delta, half)
    } else if target < -half && delta < 0.0 {
        edge_ratio(pos, delta, -half)
    } else {
        1.0
    }
}

/// Fraction of `delta` needed to reach `edge`, limited to `[0, 1]`
fn edge_ratio(pos: f64, delta: f64, edge: f64) -> f64 {
    if delta == 0.0 {
        return 0.0;
    }
    ((edge - pos) / delta).clamp(0.0, 1.0)
}

/// Remove floating-point overshoot past an edge the ratio was aimed at
fn snap_to_edge(pos: f64, delta: f64, half: f64) -> f64 {
    let target = pos + delta;
    let tolerance = EPSILON * half.max(1.0);
    if target > half && target - half <= tolerance {
        half - pos
    } else if target < -half && -half - target <= tolerance {
        -half - pos
    } else {
        delta
    }
}
