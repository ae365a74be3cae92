//! Drawing surface contract
//!
//! The turtle never owns pixels. It talks to a host surface through the
//! [`DrawingSurface`] trait: permanent segments go to `emit_segment`, anything
//! that only needs a repaint (pen-up moves, turns) goes to `request_redraw`,
//! and the current extents are re-read through `visibility_bounds` on every
//! move since the host may resize the surface at any time.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH};
use crate::geometry::{Point, Vector};

/// Centered rectangle of a drawing surface.
///
/// The origin sits at the center; X grows to the right and Y grows upwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceBounds {
    /// Full width of the surface
    pub width: f64,
    /// Full height of the surface
    pub height: f64,
}

impl Default for SurfaceBounds {
    fn default() -> Self {
        Self::new(DEFAULT_SURFACE_WIDTH, DEFAULT_SURFACE_HEIGHT)
    }
}

impl SurfaceBounds {
    /// Creates bounds from full width and height.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Half of the width.
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    /// Half of the height.
    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }

    /// Returns true if the point lies inside the rectangle.
    ///
    /// Edges are inclusive: a point exactly on the boundary is visible.
    pub fn contains(&self, point: Point) -> bool {
        let (hw, hh) = (self.half_width(), self.half_height());
        point.x >= -hw && point.x <= hw && point.y >= -hh && point.y <= hh
    }
}

/// A permanent line drawn by the turtle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    /// Create a new segment
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    /// Length of the segment
    pub fn length(&self) -> f64 {
        self.from.distance(self.to)
    }
}

/// Host-side drawing surface the turtle moves on.
///
/// Implementations are supplied by the host application (GUI, CLI or test
/// harness). [`Canvas`] is the in-memory implementation shipped with this crate.
pub trait DrawingSurface {
    /// Record a permanent segment
    fn emit_segment(&mut self, from: Point, to: Point);

    /// Ask for a repaint without adding geometry
    fn request_redraw(&mut self);

    /// Current centered extents of the surface
    fn visibility_bounds(&self) -> SurfaceBounds;

    /// Notify the surface of the turtle's new pose, for its icon overlay
    fn move_icon(&mut self, _position: Point, _heading: Vector) {}
}

impl<S: DrawingSurface + ?Sized> DrawingSurface for &mut S {
    fn emit_segment(&mut self, from: Point, to: Point) {
        (**self).emit_segment(from, to);
    }

    fn request_redraw(&mut self) {
        (**self).request_redraw();
    }

    fn visibility_bounds(&self) -> SurfaceBounds {
        (**self).visibility_bounds()
    }

    fn move_icon(&mut self, position: Point, heading: Vector) {
        (**self).move_icon(position, heading);
    }
}

/// Turtle icon overlay tracked by a [`Canvas`]
#[derive(Debug, Clone, PartialEq)]
pub struct IconState {
    /// Image file provided by the host
    pub path: PathBuf,
    /// Last known turtle position
    pub position: Point,
    /// Last known turtle heading
    pub heading: Vector,
}

/// In-memory drawing surface that records everything it is asked to do
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    bounds: SurfaceBounds,
    segments: Vec<Segment>,
    redraws: usize,
    icon: Option<IconState>,
}

impl Canvas {
    /// Create an empty canvas of the given size
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            bounds: SurfaceBounds::new(width, height),
            ..Default::default()
        }
    }

    /// Attach a turtle icon image, placed at the origin facing +X
    pub fn with_icon(mut self, path: impl AsRef<Path>) -> Self {
        self.icon = Some(IconState {
            path: path.as_ref().to_path_buf(),
            position: Point::ORIGIN,
            heading: Vector::UNIT,
        });
        self
    }

    /// Change the surface extents; recorded segments are kept
    pub fn resize(&mut self, width: f64, height: f64) {
        self.bounds = SurfaceBounds::new(width, height);
        self.redraws += 1;
    }

    /// Wipe every recorded segment
    pub fn clear(&mut self) {
        self.segments.clear();
        self.redraws += 1;
    }

    /// Segments drawn so far, oldest first
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of repaints requested so far
    pub fn redraw_count(&self) -> usize {
        self.redraws
    }

    /// Current icon overlay, if an icon was attached
    pub fn icon(&self) -> Option<&IconState> {
        self.icon.as_ref()
    }

    /// Total length of ink on the canvas
    pub fn ink_length(&self) -> f64 {
        self.segments.iter().map(Segment::length).sum()
    }
}

impl DrawingSurface for Canvas {
    fn emit_segment(&mut self, from: Point, to: Point) {
        self.segments.push(Segment::new(from, to));
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }

    fn visibility_bounds(&self) -> SurfaceBounds {
        self.bounds
    }

    fn move_icon(&mut self, position: Point, heading: Vector) {
        if let Some(icon) = self.icon.as_mut() {
            icon.position = position;
            icon.heading = heading;
        }
    }
}
