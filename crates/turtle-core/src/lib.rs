//! Turtle Geometry Core
//!
//! This crate provides:
//! - 2D point and vector primitives
//! - The drawing-surface contract and an in-memory recording canvas
//! - A Logo-style turtle with strict or clamped boundary handling
//! - A small textual command language and a lockable session
//! - RON configuration for hosts

pub mod command;
pub mod config;
pub mod constants;
pub mod geometry;
pub mod session;
pub mod surface;
pub mod turtle;

// Re-exports for convenience
pub use command::{CommandError, TurtleCommand};
pub use config::{ConfigError, SurfaceConfig, TurtleConfig};
pub use constants::*;
pub use geometry::{Point, Vector};
pub use session::{Session, SharedSession};
pub use surface::{Canvas, DrawingSurface, IconState, Segment, SurfaceBounds};
pub use turtle::{ClampAlgorithm, MovementPolicy, Turtle, TurtleError, TurtleResult};
