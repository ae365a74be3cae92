//! Global constants for turtle-core

/// Tolerance for vector comparisons (unit length, collinearity, coincidence)
pub const EPSILON: f64 = 1e-9;

/// Default drawing surface width, in surface units
pub const DEFAULT_SURFACE_WIDTH: f64 = 650.0;

/// Default drawing surface height, in surface units
pub const DEFAULT_SURFACE_HEIGHT: f64 = 400.0;
