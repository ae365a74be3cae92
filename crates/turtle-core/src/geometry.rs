//! 2D point and vector primitives
//!
//! Both types are `Copy`: every operation returns a new value, so a caller
//! can never alias the turtle's own position or heading.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::EPSILON;

/// A position on the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin (0, 0)
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Return this point moved by `vector`
    pub fn translated(self, vector: Vector) -> Self {
        Self::from(self.as_dvec2() + vector.as_dvec2())
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f64 {
        self.as_dvec2().distance(other.as_dvec2())
    }

    /// Check whether two points coincide within `epsilon`
    pub fn coincides(self, other: Point, epsilon: f64) -> bool {
        self.distance(other) < epsilon
    }

    fn as_dvec2(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        self.translated(rhs)
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        Vector::between(rhs, self)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A 2D displacement
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub dx: f64,
    pub dy: f64,
}

impl Vector {
    /// Unit vector along +X, the turtle's initial heading
    pub const UNIT: Self = Self { dx: 1.0, dy: 0.0 };

    /// The null displacement
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    /// Create a new vector
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Displacement that takes `from` to `to`
    pub fn between(from: Point, to: Point) -> Self {
        Self::from(to.as_dvec2() - from.as_dvec2())
    }

    /// Euclidean norm ("module")
    pub fn magnitude(self) -> f64 {
        self.as_dvec2().length()
    }

    /// Scale both components by `factor` ("homothety"); the factor may be zero or negative
    pub fn scaled(self, factor: f64) -> Self {
        Self::from(self.as_dvec2() * factor)
    }

    /// Rotate counter-clockwise by `degrees` (negative rotates clockwise)
    pub fn rotated(self, degrees: f64) -> Self {
        let rotation = DVec2::from_angle(degrees.to_radians());
        Self::from(rotation.rotate(self.as_dvec2()))
    }

    /// Negate both components
    pub fn opposite(self) -> Self {
        Self::from(-self.as_dvec2())
    }

    /// Unit vector with the same direction, or `None` for a (near) null or
    /// non-finite vector
    pub fn normalized(self) -> Option<Self> {
        let v = self.as_dvec2();
        // Divide by the largest component first so huge vectors don't overflow
        let scale = v.abs().max_element();
        if !scale.is_finite() || scale == 0.0 {
            return None;
        }
        let reduced = v / scale;
        let length = reduced.length();
        if !length.is_finite() || length * scale < EPSILON {
            None
        } else {
            Some(Self::from(reduced / length))
        }
    }

    /// Check collinearity with `other`.
    ///
    /// The cross product is compared relative to both magnitudes, so the test
    /// does not depend on vector length. A null vector is collinear with anything.
    pub fn is_collinear(self, other: Vector, epsilon: f64) -> bool {
        let (a, b) = (self.as_dvec2(), other.as_dvec2());
        let norms = a.length() * b.length();
        if norms < EPSILON {
            return true;
        }
        (a.perp_dot(b) / norms).abs() < epsilon
    }

    /// Check that both components match `other` within `epsilon`
    pub fn approx_eq(self, other: Vector, epsilon: f64) -> bool {
        (self.dx - other.dx).abs() < epsilon && (self.dy - other.dy).abs() < epsilon
    }

    fn as_dvec2(self) -> DVec2 {
        DVec2::new(self.dx, self.dy)
    }
}

impl From<DVec2> for Vector {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Self::from(self.as_dvec2() + rhs.as_dvec2())
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        self.scaled(rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.opposite()
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.dx, self.dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_translate_returns_new_point() {
        let p = Point::new(1.0, 2.0);
        let q = p.translated(Vector::new(3.0, -4.0));
        assert_eq!(q, Point::new(4.0, -2.0));
        assert_eq!(p, Point::new(1.0, 2.0));
        assert_eq!(p + Vector::new(3.0, -4.0), q);
    }

    #[test]
    fn test_scaled_accepts_zero_and_negative() {
        let v = Vector::new(2.0, -3.0);
        assert_eq!(v.scaled(2.0), Vector::new(4.0, -6.0));
        assert_eq!(v.scaled(-1.0), Vector::new(-2.0, 3.0));
        assert_eq!(v.scaled(0.0).magnitude(), 0.0);
    }

    #[test]
    fn test_magnitude() {
        assert_eq!(Vector::new(3.0, 4.0).magnitude(), 5.0);
        assert_eq!(Vector::UNIT.magnitude(), 1.0);
    }

    #[test]
    fn test_rotate_quarter_turns() {
        let left = Vector::UNIT.rotated(90.0);
        assert_abs_diff_eq!(left.dx, 0.0, epsilon = EPSILON);
        assert_abs_diff_eq!(left.dy, 1.0, epsilon = EPSILON);

        let right = Vector::UNIT.rotated(-90.0);
        assert_abs_diff_eq!(right.dx, 0.0, epsilon = EPSILON);
        assert_abs_diff_eq!(right.dy, -1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_rotate_full_turn_is_identity() {
        let v = Vector::UNIT.rotated(360.0);
        assert!(v.approx_eq(Vector::UNIT, EPSILON), "got {}", v);
    }

    #[test]
    fn test_repeated_rotation_keeps_unit_length() {
        let mut v = Vector::UNIT;
        for _ in 0..10_000 {
            v = v.rotated(7.0);
        }
        assert_abs_diff_eq!(v.magnitude(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_opposite() {
        assert_eq!(Vector::new(1.5, -2.0).opposite(), Vector::new(-1.5, 2.0));
        assert_eq!(-Vector::UNIT, Vector::new(-1.0, 0.0));
    }

    #[test]
    fn test_collinear() {
        let v = Vector::new(1.0, 1.0);
        assert!(v.is_collinear(Vector::new(5.0, 5.0), EPSILON));
        assert!(v.is_collinear(Vector::new(-2.0, -2.0), EPSILON));
        assert!(!v.is_collinear(Vector::new(1.0, 0.0), EPSILON));
        assert!(v.is_collinear(Vector::ZERO, EPSILON));
    }

    #[test]
    fn test_between_and_point_difference() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(4.0, 5.0);
        assert_eq!(Vector::between(a, b), Vector::new(3.0, 4.0));
        assert_eq!(b - a, Vector::new(3.0, 4.0));
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn test_normalized() {
        let n = Vector::new(0.0, -3.0).normalized().unwrap();
        assert_eq!(n, Vector::new(0.0, -1.0));
        assert!(Vector::ZERO.normalized().is_none());
    }

    #[test]
    fn test_normalized_huge_and_non_finite() {
        assert_eq!(Vector::new(1e200, 0.0).normalized(), Some(Vector::UNIT));

        let diagonal = Vector::new(-1e300, 1e300).normalized().unwrap();
        assert_abs_diff_eq!(diagonal.magnitude(), 1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(diagonal.dx, -diagonal.dy, epsilon = EPSILON);

        assert!(Vector::new(f64::INFINITY, 0.0).normalized().is_none());
        assert!(Vector::new(f64::NAN, 1.0).normalized().is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Point::new(100.0, -2.5).to_string(), "(100, -2.5)");
        assert_eq!(Vector::UNIT.to_string(), "<1, 0>");
    }
}
