use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::EPSILON;

#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

pub type Vector = Point;

impl Point {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        self.squared_length().sqrt()
    }

    pub fn squared_length(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn dot(&self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// The z component of the 3D cross product of two vectors in the xy plane.
    ///
    /// Positive if `other` is rotated counter-clockwise relative to `self` in a y-up coordinate
    /// system (clockwise in y-down screen coordinates).
    pub fn cross(&self, other: Vector) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// The unsigned angle between two vectors in radians, in the range `0..=π`.
    ///
    /// Returns `None` if one of the vectors has zero length.
    pub fn angle_to(&self, other: Vector) -> Option<f64> {
        let magnitudes = self.length() * other.length();
        if magnitudes < EPSILON {
            return None;
        }
        // Rounding may push the cosine slightly outside of -1..=1 for (anti-)parallel vectors.
        let cos = (self.dot(other) / magnitudes).clamp(-1.0, 1.0);
        Some(cos.acos())
    }

    /// The point halfway between `self` and `other`.
    pub fn midpoint(&self, other: Point) -> Point {
        (*self + other) / 2.0
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (f64, f64) {
    fn from(value: Point) -> Self {
        (value.x, value.y)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn perpendicular_vectors_are_90_degrees_apart() {
        let a = Vector::new(1.0, 0.0);
        let b = Vector::new(0.0, 1.0);
        assert_relative_eq!(a.angle_to(b).unwrap().to_degrees(), 90.0);
        assert_relative_eq!(a.angle_to(b).unwrap(), 0f64.acos());
    }

    #[test]
    fn parallel_and_opposite_vectors() {
        let a = Vector::new(1.0, 0.0);
        assert_relative_eq!(a.angle_to(a).unwrap().to_degrees(), 0.0);
        assert_relative_eq!(a.angle_to(-a).unwrap().to_degrees(), 180.0);
    }

    #[test]
    fn nearly_parallel_vectors_do_not_produce_nan() {
        let a = Vector::new(0.1, 0.3);
        let b = a * 3.0;
        let angle = a.angle_to(b).unwrap();
        assert!(angle.is_finite());
        assert!(angle.to_degrees() < 1e-3);
    }

    #[test]
    fn zero_length_vector_has_no_angle() {
        assert_eq!(Vector::ZERO.angle_to(Vector::new(1.0, 0.0)), None);
        assert_eq!(Vector::new(1.0, 0.0).angle_to(Vector::ZERO), None);
    }

    #[test]
    fn cross_sign_encodes_rotation_direction() {
        let x = Vector::new(1.0, 0.0);
        let y = Vector::new(0.0, 1.0);
        assert!(x.cross(y) > 0.0);
        assert!(y.cross(x) < 0.0);
        assert_eq!(x.cross(x), 0.0);
    }
}
