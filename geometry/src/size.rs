use std::ops;

use serde::{Deserialize, Serialize};

use crate::{Point, SizeI};

#[derive(Copy, Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// The smallest uniform scale factor at which `self` fully covers `target` without changing
    /// its aspect ratio.
    ///
    /// Returns `None` if `self` is empty.
    pub fn cover_scale(&self, target: Size) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some((target.width / self.width).max(target.height / self.height))
    }
}

impl From<(f64, f64)> for Size {
    fn from((width, height): (f64, f64)) -> Self {
        Size::new(width, height)
    }
}

impl From<SizeI> for Size {
    fn from(size: SizeI) -> Self {
        Size::new(size.width as f64, size.height as f64)
    }
}

impl ops::Mul<f64> for Size {
    type Output = Size;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.width * rhs, self.height * rhs)
    }
}

impl ops::Div<f64> for Size {
    type Output = Size;

    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.width / rhs, self.height / rhs)
    }
}

impl ops::Add<Size> for Point {
    type Output = Point;

    fn add(self, rhs: Size) -> Self::Output {
        Point::new(self.x + rhs.width, self.y + rhs.height)
    }
}

impl ops::Sub<Size> for Point {
    type Output = Point;

    fn sub(self, rhs: Size) -> Self::Output {
        Point::new(self.x - rhs.width, self.y - rhs.height)
    }
}
