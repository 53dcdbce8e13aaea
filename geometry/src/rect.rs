use crate::{Contains, Point, Size};

/// A basic rectangle representation. Meant to be sorted and with finite values only.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    #[must_use]
    pub fn from_size(size: impl Into<Size>) -> Self {
        let size = size.into();
        (Point::default(), size).into()
    }

    pub fn center(&self) -> Point {
        (
            self.left * 0.5 + self.right * 0.5,
            self.top * 0.5 + self.bottom * 0.5,
        )
            .into()
    }

    /// Like [`Contains`], but the right and bottom edges belong to the rectangle, too.
    ///
    /// `NaN` coordinates are never enclosed.
    pub fn encloses(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }
}

impl From<(Point, Size)> for Rect {
    fn from((origin, size): (Point, Size)) -> Self {
        (origin, origin + size).into()
    }
}

impl From<(Point, Point)> for Rect {
    fn from((origin, end): (Point, Point)) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: end.x,
            bottom: end.y,
        }
    }
}

impl Contains<Point> for Rect {
    fn contains(&self, p: Point) -> bool {
        self.contains(&p)
    }
}

impl Contains<&Point> for Rect {
    fn contains(&self, p: &Point) -> bool {
        p.x >= self.left && p.x < self.right && p.y >= self.top && p.y < self.bottom
    }
}
