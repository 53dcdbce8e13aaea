use handpoint_geometry::{Point, Rect, Size, SizeI};
use serde::{Deserialize, Serialize};

use crate::Landmark;

/// The screen area the cursor lives in.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenMetrics {
    /// The usable screen size in pixels.
    pub size: Size,
    /// Height reserved by the system at the top of the display (status bar, for example).
    ///
    /// Added to the y coordinate of every mapped point.
    pub vertical_offset: f64,
}

impl ScreenMetrics {
    pub const fn new(size: Size, vertical_offset: f64) -> Self {
        Self {
            size,
            vertical_offset,
        }
    }

    /// Derive the metrics from the real display size and the size that is usable by
    /// applications. The difference in height is considered system reserved.
    pub fn from_display(real: SizeI, usable: SizeI) -> Self {
        let vertical_offset = real.height.saturating_sub(usable.height) as f64;
        Self::new(usable.into(), vertical_offset)
    }

    /// The area taps may be dispatched to. Edges included.
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.size)
    }
}

/// Maps normalized landmark coordinates of one camera image into screen pixels.
///
/// The image is scaled uniformly so that it covers the full screen (cover-fit). Nothing is
/// clamped, mapped points may be outside of the screen.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CoordinateMapper {
    image_size: Size,
    cover_scale: f64,
    vertical_offset: f64,
}

impl CoordinateMapper {
    /// `None` if the image size is empty.
    pub fn new(image_size: SizeI, screen: &ScreenMetrics) -> Option<Self> {
        if image_size.is_empty() {
            return None;
        }
        let image_size: Size = image_size.into();
        let cover_scale = image_size.cover_scale(screen.size)?;
        Some(Self {
            image_size,
            cover_scale,
            vertical_offset: screen.vertical_offset,
        })
    }

    pub fn cover_scale(&self) -> f64 {
        self.cover_scale
    }

    /// Expands (`scale > 1`) or contracts (`scale < 1`) a landmark around the image center.
    ///
    /// The result is still in normalized image coordinates.
    pub fn expand(landmark: &Landmark, scale: f64) -> Point {
        let center = Point::new(0.5, 0.5);
        (landmark.xy() - center) * scale + center
    }

    /// Maps a normalized image point into screen pixels.
    ///
    /// The vertical offset is included, the result is used for drawing and for dispatching alike.
    pub fn to_screen(&self, normalized: Point) -> Point {
        let x = normalized.x * self.image_size.width * self.cover_scale;
        let y = normalized.y * self.image_size.height * self.cover_scale + self.vertical_offset;
        Point::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn portrait_phone() -> ScreenMetrics {
        ScreenMetrics::new(Size::new(1080.0, 2400.0), 0.0)
    }

    #[test]
    fn image_center_maps_with_cover_scale() {
        let mapper = CoordinateMapper::new(SizeI::new(480, 640), &portrait_phone()).unwrap();
        assert_relative_eq!(mapper.cover_scale(), 3.75);
        let p = mapper.to_screen(Point::new(0.5, 0.5));
        assert_relative_eq!(p.x, 900.0);
        assert_relative_eq!(p.y, 1200.0);
    }

    #[test]
    fn vertical_offset_only_moves_y() {
        let screen = ScreenMetrics::new(Size::new(1080.0, 2400.0), 63.0);
        let mapper = CoordinateMapper::new(SizeI::new(480, 640), &screen).unwrap();
        let p = mapper.to_screen(Point::new(0.5, 0.5));
        assert_relative_eq!(p.x, 900.0);
        assert_relative_eq!(p.y, 1263.0);
    }

    #[test]
    fn expansion_keeps_the_center_fixed() {
        let center = Landmark::new(0.5, 0.5, 0.0);
        assert_eq!(CoordinateMapper::expand(&center, 1.6), Point::new(0.5, 0.5));

        let p = CoordinateMapper::expand(&Landmark::new(0.75, 0.25, 0.0), 1.6);
        assert_relative_eq!(p.x, 0.9, epsilon = 1e-12);
        assert_relative_eq!(p.y, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn mapped_points_are_not_clamped() {
        let mapper = CoordinateMapper::new(SizeI::new(480, 640), &portrait_phone()).unwrap();
        let p = mapper.to_screen(CoordinateMapper::expand(&Landmark::new(0.0, 1.0, 0.0), 1.6));
        assert!(p.x < 0.0);
        assert!(p.y > 2400.0);
    }

    #[test]
    fn empty_images_cannot_be_mapped() {
        assert!(CoordinateMapper::new(SizeI::new(0, 640), &portrait_phone()).is_none());
    }

    #[test]
    fn display_metrics_reserve_the_status_bar() {
        let metrics =
            ScreenMetrics::from_display(SizeI::new(1080, 2400), SizeI::new(1080, 2337));
        assert_eq!(metrics.size, Size::new(1080.0, 2337.0));
        assert_relative_eq!(metrics.vertical_offset, 63.0);
    }
}
