use anyhow::Result;
use handpoint_geometry::Point;
use handpoint_input::ScreenMetrics;
use log::trace;

/// Where the cursor is drawn. Typically a transparent, non interactive overlay covering the
/// screen.
pub trait RenderSurface: Send + 'static {
    /// The screen the surface covers.
    fn metrics(&self) -> ScreenMetrics;

    /// Push a new cursor position and radius in screen pixels.
    ///
    /// An error means that the surface is gone and the session can not continue.
    fn update(&mut self, position: Point, radius: f64) -> Result<()>;

    fn request_redraw(&mut self);

    /// Free all resources. Called once when the session stops.
    fn release(&mut self);
}

/// A surface that draws nothing.
///
/// Used when no overlay can be shown.
#[derive(Debug)]
pub struct HeadlessSurface {
    metrics: ScreenMetrics,
    cursor: Option<(Point, f64)>,
}

impl HeadlessSurface {
    pub fn new(metrics: ScreenMetrics) -> Self {
        Self {
            metrics,
            cursor: None,
        }
    }

    /// The most recent position and radius.
    pub fn cursor(&self) -> Option<(Point, f64)> {
        self.cursor
    }
}

impl RenderSurface for HeadlessSurface {
    fn metrics(&self) -> ScreenMetrics {
        self.metrics
    }

    fn update(&mut self, position: Point, radius: f64) -> Result<()> {
        self.cursor = Some((position, radius));
        Ok(())
    }

    fn request_redraw(&mut self) {
        if let Some((position, radius)) = self.cursor {
            trace!("Cursor at {position:?}, radius {radius}");
        }
    }

    fn release(&mut self) {
        self.cursor = None;
    }
}
