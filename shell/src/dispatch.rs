use std::time::Duration;

use anyhow::Result;
use handpoint_geometry::Point;

/// How long the synthesized touch stroke of a tap lasts.
pub const TAP_STROKE_DURATION: Duration = Duration::from_millis(20);

/// Injects taps into the system.
pub trait TapDispatcher: Send + 'static {
    /// Dispatch a single tap at `point` in screen pixels.
    ///
    /// Returns `Ok(false)` if the system rejected the tap.
    fn dispatch_tap(&mut self, point: Point) -> Result<bool>;
}
