use std::time::Instant;

use derive_more::Constructor;
use handpoint_geometry::SizeI;

use crate::Landmark;

/// One inference result.
///
/// Frames are produced by the inference engine and consumed once by the session.
#[derive(Debug, Clone, Constructor)]
pub struct Frame {
    /// The landmarks of every detected hand, in detection order.
    pub hands: Vec<Vec<Landmark>>,
    /// The size of the camera image the landmarks were detected in.
    pub image_size: SizeI,
    pub timestamp: Instant,
}

impl Frame {
    /// A frame in which no hand was detected.
    pub fn empty(image_size: SizeI, timestamp: Instant) -> Self {
        Self::new(Vec::new(), image_size, timestamp)
    }

    /// The landmarks of the first detected hand, `None` if there is no hand or it has no
    /// landmarks.
    ///
    /// Only one hand is used for pointing, additional hands are ignored.
    pub fn primary_hand(&self) -> Option<&[Landmark]> {
        self.hands
            .first()
            .map(Vec::as_slice)
            .filter(|landmarks| !landmarks.is_empty())
    }
}
