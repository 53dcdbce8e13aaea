use serde::{Deserialize, Serialize};

/// An integer size, used for image and display dimensions in pixels.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Hash, Serialize, Deserialize)]
pub struct SizeI {
    pub width: u32,
    pub height: u32,
}

impl SizeI {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<(u32, u32)> for SizeI {
    fn from((width, height): (u32, u32)) -> Self {
        SizeI::new(width, height)
    }
}
