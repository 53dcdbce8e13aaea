//! Hand landmark input and the pinch click gesture.
mod click_gesture;
mod features;
mod frame;
mod landmark;
mod mapper;

pub use click_gesture::*;
pub use features::*;
pub use frame::*;
pub use landmark::*;
pub use mapper::*;
