//! Gesture sessions: hand landmarks in, cursor animation and taps out.

mod config;
mod cursor;
mod dispatch;
mod error;
mod pipeline;
mod presenter;
mod producer;
mod session;
mod source;
mod surface;

pub use config::*;
pub use cursor::*;
pub use dispatch::*;
pub use error::*;
pub use pipeline::*;
pub use session::{GestureSession, SessionState};
pub use source::*;
pub use surface::*;
