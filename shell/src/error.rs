use derive_more::{Display, Error};
use handpoint_geometry::Point;

/// Errors a gesture session reports.
///
/// Only [`SessionError::InputUnavailable`] and [`SessionError::SurfaceLost`] end a session,
/// everything else is reported and the session continues.
#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum SessionError {
    /// The landmark source could not be connected.
    #[display("Landmark source unavailable: {reason}")]
    InputUnavailable { reason: String },
    /// The inference engine reported an error. The session keeps running.
    #[display("Inference error {code}: {message}")]
    InferenceError { message: String, code: i32 },
    /// A tap could not be dispatched to the system.
    #[display("Failed to dispatch a tap at {point:?}")]
    DispatchFailed { point: Point },
    /// The render surface is gone. The session was stopped.
    #[display("Render surface lost: {reason}")]
    SurfaceLost { reason: String },
    #[display("Invalid configuration: {reason}")]
    Config { reason: String },
}

impl SessionError {
    /// `true` if this error ends the session.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SessionError::InputUnavailable { .. } | SessionError::SurfaceLost { .. }
        )
    }
}
