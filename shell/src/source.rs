use anyhow::Result;
use handpoint_input::Frame;
use handpoint_util::CoalescingKey;
use tokio::sync::mpsc::UnboundedSender;

/// Delivers hand landmarks. Usually backed by a camera and an inference engine.
pub trait LandmarkSource: Send + 'static {
    /// Start delivering frames and errors into `sink`.
    ///
    /// Called when a session starts. An error here fails the start.
    fn connect(&mut self, sink: SourceSink) -> Result<()>;

    /// Stop delivering. Must drop the sink that was passed to `connect()`.
    fn disconnect(&mut self);
}

/// What a [`LandmarkSource`] produces.
#[derive(Debug)]
pub enum SourceEvent {
    Frame(Frame),
    Error { message: String, code: i32 },
}

impl CoalescingKey for SourceEvent {
    type Key = ();

    // Only the most recent frame matters, errors are never dropped.
    fn coalescing_key(&self) -> Option<()> {
        matches!(self, SourceEvent::Frame(_)).then_some(())
    }
}

/// The receiving end of a session as seen by the [`LandmarkSource`].
///
/// Sending never blocks. If the producer is busy, superseded frames are dropped on the receiving
/// side.
#[derive(Debug, Clone)]
pub struct SourceSink {
    sender: UnboundedSender<SourceEvent>,
}

impl SourceSink {
    pub(crate) fn new(sender: UnboundedSender<SourceEvent>) -> Self {
        Self { sender }
    }

    /// Returns `false` if the session is not listening anymore.
    pub fn frame(&self, frame: Frame) -> bool {
        self.sender.send(SourceEvent::Frame(frame)).is_ok()
    }

    /// Returns `false` if the session is not listening anymore.
    pub fn error(&self, message: impl Into<String>, code: i32) -> bool {
        self.sender
            .send(SourceEvent::Error {
                message: message.into(),
                code,
            })
            .is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
