use std::time::Instant;

use handpoint_util::CoalescingReceiver;
use log::{debug, trace, warn};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::{CursorCommand, GesturePipeline, SessionError, SourceEvent};

/// The producer task.
///
/// Runs every frame through the pipeline and forwards the resulting commands in frame order.
/// Click completions reported back by the presenter are applied before each frame.
///
/// Ends when the landmark source disconnects or the presenter is gone.
pub(crate) async fn produce(
    mut events: CoalescingReceiver<SourceEvent>,
    mut pipeline: GesturePipeline,
    mut completions: UnboundedReceiver<Instant>,
    commands: UnboundedSender<CursorCommand>,
    errors: UnboundedSender<SessionError>,
) {
    loop {
        let Ok(event) = events.recv().await else {
            debug!(
                "Landmark source disconnected, {} superseded frames were dropped",
                events.dropped()
            );
            return;
        };

        match event {
            SourceEvent::Frame(frame) => {
                while let Ok(at) = completions.try_recv() {
                    pipeline.click_completed(at);
                }
                for command in pipeline.process(&frame) {
                    trace!("{command:?}");
                    if commands.send(command).is_err() {
                        debug!("Presenter gone, stopping the producer");
                        return;
                    }
                }
            }
            SourceEvent::Error { message, code } => {
                warn!("Inference error {code}: {message}");
                // Robustness: Nobody may listen to errors, this is fine.
                let _ = errors.send(SessionError::InferenceError { message, code });
            }
        }
    }
}
