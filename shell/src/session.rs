use std::sync::Arc;

use derive_more::Display;
use handpoint_util::CoalescingReceiver;
use log::{debug, error, info};
use parking_lot::Mutex;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};

use crate::{
    CursorAnimator, GestureConfig, GesturePipeline, HeadlessSurface, LandmarkSource,
    RenderSurface, SessionError, SourceSink, TapDispatcher, presenter::Presenter,
    producer::produce,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Display)]
pub enum SessionState {
    Stopped,
    Starting,
    Started,
    Stopping,
}

/// Turns hand landmarks into cursor movement and taps.
///
/// A started session runs two tasks on the current tokio runtime: the producer runs the gesture
/// pipeline for every frame of the [`LandmarkSource`], the presenter animates the cursor on the
/// [`RenderSurface`] and dispatches completed clicks through the [`TapDispatcher`].
///
/// Dropping the session stops it.
pub struct GestureSession {
    shared: Arc<Shared>,
}

pub(crate) struct Shared {
    config: GestureConfig,
    state: watch::Sender<SessionState>,
    errors: mpsc::UnboundedSender<SessionError>,
    error_receiver: Mutex<Option<mpsc::UnboundedReceiver<SessionError>>>,
    resources: Mutex<Resources>,
}

struct Resources {
    source: Box<dyn LandmarkSource>,
    dispatcher: Arc<Mutex<Box<dyn TapDispatcher>>>,
    running: Option<Running>,
}

struct Running {
    surface: Arc<Mutex<Box<dyn RenderSurface>>>,
    producer: JoinHandle<()>,
    presenter: JoinHandle<()>,
}

impl GestureSession {
    pub fn new(
        config: GestureConfig,
        source: impl LandmarkSource,
        dispatcher: impl TapDispatcher,
    ) -> Result<Self, SessionError> {
        config.validate().map_err(|e| SessionError::Config {
            reason: format!("{e:#}"),
        })?;

        let (errors, error_receiver) = mpsc::unbounded_channel();
        let (state, _) = watch::channel(SessionState::Stopped);

        Ok(Self {
            shared: Arc::new(Shared {
                config,
                state,
                errors,
                error_receiver: Mutex::new(Some(error_receiver)),
                resources: Mutex::new(Resources {
                    source: Box::new(source),
                    dispatcher: Arc::new(Mutex::new(Box::new(dispatcher))),
                    running: None,
                }),
            }),
        })
    }

    pub fn config(&self) -> &GestureConfig {
        &self.shared.config
    }

    pub fn state(&self) -> SessionState {
        self.shared.state()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<SessionState> {
        self.shared.state.subscribe()
    }

    /// The stream of errors. Can be taken only once.
    pub fn take_errors(&self) -> Option<mpsc::UnboundedReceiver<SessionError>> {
        self.shared.error_receiver.lock().take()
    }

    /// Connects the landmark source and starts presenting on `surface`. Without a surface, the
    /// session runs headless on the configured fallback screen.
    ///
    /// Does nothing if the session is not stopped. Must be called from within a tokio runtime.
    pub fn start(&self, surface: Option<Box<dyn RenderSurface>>) -> Result<(), SessionError> {
        let shared = &self.shared;
        let mut resources = shared.resources.lock();

        let state = shared.state();
        if state != SessionState::Stopped {
            debug!("Session is {state}, ignoring start");
            return Ok(());
        }
        shared.set_state(SessionState::Starting);

        let mut surface = surface.unwrap_or_else(|| {
            info!("No render surface, running headless");
            Box::new(HeadlessSurface::new(shared.config.fallback_metrics()))
        });
        let metrics = surface.metrics();

        let (source_sender, source_receiver) = mpsc::unbounded_channel();
        if let Err(e) = resources.source.connect(SourceSink::new(source_sender)) {
            error!("Failed to connect the landmark source: {e:#}");
            surface.release();
            shared.set_state(SessionState::Stopped);
            return Err(SessionError::InputUnavailable {
                reason: format!("{e:#}"),
            });
        }

        let (command_sender, command_receiver) = mpsc::unbounded_channel();
        let (completion_sender, completion_receiver) = mpsc::unbounded_channel();

        let pipeline = GesturePipeline::new(
            metrics,
            shared.config.feature_extractor(),
            shared.config.click_gesture(),
        );
        let producer = tokio::spawn(produce(
            CoalescingReceiver::new(source_receiver),
            pipeline,
            completion_receiver,
            command_sender,
            shared.errors.clone(),
        ));

        let surface = Arc::new(Mutex::new(surface));
        let presenter = Presenter {
            animator: CursorAnimator::new(shared.config.cursor(), metrics.bounds().center()),
            surface: surface.clone(),
            dispatcher: resources.dispatcher.clone(),
            bounds: metrics.bounds(),
            completions: completion_sender,
            errors: shared.errors.clone(),
        };
        let presenter = tokio::spawn(presenter.run(
            command_receiver,
            shared.config.frame_interval(),
            Arc::downgrade(shared),
        ));

        resources.running = Some(Running {
            surface,
            producer,
            presenter,
        });
        shared.set_state(SessionState::Started);
        Ok(())
    }

    /// Stops delivering frames, cancels all animations and releases the surface.
    ///
    /// Does nothing if the session is not started.
    pub fn stop(&self) {
        self.shared.stop();
    }
}

impl Drop for GestureSession {
    fn drop(&mut self) {
        self.shared.stop();
    }
}

impl Shared {
    fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    fn set_state(&self, state: SessionState) {
        info!("Session {state}");
        self.state.send_replace(state);
    }

    pub(crate) fn stop(&self) {
        let mut resources = self.resources.lock();

        let state = self.state();
        if state != SessionState::Started {
            debug!("Session is {state}, ignoring stop");
            return;
        }
        self.set_state(SessionState::Stopping);

        if let Some(running) = resources.running.take() {
            resources.source.disconnect();
            // Detail: Aborting drops the animator, pending click completions are never
            // dispatched.
            running.producer.abort();
            running.presenter.abort();
            running.surface.lock().release();
        }

        self.set_state(SessionState::Stopped);
    }
}
