use std::{
    sync::{Arc, Weak},
    time::{Duration, Instant},
};

use anyhow::Result;
use handpoint_geometry::{Point, Rect};
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use tokio::{
    sync::mpsc::{UnboundedReceiver, UnboundedSender},
    time::{self, MissedTickBehavior},
};

use crate::{
    ClickCompleted, CursorAnimator, CursorCommand, RenderSurface, SessionError, TapDispatcher,
    session::Shared,
};

/// The presentation side of a session: owns the cursor animator, pushes its state to the surface
/// and dispatches completed clicks.
pub(crate) struct Presenter {
    pub animator: CursorAnimator,
    pub surface: Arc<Mutex<Box<dyn RenderSurface>>>,
    pub dispatcher: Arc<Mutex<Box<dyn TapDispatcher>>>,
    /// Taps outside of these bounds are not dispatched.
    pub bounds: Rect,
    pub completions: UnboundedSender<Instant>,
    pub errors: UnboundedSender<SessionError>,
}

impl Presenter {
    /// Runs until the command channel closes or the surface is lost.
    ///
    /// If the surface is lost, the session is stopped.
    pub async fn run(
        mut self,
        mut commands: UnboundedReceiver<CursorCommand>,
        frame_interval: Duration,
        session: Weak<Shared>,
    ) {
        if let Err(e) = self.present_loop(&mut commands, frame_interval).await {
            error!("Render surface lost: {e:#}");
            let _ = self.errors.send(SessionError::SurfaceLost {
                reason: format!("{e:#}"),
            });
            // Detail: If the session is already gone, there is nothing left to stop.
            if let Some(session) = session.upgrade() {
                session.stop();
            }
        }
    }

    async fn present_loop(
        &mut self,
        commands: &mut UnboundedReceiver<CursorCommand>,
        frame_interval: Duration,
    ) -> Result<()> {
        let mut ticker = time::interval(frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Show the cursor right away.
        self.present()?;

        loop {
            if self.animator.is_animating() {
                tokio::select! {
                    command = commands.recv() => {
                        let Some(command) = command else {
                            return Ok(());
                        };
                        self.apply(command)?;
                    }
                    instant = ticker.tick() => {
                        self.tick(instant.into_std())?;
                    }
                }
            } else {
                // Idle, no need to tick.
                let Some(command) = commands.recv().await else {
                    return Ok(());
                };
                self.apply(command)?;
                ticker.reset();
            }
        }
    }

    fn apply(&mut self, command: CursorCommand) -> Result<()> {
        self.animator.apply(command, now());
        self.present()
    }

    fn tick(&mut self, now: Instant) -> Result<()> {
        let outcome = self.animator.tick(now);
        if outcome.redraw {
            self.present()?;
        }
        if let Some(completed) = outcome.click_completed {
            self.click_completed(completed);
        }
        Ok(())
    }

    /// Pushes the cursor to the surface if it changed.
    fn present(&mut self) -> Result<()> {
        let Some(cursor) = self.animator.take_changes() else {
            return Ok(());
        };
        let mut surface = self.surface.lock();
        surface.update(cursor.position, cursor.radius)?;
        surface.request_redraw();
        Ok(())
    }

    fn click_completed(&mut self, completed: ClickCompleted) {
        self.dispatch(completed.position);
        // Detail: The producer may already be gone when the session stops.
        let _ = self.completions.send(completed.at);
    }

    fn dispatch(&mut self, point: Point) {
        if !self.bounds.encloses(point) {
            debug!("Tap at {point:?} is off screen, not dispatched");
            return;
        }

        match self.dispatcher.lock().dispatch_tap(point) {
            Ok(true) => info!("Tap dispatched at {point:?}"),
            Ok(false) => {
                warn!("Tap at {point:?} was rejected");
                let _ = self.errors.send(SessionError::DispatchFailed { point });
            }
            Err(e) => {
                warn!("Tap at {point:?} failed: {e:#}");
                let _ = self.errors.send(SessionError::DispatchFailed { point });
            }
        }
    }
}

/// The current time on the runtime's clock.
fn now() -> Instant {
    time::Instant::now().into_std()
}
