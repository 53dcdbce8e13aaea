//! The cursor animator.
//!
//! Lives in the presentation context. It is driven by [`CursorCommand`]s from the gesture
//! pipeline and by animation ticks.

use std::time::{Duration, Instant};

use handpoint_animation::{Interpolation, TickResponse, Transition};
use handpoint_geometry::{Point, UnitInterval};
use log::debug;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CursorCommand {
    /// Move the cursor to a new target.
    MoveTo(Point),
    /// Start the click animation. Carries the target at the time the click was requested.
    Click(Point),
    /// Cancel a click in flight and restore the baseline radius.
    Interrupt,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CursorConfig {
    pub move_duration: Duration,
    pub click_duration: Duration,
    pub baseline_radius: f64,
    /// How much the radius shrinks during a click.
    pub click_shrink: f64,
    pub click_interpolation: Interpolation,
}

impl CursorConfig {
    pub const DEFAULT_MOVE_DURATION: Duration = Duration::from_millis(40);
    pub const DEFAULT_CLICK_DURATION: Duration = Duration::from_millis(500);
    pub const DEFAULT_BASELINE_RADIUS: f64 = 50.0;
    pub const DEFAULT_CLICK_SHRINK: f64 = 30.0;

    pub fn min_radius(&self) -> f64 {
        self.baseline_radius - self.click_shrink
    }

    pub fn max_radius(&self) -> f64 {
        self.baseline_radius
    }
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            move_duration: Self::DEFAULT_MOVE_DURATION,
            click_duration: Self::DEFAULT_CLICK_DURATION,
            baseline_radius: Self::DEFAULT_BASELINE_RADIUS,
            click_shrink: Self::DEFAULT_CLICK_SHRINK,
            click_interpolation: Interpolation::Decelerate(2.0),
        }
    }
}

/// A snapshot of what the cursor looks like.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CursorState {
    pub position: Point,
    pub target: Point,
    /// Progress of the current (or last) move animation.
    pub progress: UnitInterval,
    pub radius: f64,
    pub click_in_flight: bool,
}

impl CursorState {
    /// The center of the cursor circle when drawn with its top left corner pulled towards the
    /// pointing position by half the radius.
    pub fn draw_center(&self) -> Point {
        self.position - Point::new(self.radius / 2.0, self.radius / 2.0)
    }
}

/// A click animation ran through.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClickCompleted {
    /// The cursor position at the time of completion.
    pub position: Point,
    pub at: Instant,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TickOutcome {
    /// The cursor changed and needs to be redrawn.
    pub redraw: bool,
    pub click_completed: Option<ClickCompleted>,
    pub response: TickResponse,
}

#[derive(Debug)]
pub struct CursorAnimator {
    config: CursorConfig,
    position: Point,
    target: Point,
    radius: f64,
    progress: UnitInterval,
    movement: Option<Transition<Point>>,
    click: Option<Transition<f64>>,
    click_in_flight: bool,
    /// Changed since the last time the state was taken for presentation.
    dirty: bool,
}

impl CursorAnimator {
    pub fn new(config: CursorConfig, position: Point) -> Self {
        Self {
            config,
            position,
            target: position,
            radius: config.baseline_radius,
            progress: UnitInterval::ONE,
            movement: None,
            click: None,
            click_in_flight: false,
            dirty: true,
        }
    }

    pub fn state(&self) -> CursorState {
        CursorState {
            position: self.position,
            target: self.target,
            progress: self.progress,
            radius: self.radius,
            click_in_flight: self.click_in_flight,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.movement.is_some() || self.click.is_some()
    }

    pub fn apply(&mut self, command: CursorCommand, now: Instant) {
        match command {
            CursorCommand::MoveTo(target) => self.move_to(target, now),
            CursorCommand::Click(requested_at) => {
                if self.click(now) {
                    debug!("Click animation started, requested at {requested_at:?}");
                }
            }
            CursorCommand::Interrupt => self.interrupt(),
        }
    }

    /// Animate to a new target, starting from where the cursor is at `now`.
    pub fn move_to(&mut self, target: Point, now: Instant) {
        if let Some(movement) = self.movement.take() {
            self.set_position(movement.value_at(now));
        }
        self.target = target;
        self.progress = UnitInterval::ZERO;
        self.movement = Some(Transition::new(
            self.position,
            target,
            now,
            self.config.move_duration,
            Interpolation::Linear,
        ));
    }

    /// Start the click animation. Returns `false` if one is already in flight.
    pub fn click(&mut self, now: Instant) -> bool {
        if self.click_in_flight {
            return false;
        }
        self.click_in_flight = true;
        self.set_radius(self.config.baseline_radius);
        self.click = Some(Transition::new(
            self.config.baseline_radius,
            self.config.min_radius(),
            now,
            self.config.click_duration,
            self.config.click_interpolation,
        ));
        true
    }

    /// Cancel the click animation and restore the baseline radius immediately.
    pub fn interrupt(&mut self) {
        if self.click.take().is_some() {
            debug!("Click animation interrupted");
        }
        self.click_in_flight = false;
        self.set_radius(self.config.baseline_radius);
    }

    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        if let Some(movement) = &self.movement {
            let position = movement.value_at(now);
            self.progress = movement.progress_at(now);
            let complete = movement.is_complete_at(now);
            self.set_position(position);
            if complete {
                self.movement = None;
            }
        }

        let mut click_completed = None;
        if let Some(click) = &self.click {
            let radius = click.value_at(now);
            let complete = click.is_complete_at(now);
            self.set_radius(radius);
            if complete {
                self.click = None;
                self.click_in_flight = false;
                click_completed = Some(ClickCompleted {
                    position: self.position,
                    at: now,
                });
            }
        }

        TickOutcome {
            redraw: self.dirty,
            click_completed,
            response: if self.is_animating() {
                TickResponse::Continue
            } else {
                TickResponse::Stop
            },
        }
    }

    /// Returns the current state if it changed since the last call.
    pub fn take_changes(&mut self) -> Option<CursorState> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(self.state())
    }

    fn set_position(&mut self, position: Point) {
        if position != self.position {
            self.position = position;
            self.dirty = true;
        }
    }

    fn set_radius(&mut self, radius: f64) {
        let radius = radius.clamp(self.config.min_radius(), self.config.max_radius());
        if radius != self.radius {
            self.radius = radius;
            self.dirty = true;
        }
    }
}
