//! Detects the pinch click and debounces it.

use std::time::{Duration, Instant};

use handpoint_geometry::Point;
use log::debug;

use crate::Features;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClickGestureConfig {
    /// The finger segments must be rotated apart by more than this angle.
    pub angle_threshold_degrees: f64,
    /// The minimum time between two click requests.
    pub cooldown: Duration,
}

impl ClickGestureConfig {
    pub const DEFAULT_ANGLE_THRESHOLD_DEGREES: f64 = 35.0;
    pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(1000);
}

impl Default for ClickGestureConfig {
    fn default() -> Self {
        Self {
            angle_threshold_degrees: Self::DEFAULT_ANGLE_THRESHOLD_DEGREES,
            cooldown: Self::DEFAULT_COOLDOWN,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// A click was requested and its animation is running.
    Armed,
    /// A click completed. The next one is suppressed until the cooldown since its request passed.
    Cooldown,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GestureEvent {
    /// Start the click animation. The point is the target at the time of the request.
    ClickRequested(Point),
    /// The click pose was released, cancel a click in flight.
    Interrupt,
}

/// The click gesture state machine.
///
/// Evaluated once per frame that produced [`Features`]. Frames without a hand must not be fed
/// into it, the state persists over detection gaps.
#[derive(Debug)]
pub struct ClickGesture {
    config: ClickGestureConfig,
    state: GestureState,
    /// The time of the most recent click request. `None` before the first click.
    last_trigger: Option<Instant>,
}

impl Default for ClickGesture {
    fn default() -> Self {
        Self::new(ClickGestureConfig::default())
    }
}

impl ClickGesture {
    pub fn new(config: ClickGestureConfig) -> Self {
        Self {
            config,
            state: GestureState::Idle,
            last_trigger: None,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn last_trigger(&self) -> Option<Instant> {
        self.last_trigger
    }

    pub fn evaluate(&mut self, features: &Features, now: Instant) -> Option<GestureEvent> {
        if !features.is_click_pose(self.config.angle_threshold_degrees) {
            if self.state != GestureState::Idle {
                debug!("Click pose released in {:?}", self.state);
            }
            self.state = GestureState::Idle;
            return Some(GestureEvent::Interrupt);
        }

        match self.state {
            // Click in flight.
            GestureState::Armed => None,
            GestureState::Idle | GestureState::Cooldown if self.cooldown_elapsed(now) => {
                debug!("Click requested at {:?}", features.target);
                self.state = GestureState::Armed;
                self.last_trigger = Some(now);
                Some(GestureEvent::ClickRequested(features.target))
            }
            // Pose held, but the cooldown is not over yet.
            GestureState::Idle | GestureState::Cooldown => None,
        }
    }

    /// The click animation that was started by the most recent [`GestureEvent::ClickRequested`]
    /// ended at `at`.
    ///
    /// Leaves the trigger time alone, the cooldown runs from the request. Completions that are
    /// older than the most recent request are ignored.
    pub fn click_completed(&mut self, at: Instant) {
        if self.last_trigger.is_none_or(|last| at < last) {
            return;
        }
        if self.state == GestureState::Armed {
            self.state = GestureState::Cooldown;
        }
    }

    fn cooldown_elapsed(&self, now: Instant) -> bool {
        match self.last_trigger {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.config.cooldown,
        }
    }
}
