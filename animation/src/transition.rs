use std::time::{Duration, Instant};

use handpoint_geometry::UnitInterval;

use crate::{Ease, Interpolatable, Interpolation};

/// A single animation run from one value to another.
///
/// A transition does not own any timer, it is evaluated at the instants it is asked for. Cancelling
/// a transition means dropping it.
#[derive(Debug, Clone)]
pub struct Transition<T> {
    /// The value at the time the animation started.
    from: T,
    /// The target value at the end of the animation.
    to: T,
    /// The time the animation got started.
    start_time: Instant,
    /// The duration of the animation.
    duration: Duration,
    /// How to adjust t before interpolating the value.
    interpolation: Interpolation,
}

impl<T> Transition<T> {
    pub fn new(
        from: T,
        to: T,
        start_time: Instant,
        duration: Duration,
        interpolation: Interpolation,
    ) -> Self {
        Self {
            from,
            to,
            start_time,
            duration,
            interpolation,
        }
    }

    pub fn end_time(&self) -> Instant {
        self.start_time + self.duration
    }

    /// Compute the (linear) progress of this animation at the time `instant`, where 0.0 is <=
    /// start_time and 1.0 >= end_time.
    pub fn progress_at(&self, instant: Instant) -> UnitInterval {
        if instant <= self.start_time {
            return UnitInterval::ZERO;
        }

        if instant >= self.end_time() {
            return UnitInterval::ONE;
        }

        let t = (instant - self.start_time).as_secs_f64() / self.duration.as_secs_f64();

        // `t` may be NaN if duration is zero.
        if t >= 1.0 || !t.is_finite() {
            return UnitInterval::ONE;
        }

        UnitInterval::saturating(t)
    }

    pub fn is_complete_at(&self, instant: Instant) -> bool {
        self.progress_at(instant).is_complete()
    }
}

impl<T: Interpolatable> Transition<T> {
    /// Compute the value at the given instant including easing.
    ///
    /// Before the start time, the starting value is returned, after the end, the target value.
    pub fn value_at(&self, instant: Instant) -> T {
        let t = self.progress_at(instant);
        if t.is_complete() {
            return self.to.clone();
        }
        if t == UnitInterval::ZERO {
            return self.from.clone();
        }

        // Apply the easing function to t.
        let t = Ease::interpolate(f64::from(t), self.interpolation);

        Interpolatable::interpolate(&self.from, &self.to, t)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use handpoint_geometry::Point;

    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn zero_duration_is_complete_immediately() {
        let now = Instant::now();
        let transition = Transition::new(0.0, 10.0, now, Duration::ZERO, Interpolation::Linear);
        assert!(transition.is_complete_at(now));
        assert_eq!(transition.value_at(now), 10.0);
    }

    #[test]
    fn linear_point_transition() {
        let start = Instant::now();
        let transition = Transition::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, -50.0),
            start,
            40 * MS,
            Interpolation::Linear,
        );

        assert_eq!(transition.value_at(start), Point::new(0.0, 0.0));
        let half = transition.value_at(start + 20 * MS);
        assert_relative_eq!(half.x, 50.0, epsilon = 1e-9);
        assert_relative_eq!(half.y, -25.0, epsilon = 1e-9);
        assert_eq!(transition.value_at(start + 40 * MS), Point::new(100.0, -50.0));
        assert_eq!(transition.value_at(start + 400 * MS), Point::new(100.0, -50.0));
    }

    #[test]
    fn progress_is_monotonic() {
        let start = Instant::now();
        let transition = Transition::new(50.0, 20.0, start, 500 * MS, Interpolation::Decelerate(2.0));
        let mut previous = UnitInterval::ZERO;
        for step in 0..=60 {
            let progress = transition.progress_at(start + step * 10 * MS);
            assert!(progress >= previous);
            previous = progress;
        }
        assert!(previous.is_complete());
    }

    #[test]
    fn instants_before_the_start_yield_the_start_value() {
        let start = Instant::now() + Duration::from_secs(1);
        let transition = Transition::new(1.0, 2.0, start, 10 * MS, Interpolation::Linear);
        assert_eq!(transition.value_at(Instant::now()), 1.0);
    }
}
