//! Easing functions.
//! Adapted from: <https://github.com/pistondevelopers/interpolation> version 0.3.0

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum Interpolation {
    #[default]
    Linear,

    /// Starts fast and decelerates: `1 - (1 - t)^(2 * factor)`.
    ///
    /// A factor of 1 is the quadratic ease out, 2 the quartic one.
    Decelerate(f64),
}

pub trait Ease {
    /// Calculate the eased value, normalized.
    fn interpolate(self, f: Interpolation) -> Self;

    fn decelerate(self, factor: f64) -> Self;
}

fn clamp(p: f64) -> f64 {
    match () {
        _ if p > 1.0 => 1.0,
        _ if p < 0.0 => 0.0,
        _ => p,
    }
}

impl Ease for f64 {
    fn interpolate(self, f: Interpolation) -> Self {
        match f {
            Interpolation::Linear => self,
            Interpolation::Decelerate(factor) => self.decelerate(factor),
        }
    }

    fn decelerate(self, factor: f64) -> Self {
        let p = clamp(self);
        1.0 - (1.0 - p).powf(2.0 * factor)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn curves_start_at_zero_and_end_at_one() {
        for curve in [
            Interpolation::Linear,
            Interpolation::Decelerate(1.0),
            Interpolation::Decelerate(2.0),
        ] {
            assert_relative_eq!(0.0_f64.interpolate(curve), 0.0);
            assert_relative_eq!(1.0_f64.interpolate(curve), 1.0);
        }
    }

    #[test]
    fn decelerate_matches_the_power_curves() {
        for t in [0.1_f64, 0.25, 0.5, 0.75, 0.9] {
            let quadratic_out = 1.0 - (1.0 - t).powi(2);
            let quartic_out = 1.0 - (1.0 - t).powi(4);
            assert_relative_eq!(t.decelerate(1.0), quadratic_out, epsilon = 1e-12);
            assert_relative_eq!(t.decelerate(2.0), quartic_out, epsilon = 1e-12);
        }
    }

    #[test]
    fn decelerating_curves_run_ahead_of_linear() {
        for t in [0.1_f64, 0.5, 0.9] {
            assert!(t.interpolate(Interpolation::Decelerate(2.0)) > t);
        }
    }

    #[test]
    fn progress_outside_the_unit_interval_is_clamped() {
        assert_relative_eq!((-0.5_f64).decelerate(2.0), 0.0);
        assert_relative_eq!(1.5_f64.decelerate(2.0), 1.0);
    }
}
