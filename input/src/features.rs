use derive_more::{Display, Error};
use handpoint_geometry::{Point, Vector};
use log::trace;

use crate::{
    CoordinateMapper, INDEX_DIP, INDEX_TIP, LANDMARK_COUNT, Landmark, THUMB_IP, THUMB_TIP,
};

/// The pinch midpoint is pushed outward from the image center by this factor before it gets
/// mapped to the screen. It sits inboard of where the hand actually points at.
pub const DEFAULT_PINCH_EXPANSION: f64 = 1.6;

/// Features of one frame's hand.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Features {
    /// The angle between the last thumb segment and the last index finger segment in degrees
    /// (`0..=180`).
    pub angle_degrees: f64,
    /// The 2D cross product of the two segments. Its sign tells in which direction the index
    /// finger segment is rotated relative to the thumb segment.
    pub cross: f64,
    /// Where the cursor should go to, in screen pixels.
    pub target: Point,
}

impl Features {
    /// `true` if the fingers form the click pose: the segments are rotated apart by more than
    /// `angle_threshold_degrees` and the index finger is turned towards the thumb.
    pub fn is_click_pose(&self, angle_threshold_degrees: f64) -> bool {
        self.angle_degrees > angle_threshold_degrees && self.cross < 0.0
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Display, Error)]
pub enum FeatureError {
    #[display("Too few landmarks: {found}")]
    MissingLandmarks { found: usize },
    /// One of the finger segments has zero length, no angle can be computed.
    #[display("Degenerate finger segment")]
    DegenerateVector,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FeatureExtractor {
    pinch_expansion: f64,
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_PINCH_EXPANSION)
    }
}

impl FeatureExtractor {
    pub fn new(pinch_expansion: f64) -> Self {
        Self { pinch_expansion }
    }

    pub fn extract(
        &self,
        landmarks: &[Landmark],
        mapper: &CoordinateMapper,
    ) -> Result<Features, FeatureError> {
        if landmarks.len() < LANDMARK_COUNT {
            return Err(FeatureError::MissingLandmarks {
                found: landmarks.len(),
            });
        }

        let thumb = segment(&landmarks[THUMB_IP], &landmarks[THUMB_TIP]);
        let index = segment(&landmarks[INDEX_DIP], &landmarks[INDEX_TIP]);

        let angle = thumb
            .angle_to(index)
            .ok_or(FeatureError::DegenerateVector)?;
        let cross = thumb.cross(index);

        let thumb_tip = mapper.to_screen(CoordinateMapper::expand(
            &landmarks[THUMB_TIP],
            self.pinch_expansion,
        ));
        let index_tip = mapper.to_screen(CoordinateMapper::expand(
            &landmarks[INDEX_TIP],
            self.pinch_expansion,
        ));

        let features = Features {
            angle_degrees: angle.to_degrees(),
            cross,
            target: thumb_tip.midpoint(index_tip),
        };
        trace!("{features:?}");
        Ok(features)
    }
}

/// The vector pointing from `from` to `to` in the image plane.
fn segment(from: &Landmark, to: &Landmark) -> Vector {
    to.xy() - from.xy()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use handpoint_geometry::{Size, SizeI};

    use super::*;
    use crate::ScreenMetrics;

    /// A hand at rest in the middle of the image with the thumb segment pointing along `thumb`
    /// and the index finger segment along `index`.
    fn hand(thumb: (f64, f64), index: (f64, f64)) -> Vec<Landmark> {
        let mut landmarks = vec![Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
        landmarks[THUMB_IP] = Landmark::new(0.4, 0.5, 0.0);
        landmarks[THUMB_TIP] = Landmark::new(0.4 + thumb.0, 0.5 + thumb.1, 0.0);
        landmarks[INDEX_DIP] = Landmark::new(0.6, 0.5, 0.0);
        landmarks[INDEX_TIP] = Landmark::new(0.6 + index.0, 0.5 + index.1, 0.0);
        landmarks
    }

    fn mapper() -> CoordinateMapper {
        let screen = ScreenMetrics::new(Size::new(1080.0, 2400.0), 0.0);
        CoordinateMapper::new(SizeI::new(480, 640), &screen).unwrap()
    }

    #[test]
    fn perpendicular_segments() {
        let features = FeatureExtractor::default()
            .extract(&hand((0.1, 0.0), (0.0, 0.1)), &mapper())
            .unwrap();
        assert_relative_eq!(features.angle_degrees, 90.0, epsilon = 1e-9);
        assert!(features.cross > 0.0);
    }

    #[test]
    fn swapped_segments_flip_the_cross_sign() {
        let features = FeatureExtractor::default()
            .extract(&hand((0.0, 0.1), (0.1, 0.0)), &mapper())
            .unwrap();
        assert!(features.cross < 0.0);
    }

    #[test]
    fn parallel_and_opposite_segments() {
        let extractor = FeatureExtractor::default();
        let parallel = extractor
            .extract(&hand((0.1, 0.0), (0.1, 0.0)), &mapper())
            .unwrap();
        assert_relative_eq!(parallel.angle_degrees, 0.0, epsilon = 1e-4);

        let opposite = extractor
            .extract(&hand((0.1, 0.0), (-0.1, 0.0)), &mapper())
            .unwrap();
        assert_relative_eq!(opposite.angle_degrees, 180.0, epsilon = 1e-4);
    }

    #[test]
    fn target_is_the_expanded_midpoint_of_the_tips() {
        // Thumb tip at (0.5, 0.45), index tip at (0.5, 0.55): the midpoint is the image center,
        // which expansion keeps in place.
        let mut landmarks = hand((0.1, -0.05), (-0.1, 0.05));
        landmarks[THUMB_TIP] = Landmark::new(0.5, 0.45, 0.0);
        landmarks[INDEX_TIP] = Landmark::new(0.5, 0.55, 0.0);
        let features = FeatureExtractor::default()
            .extract(&landmarks, &mapper())
            .unwrap();
        assert_relative_eq!(features.target.x, 900.0, epsilon = 1e-9);
        assert_relative_eq!(features.target.y, 1200.0, epsilon = 1e-9);
    }

    #[test]
    fn too_few_landmarks() {
        let landmarks = vec![Landmark::default(); 20];
        assert_eq!(
            FeatureExtractor::default().extract(&landmarks, &mapper()),
            Err(FeatureError::MissingLandmarks { found: 20 })
        );
    }

    #[test]
    fn zero_length_segment_is_degenerate() {
        assert_eq!(
            FeatureExtractor::default().extract(&hand((0.0, 0.0), (0.1, 0.0)), &mapper()),
            Err(FeatureError::DegenerateVector)
        );
    }

    #[test]
    fn click_pose_needs_angle_and_orientation() {
        let pose = |angle_degrees, cross| Features {
            angle_degrees,
            cross,
            target: Point::ZERO,
        };
        assert!(pose(40.0, -0.2).is_click_pose(35.0));
        assert!(!pose(40.0, 0.2).is_click_pose(35.0));
        assert!(!pose(35.0, -0.2).is_click_pose(35.0));
        assert!(!pose(20.0, -0.2).is_click_pose(35.0));
    }
}
