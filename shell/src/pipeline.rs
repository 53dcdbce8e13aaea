use std::time::Instant;

use handpoint_input::{
    ClickGesture, ClickGestureConfig, CoordinateMapper, FeatureExtractor, Frame, GestureEvent,
    GestureState, ScreenMetrics,
};
use log::{trace, warn};

use crate::CursorCommand;

/// The per frame part of the session: maps landmarks, extracts the features and runs the click
/// gesture.
///
/// Runs in the producer context. Everything it decides is forwarded to the presentation context as
/// [`CursorCommand`]s.
#[derive(Debug)]
pub struct GesturePipeline {
    screen: ScreenMetrics,
    extractor: FeatureExtractor,
    gesture: ClickGesture,
}

impl GesturePipeline {
    pub fn new(
        screen: ScreenMetrics,
        extractor: FeatureExtractor,
        gesture: ClickGestureConfig,
    ) -> Self {
        Self {
            screen,
            extractor,
            gesture: ClickGesture::new(gesture),
        }
    }

    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    pub fn process(&mut self, frame: &Frame) -> Vec<CursorCommand> {
        let Some(hand) = frame.primary_hand() else {
            // Detail: The gesture state persists over detection gaps, only the animation is
            // cancelled.
            trace!("No hand detected");
            return vec![CursorCommand::Interrupt];
        };

        let Some(mapper) = CoordinateMapper::new(frame.image_size, &self.screen) else {
            warn!(
                "Frame skipped, can't map image size {:?} to the screen",
                frame.image_size
            );
            return Vec::new();
        };

        let features = match self.extractor.extract(hand, &mapper) {
            Ok(features) => features,
            Err(e) => {
                trace!("Frame skipped: {e}");
                return Vec::new();
            }
        };

        let mut commands = vec![CursorCommand::MoveTo(features.target)];
        match self.gesture.evaluate(&features, frame.timestamp) {
            Some(GestureEvent::ClickRequested(target)) => {
                commands.push(CursorCommand::Click(target))
            }
            Some(GestureEvent::Interrupt) => commands.push(CursorCommand::Interrupt),
            None => {}
        }
        commands
    }

    /// Feeds back a completed click animation.
    pub fn click_completed(&mut self, at: Instant) {
        self.gesture.click_completed(at);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use handpoint_geometry::{Point, Size, SizeI};
    use handpoint_input::{INDEX_DIP, INDEX_TIP, LANDMARK_COUNT, Landmark, THUMB_IP, THUMB_TIP};

    use super::*;

    fn pipeline() -> GesturePipeline {
        GesturePipeline::new(
            ScreenMetrics::new(Size::new(1080.0, 2400.0), 0.0),
            FeatureExtractor::default(),
            ClickGestureConfig::default(),
        )
    }

    /// A hand with the thumb and index finger segments set up.
    fn hand(thumb: [(f64, f64); 2], index: [(f64, f64); 2]) -> Vec<Landmark> {
        let mut landmarks = vec![Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
        landmarks[THUMB_IP] = thumb[0].into();
        landmarks[THUMB_TIP] = thumb[1].into();
        landmarks[INDEX_DIP] = index[0].into();
        landmarks[INDEX_TIP] = index[1].into();
        landmarks
    }

    /// Thumb tip pointing down, index finger tip pointing right: rotated apart by 90° in the
    /// click orientation.
    fn click_pose() -> Vec<Landmark> {
        hand([(0.5, 0.45), (0.5, 0.5)], [(0.5, 0.5), (0.55, 0.5)])
    }

    /// The same segments, but both pointing right.
    fn open_pose() -> Vec<Landmark> {
        hand([(0.45, 0.5), (0.5, 0.5)], [(0.5, 0.45), (0.55, 0.45)])
    }

    fn frame(hand: Vec<Landmark>, timestamp: Instant) -> Frame {
        Frame::new(vec![hand], SizeI::new(480, 640), timestamp)
    }

    #[test]
    fn click_pose_moves_and_clicks() {
        let mut pipeline = pipeline();
        let commands = pipeline.process(&frame(click_pose(), Instant::now()));
        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[0], CursorCommand::MoveTo(_)));
        assert!(matches!(commands[1], CursorCommand::Click(_)));
        assert_eq!(pipeline.gesture_state(), GestureState::Armed);
    }

    #[test]
    fn open_pose_moves_and_interrupts() {
        let mut pipeline = pipeline();
        let commands = pipeline.process(&frame(open_pose(), Instant::now()));
        assert!(matches!(
            commands.as_slice(),
            [CursorCommand::MoveTo(_), CursorCommand::Interrupt]
        ));
    }

    #[test]
    fn no_hand_interrupts_but_keeps_the_gesture_state() {
        let mut pipeline = pipeline();
        let now = Instant::now();
        pipeline.process(&frame(click_pose(), now));

        let commands = pipeline.process(&Frame::empty(SizeI::new(480, 640), now));
        assert_eq!(commands, vec![CursorCommand::Interrupt]);
        assert_eq!(pipeline.gesture_state(), GestureState::Armed);
    }

    #[test]
    fn incomplete_hands_are_skipped() {
        let mut pipeline = pipeline();
        let hand = vec![Landmark::new(0.5, 0.5, 0.0); 5];
        assert!(pipeline.process(&frame(hand, Instant::now())).is_empty());
    }

    #[test]
    fn degenerate_segments_are_skipped() {
        let mut pipeline = pipeline();
        let hand = hand([(0.5, 0.5), (0.5, 0.5)], [(0.5, 0.5), (0.55, 0.5)]);
        assert!(pipeline.process(&frame(hand, Instant::now())).is_empty());
        assert_eq!(pipeline.gesture_state(), GestureState::Idle);
    }

    #[test]
    fn target_is_the_expanded_pinch_midpoint() {
        let mut pipeline = pipeline();
        let commands = pipeline.process(&frame(click_pose(), Instant::now()));
        let CursorCommand::MoveTo(target) = commands[0] else {
            panic!("Expected a move first");
        };
        // Midpoint of the tips (0.5, 0.5) and (0.55, 0.5), expanded by 1.6 around the center,
        // scaled by 3.75 to cover the screen.
        let expected = Point::new(0.54 * 480.0 * 3.75, 0.5 * 640.0 * 3.75);
        approx::assert_relative_eq!(target.x, expected.x, epsilon = 1e-9);
        approx::assert_relative_eq!(target.y, expected.y, epsilon = 1e-9);
    }

    #[test]
    fn cooldown_runs_from_the_request() {
        let mut pipeline = pipeline();
        let start = Instant::now();
        pipeline.process(&frame(click_pose(), start));
        pipeline.click_completed(start + Duration::from_millis(500));
        assert_eq!(pipeline.gesture_state(), GestureState::Cooldown);

        let commands = pipeline.process(&frame(click_pose(), start + Duration::from_millis(900)));
        assert!(matches!(commands.as_slice(), [CursorCommand::MoveTo(_)]));

        let commands =
            pipeline.process(&frame(click_pose(), start + Duration::from_millis(1000)));
        assert!(matches!(
            commands.as_slice(),
            [CursorCommand::MoveTo(_), CursorCommand::Click(_)]
        ));
    }
}
