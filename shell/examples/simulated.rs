//! Runs a headless gesture session against a simulated hand.
//!
//! The hand circles around the image center and pinches once every three seconds. Taps are logged
//! instead of dispatched. Run with `RUST_LOG=info` and optionally pass a TOML configuration.

use std::{env, f64::consts::TAU, time::Duration};

use anyhow::Result;
use log::{info, warn};
use tokio::{task::JoinHandle, time};

use handpoint_geometry::{Point, SizeI};
use handpoint_input::{Frame, INDEX_DIP, INDEX_TIP, LANDMARK_COUNT, Landmark, THUMB_IP, THUMB_TIP};
use handpoint_shell::{GestureConfig, GestureSession, LandmarkSource, SourceSink, TapDispatcher};

const CAMERA_IMAGE: SizeI = SizeI::new(480, 640);
const CAMERA_FRAME_INTERVAL: Duration = Duration::from_millis(33);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => GestureConfig::load(path)?,
        None => GestureConfig::default(),
    };

    let session = GestureSession::new(config, SimulatedHand::default(), LoggingDispatcher)?;
    if let Some(mut errors) = session.take_errors() {
        tokio::spawn(async move {
            while let Some(error) = errors.recv().await {
                warn!("{error}");
            }
        });
    }

    session.start(None)?;
    time::sleep(Duration::from_secs(10)).await;
    session.stop();
    Ok(())
}

#[derive(Default)]
struct SimulatedHand {
    camera: Option<JoinHandle<()>>,
}

impl LandmarkSource for SimulatedHand {
    fn connect(&mut self, sink: SourceSink) -> Result<()> {
        self.camera = Some(tokio::spawn(async move {
            let mut ticker = time::interval(CAMERA_FRAME_INTERVAL);
            let start = time::Instant::now();
            loop {
                let instant = ticker.tick().await;
                let hand = hand_at((instant - start).as_secs_f64());
                let frame = Frame::new(vec![hand], CAMERA_IMAGE, instant.into_std());
                if !sink.frame(frame) {
                    return;
                }
            }
        }));
        Ok(())
    }

    fn disconnect(&mut self) {
        if let Some(camera) = self.camera.take() {
            camera.abort();
        }
    }
}

/// The simulated hand `t` seconds into the simulation.
fn hand_at(t: f64) -> Vec<Landmark> {
    let angle = t / 6.0 * TAU;
    let center = Point::new(0.5 + 0.2 * angle.cos(), 0.5 + 0.2 * angle.sin());
    let pinching = (1.0..1.6).contains(&(t % 3.0));

    let at = |dx: f64, dy: f64| Landmark::new(center.x + dx, center.y + dy, 0.0);
    let mut landmarks = vec![at(0.0, 0.1); LANDMARK_COUNT];
    // The thumb points down. While pinching, the index finger turns to the right.
    landmarks[THUMB_IP] = at(-0.02, -0.05);
    landmarks[THUMB_TIP] = at(-0.02, 0.0);
    landmarks[INDEX_DIP] = at(0.0, -0.05);
    landmarks[INDEX_TIP] = if pinching {
        at(0.05, -0.05)
    } else {
        at(0.0, 0.0)
    };
    landmarks
}

struct LoggingDispatcher;

impl TapDispatcher for LoggingDispatcher {
    fn dispatch_tap(&mut self, point: Point) -> Result<bool> {
        info!("Tap at ({:.0}, {:.0})", point.x, point.y);
        Ok(true)
    }
}
