//! Session configuration, loadable from TOML.

use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result, bail};
use handpoint_geometry::{Size, SizeI};
use handpoint_input::{
    ClickGestureConfig, DEFAULT_PINCH_EXPANSION, FeatureExtractor, ScreenMetrics,
};
use serde::{Deserialize, Serialize};

use crate::CursorConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GestureConfig {
    /// Degrees the thumb and index finger segments must be rotated apart to click.
    pub click_angle_threshold: f64,
    pub cooldown_ms: u64,
    pub move_animation_ms: u64,
    pub click_animation_ms: u64,
    pub baseline_radius: f64,
    pub click_shrink: f64,
    pub pinch_expansion: f64,
    /// The pacing of the presentation while animations are running.
    pub frame_interval_ms: u64,
    /// The screen assumed when the session runs without a render surface.
    pub fallback_screen: FallbackScreen,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct FallbackScreen {
    pub width: u32,
    pub height: u32,
    pub vertical_offset: u32,
}

impl Default for FallbackScreen {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 2400,
            vertical_offset: 0,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            click_angle_threshold: ClickGestureConfig::DEFAULT_ANGLE_THRESHOLD_DEGREES,
            cooldown_ms: ClickGestureConfig::DEFAULT_COOLDOWN.as_millis() as u64,
            move_animation_ms: CursorConfig::DEFAULT_MOVE_DURATION.as_millis() as u64,
            click_animation_ms: CursorConfig::DEFAULT_CLICK_DURATION.as_millis() as u64,
            baseline_radius: CursorConfig::DEFAULT_BASELINE_RADIUS,
            click_shrink: CursorConfig::DEFAULT_CLICK_SHRINK,
            pinch_expansion: DEFAULT_PINCH_EXPANSION,
            frame_interval_ms: 16,
            fallback_screen: FallbackScreen::default(),
        }
    }
}

impl GestureConfig {
    /// Parse and validate a TOML configuration. Missing keys take their defaults.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: GestureConfig =
            toml::from_str(toml).context("Failed to parse TOML gesture configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let toml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration {}", path.display()))?;
        Self::from_toml_str(&toml).with_context(|| format!("In {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=180.0).contains(&self.click_angle_threshold) {
            bail!(
                "click-angle-threshold must be within 0 and 180 degrees, but is {}",
                self.click_angle_threshold
            );
        }
        for (name, ms) in [
            ("move-animation-ms", self.move_animation_ms),
            ("click-animation-ms", self.click_animation_ms),
            ("frame-interval-ms", self.frame_interval_ms),
        ] {
            if ms == 0 {
                bail!("{name} must be positive");
            }
        }
        if self.baseline_radius.is_nan() || self.baseline_radius <= 0.0 {
            bail!(
                "baseline-radius must be positive, but is {}",
                self.baseline_radius
            );
        }
        if !(0.0..=self.baseline_radius).contains(&self.click_shrink) {
            bail!(
                "click-shrink must be within 0 and the baseline radius, but is {}",
                self.click_shrink
            );
        }
        if self.pinch_expansion.is_nan() || self.pinch_expansion <= 0.0 {
            bail!(
                "pinch-expansion must be positive, but is {}",
                self.pinch_expansion
            );
        }
        let screen = self.fallback_screen;
        if SizeI::new(screen.width, screen.height).is_empty() {
            bail!("fallback-screen must not be empty");
        }
        Ok(())
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    pub fn move_animation(&self) -> Duration {
        Duration::from_millis(self.move_animation_ms)
    }

    pub fn click_animation(&self) -> Duration {
        Duration::from_millis(self.click_animation_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn click_gesture(&self) -> ClickGestureConfig {
        ClickGestureConfig {
            angle_threshold_degrees: self.click_angle_threshold,
            cooldown: self.cooldown(),
        }
    }

    pub fn cursor(&self) -> CursorConfig {
        CursorConfig {
            move_duration: self.move_animation(),
            click_duration: self.click_animation(),
            baseline_radius: self.baseline_radius,
            click_shrink: self.click_shrink,
            ..CursorConfig::default()
        }
    }

    pub fn feature_extractor(&self) -> FeatureExtractor {
        FeatureExtractor::new(self.pinch_expansion)
    }

    pub fn fallback_metrics(&self) -> ScreenMetrics {
        let screen = self.fallback_screen;
        ScreenMetrics::new(
            Size::from(SizeI::new(screen.width, screen.height)),
            screen.vertical_offset as f64,
        )
    }
}
