//! Runtime configuration for one mounted surface.
//!
//! Every field defaults to the matching value in [`crate::constants`]; hosts
//! override a handful of them at mount time and the result is checked once
//! with [`BallConfig::validate`].

use crate::constants::*;
use crate::error::ConfigError;

/// Exponential smoothing rates, in 1/s.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DampingRates {
    pub pointer: f32,
    pub reveal: f32,
    pub pose_idle: f32,
    pub pose_transition: f32,
}

impl Default for DampingRates {
    fn default() -> Self {
        Self {
            pointer: POINTER_DAMPING,
            reveal: REVEAL_DAMPING,
            pose_idle: POSE_DAMPING_IDLE,
            pose_transition: POSE_DAMPING_TRANSITION,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BallConfig {
    pub full_duration_ms: f64,
    pub reduced_duration_ms: f64,
    pub cue_progress: f32,
    pub max_device_pixel_ratio: f64,
    pub glyph_texture_px: u32,
    pub prompt_texture_px: u32,
    pub max_prompt_lines: usize,
    pub visibility_epsilon: f32,
    pub max_frame_delta_sec: f32,
    pub damping: DampingRates,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            full_duration_ms: FULL_TRANSITION_MS,
            reduced_duration_ms: REDUCED_TRANSITION_MS,
            cue_progress: REVEAL_CUE_PROGRESS,
            max_device_pixel_ratio: MAX_DEVICE_PIXEL_RATIO,
            glyph_texture_px: GLYPH_TEXTURE_PX,
            prompt_texture_px: PROMPT_TEXTURE_PX,
            max_prompt_lines: MAX_PROMPT_LINES,
            visibility_epsilon: VISIBILITY_EPSILON,
            max_frame_delta_sec: MAX_FRAME_DELTA_SEC,
            damping: DampingRates::default(),
        }
    }
}

impl BallConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_duration("full_duration_ms", self.full_duration_ms)?;
        check_duration("reduced_duration_ms", self.reduced_duration_ms)?;
        if !(0.0..=1.0).contains(&self.cue_progress) {
            return Err(ConfigError::CueProgress(self.cue_progress));
        }
        if !(self.max_device_pixel_ratio > 0.0) {
            return Err(ConfigError::PixelRatio(self.max_device_pixel_ratio));
        }
        if self.glyph_texture_px == 0 {
            return Err(ConfigError::TextureSize { field: "glyph" });
        }
        if self.prompt_texture_px == 0 {
            return Err(ConfigError::TextureSize { field: "prompt" });
        }
        if self.max_prompt_lines == 0 {
            return Err(ConfigError::PromptLines);
        }
        if !(self.visibility_epsilon > 0.0 && self.visibility_epsilon < 0.5) {
            return Err(ConfigError::VisibilityEpsilon(self.visibility_epsilon));
        }
        check_rate("max_frame_delta_sec", self.max_frame_delta_sec)?;
        check_rate("damping.pointer", self.damping.pointer)?;
        check_rate("damping.reveal", self.damping.reveal)?;
        check_rate("damping.pose_idle", self.damping.pose_idle)?;
        check_rate("damping.pose_transition", self.damping.pose_transition)?;
        Ok(())
    }

    /// Duration for a transition request, falling back to the configured
    /// default for its motion kind. Non-finite or tiny values are clamped.
    pub fn resolve_duration_ms(&self, reduced_motion: bool, requested: Option<f64>) -> f64 {
        let fallback = if reduced_motion {
            self.reduced_duration_ms
        } else {
            self.full_duration_ms
        };
        match requested {
            Some(ms) if ms.is_finite() => ms.max(MIN_TRANSITION_MS),
            _ => fallback,
        }
    }
}

fn check_duration(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Duration { field, value })
    }
}

fn check_rate(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Rate { field, value })
    }
}
