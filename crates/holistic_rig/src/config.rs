use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::landmark::pose;

/// How the calibrated shoulder ratio is applied to the model root.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScaleMode {
    /// Multiply the current scale by the ratio every tick.
    #[default]
    Compounding,
    /// Set the scale to the initial scale times the ratio.
    Absolute,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetargetConfig {
    /// Blend weight of the newest frame against the previous one.
    #[serde(default = "default_interpolation_factor")]
    pub interpolation_factor: f32,
    /// Pose landmarks that are never blended.
    #[serde(default = "default_pinned_pose")]
    pub pinned_pose: Vec<usize>,
    /// Hand landmarks that are never blended.
    #[serde(default)]
    pub pinned_hand: Vec<usize>,
    /// Approximate neck length, from the upper torso to the head center.
    #[serde(default = "default_head_offset")]
    pub head_offset: f32,
    #[serde(default)]
    pub scale_mode: ScaleMode,
    /// Bone path of the model's left upper arm, below the model root.
    #[serde(default = "default_model_left_shoulder")]
    pub model_left_shoulder: String,
    /// Bone path of the model's right upper arm, below the model root.
    #[serde(default = "default_model_right_shoulder")]
    pub model_right_shoulder: String,
}

fn default_interpolation_factor() -> f32 { 0.5 }
fn default_pinned_pose() -> Vec<usize> { vec![pose::LEFT_SHOULDER, pose::RIGHT_SHOULDER] }
fn default_head_offset() -> f32 { 0.15 }
fn default_model_left_shoulder() -> String {
    "root/pelvis/spine_01/spine_02/spine_03/clavicle_l/upperarm_l".to_string()
}
fn default_model_right_shoulder() -> String {
    "root/pelvis/spine_01/spine_02/spine_03/clavicle_r/upperarm_r".to_string()
}

impl Default for RetargetConfig {
    fn default() -> Self {
        Self {
            interpolation_factor: default_interpolation_factor(),
            pinned_pose: default_pinned_pose(),
            pinned_hand: Vec::new(),
            head_offset: default_head_offset(),
            scale_mode: ScaleMode::default(),
            model_left_shoulder: default_model_left_shoulder(),
            model_right_shoulder: default_model_right_shoulder(),
        }
    }
}

impl RetargetConfig {
    pub fn from_slice(src: &[u8]) -> Result<Self, ConfigError> {
        let config = serde_json::from_slice::<Self>(src)?;
        Ok(config.sanitized())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read(path)?;
        Self::from_slice(&content)
    }

    /// Clamps values into the ranges the engine works with.
    pub fn sanitized(mut self) -> Self {
        self.interpolation_factor = if self.interpolation_factor.is_finite() {
            self.interpolation_factor.clamp(0.0, 1.0)
        } else {
            default_interpolation_factor()
        };
        if !self.head_offset.is_finite() {
            self.head_offset = default_head_offset();
        }
        self
    }
}
