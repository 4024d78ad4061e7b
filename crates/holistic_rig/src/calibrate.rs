use tracing::debug;

use crate::config::{RetargetConfig, ScaleMode};
use crate::error::RigError;
use crate::geometry::EPSILON;
use crate::rig::{RigGroup, RigTarget};

/// Matches the model's size to the tracked subject using shoulder width.
#[derive(Debug, Clone)]
pub struct ScaleCalibrator<H> {
    mode: ScaleMode,
    model_root: H,
    model_length: f32,
    base_scale: f32,
    last_factor: Option<f32>,
}

impl<H: Copy> ScaleCalibrator<H> {
    pub fn new<R: RigTarget<Handle=H>>(rig: &R, config: &RetargetConfig) -> Result<Self, RigError> {
        let model_root = rig.root(RigGroup::Model)?;
        let left = rig.joint(RigGroup::Model, &config.model_left_shoulder)?;
        let right = rig.joint(RigGroup::Model, &config.model_right_shoulder)?;
        Ok(Self {
            mode: config.scale_mode,
            model_root,
            model_length: rig.bind_position(left)?.distance(rig.bind_position(right)?),
            base_scale: rig.uniform_scale(model_root)?,
            last_factor: None,
        })
    }

    /// Rescales the model from the retargeted shoulder slots against the
    /// shoulder width captured at construction.
    ///
    /// Returns the applied ratio, or `None` when either length is unusable
    /// and the scale was left alone.
    pub fn apply<R: RigTarget<Handle=H>>(
        &mut self,
        rig: &mut R,
        left_shoulder: H,
        right_shoulder: H,
    ) -> Result<Option<f32>, RigError> {
        let tracked = rig.world_position(left_shoulder)?
            .distance(rig.world_position(right_shoulder)?);
        let model = self.model_length;

        let factor = tracked / model;
        if model < EPSILON || tracked < EPSILON || !factor.is_finite() {
            debug!("degenerate shoulder lengths tracked={} model={}, keeping scale", tracked, model);
            return Ok(None);
        }

        let scale = match self.mode {
            ScaleMode::Compounding => rig.uniform_scale(self.model_root)? * factor,
            ScaleMode::Absolute => self.base_scale * factor,
        };
        rig.set_uniform_scale(self.model_root, scale)?;
        self.last_factor = Some(factor);
        Ok(Some(factor))
    }

    pub fn last_factor(&self) -> Option<f32> {
        self.last_factor
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::rig::memory::MemoryRig;

    use super::*;

    fn setup(mode: ScaleMode, model_width: f32, tracked_width: f32) -> (MemoryRig, ScaleCalibrator<usize>, usize, usize) {
        let config = RetargetConfig {
            scale_mode: mode,
            ..Default::default()
        };
        let mut rig = MemoryRig::complete(&config, model_width);
        let left = rig.joint(RigGroup::Pose, "left_shoulder").unwrap();
        let right = rig.joint(RigGroup::Pose, "right_shoulder").unwrap();
        rig.joints[left].position = Vec3::new(tracked_width * 0.5, 0.5, 0.0);
        rig.joints[right].position = Vec3::new(-tracked_width * 0.5, 0.5, 0.0);
        let calibrator = ScaleCalibrator::new(&rig, &config).unwrap();
        (rig, calibrator, left, right)
    }

    #[test]
    fn test_equal_lengths_leave_scale_unchanged() {
        let (mut rig, mut calibrator, left, right) = setup(ScaleMode::Compounding, 0.3, 0.3);
        let factor = calibrator.apply(&mut rig, left, right).unwrap().unwrap();
        assert!((factor - 1.0).abs() < 1e-6);
        assert!((rig.get(RigGroup::Model, "").scale - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_compounding_multiplies_every_tick() {
        let (mut rig, mut calibrator, left, right) = setup(ScaleMode::Compounding, 0.4, 0.2);
        calibrator.apply(&mut rig, left, right).unwrap();
        calibrator.apply(&mut rig, left, right).unwrap();
        assert!((rig.get(RigGroup::Model, "").scale - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_absolute_mode_is_stable() {
        let (mut rig, mut calibrator, left, right) = setup(ScaleMode::Absolute, 0.4, 0.2);
        calibrator.apply(&mut rig, left, right).unwrap();
        calibrator.apply(&mut rig, left, right).unwrap();
        assert!((rig.get(RigGroup::Model, "").scale - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_coincident_shoulders_keep_scale() {
        let (mut rig, mut calibrator, left, right) = setup(ScaleMode::Compounding, 0.4, 0.0);
        rig.get_mut(RigGroup::Model, "").scale = 2.0;
        assert_eq!(calibrator.apply(&mut rig, left, right).unwrap(), None);
        assert_eq!(rig.get(RigGroup::Model, "").scale, 2.0);
        assert_eq!(calibrator.last_factor(), None);
    }

    #[test]
    fn test_model_length_is_captured_once() {
        let (mut rig, mut calibrator, left, right) = setup(ScaleMode::Absolute, 0.4, 0.2);
        let config = RetargetConfig::default();
        rig.get_mut(RigGroup::Model, &config.model_left_shoulder).position.x = 1.0;
        rig.get_mut(RigGroup::Model, &config.model_right_shoulder).position.x = -1.0;

        let factor = calibrator.apply(&mut rig, left, right).unwrap().unwrap();
        assert!((factor - 0.5).abs() < 1e-6);
        assert!((rig.get(RigGroup::Model, "").scale - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_model_keeps_scale() {
        let (mut rig, mut calibrator, left, right) = setup(ScaleMode::Compounding, 0.0, 0.3);
        assert_eq!(calibrator.apply(&mut rig, left, right).unwrap(), None);
        assert_eq!(rig.get(RigGroup::Model, "").scale, 1.0);
    }
}
