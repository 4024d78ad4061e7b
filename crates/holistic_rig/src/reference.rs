use glam::Vec3;
use tracing::debug;

use crate::geometry::midpoint;
use crate::landmark::{pose, LandmarkFrame};

/// Body points the tracker does not measure directly.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReferencePoints {
    pub hip_center: Vec3,
    pub shoulder_center: Vec3,
    pub middle_torso_center: Vec3,
    pub upper_torso_center: Vec3,
    pub lower_torso_center: Vec3,
    pub head_center: Vec3,
}

impl ReferencePoints {
    /// Direction from the upper torso to the shoulder line.
    pub fn head_direction(&self) -> Vec3 {
        self.shoulder_center - self.upper_torso_center
    }
}

/// Derives [`ReferencePoints`] from a normalized pose frame.
#[derive(Debug, Clone)]
pub struct ReferenceSynthesizer {
    head_offset: f32,
    neck_direction: Vec3,
}

impl ReferenceSynthesizer {
    pub fn new(head_offset: f32) -> Self {
        Self {
            head_offset,
            neck_direction: Vec3::Y,
        }
    }

    pub fn synthesize(&mut self, frame: &LandmarkFrame) -> ReferencePoints {
        let hip_center = midpoint(
            frame.position(pose::LEFT_HIP),
            frame.position(pose::RIGHT_HIP),
        );
        let shoulder_center = midpoint(
            frame.position(pose::LEFT_SHOULDER),
            frame.position(pose::RIGHT_SHOULDER),
        );
        let middle_torso_center = midpoint(hip_center, shoulder_center);
        let upper_torso_center = midpoint(middle_torso_center, shoulder_center);
        let lower_torso_center = midpoint(middle_torso_center, hip_center);

        match (upper_torso_center - middle_torso_center).try_normalize() {
            Some(direction) => self.neck_direction = direction,
            None => debug!("torso has no length, reusing neck direction {}", self.neck_direction),
        }
        let head_center = upper_torso_center + self.neck_direction * self.head_offset;

        ReferencePoints {
            hip_center,
            shoulder_center,
            middle_torso_center,
            upper_torso_center,
            lower_torso_center,
            head_center,
        }
    }
}
