//! Declarative joint tables: which landmark drives which slot, and how each
//! oriented slot picks its rotation.

use glam::Vec3;

use crate::landmark::{hand, pose, LandmarkFrame};
use crate::reference::ReferencePoints;

/// A point of the retargeted body, measured or synthesized.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PosePoint {
    Landmark(usize),
    HipCenter,
    ShoulderCenter,
    MiddleTorsoCenter,
    UpperTorsoCenter,
    LowerTorsoCenter,
    HeadCenter,
}

impl PosePoint {
    pub fn resolve(self, frame: &LandmarkFrame, points: &ReferencePoints) -> Vec3 {
        match self {
            PosePoint::Landmark(index) => frame.position(index),
            PosePoint::HipCenter => points.hip_center,
            PosePoint::ShoulderCenter => points.shoulder_center,
            PosePoint::MiddleTorsoCenter => points.middle_torso_center,
            PosePoint::UpperTorsoCenter => points.upper_torso_center,
            PosePoint::LowerTorsoCenter => points.lower_torso_center,
            PosePoint::HeadCenter => points.head_center,
        }
    }
}

/// Second direction used to fix the roll of a look rotation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UpHint {
    World,
    /// From the upper torso center to the shoulder center.
    HeadDirection,
    /// From the oriented joint toward another point.
    Toward(PosePoint),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Orientation {
    /// Forward axis points from the joint to `target`.
    LookAt { target: PosePoint, up: UpHint },
    /// Forward axis points from `from` to `to`.
    LookAlong { from: PosePoint, to: PosePoint, up: UpHint },
    /// Heading of `to - from` around the vertical axis only.
    Yaw { from: PosePoint, to: PosePoint },
}

#[derive(Clone, Copy, Debug)]
pub struct PoseChain {
    pub joint: PosePoint,
    pub orientation: Orientation,
}

const fn lm(index: usize) -> PosePoint {
    PosePoint::Landmark(index)
}

pub static POSE_SLOTS: &[(PosePoint, &str)] = &[
    (lm(pose::NOSE), "nose"),
    (lm(pose::LEFT_SHOULDER), "left_shoulder"),
    (lm(pose::RIGHT_SHOULDER), "right_shoulder"),
    (lm(pose::LEFT_ELBOW), "left_elbow"),
    (lm(pose::RIGHT_ELBOW), "right_elbow"),
    (lm(pose::LEFT_WRIST), "left_wrist"),
    (lm(pose::RIGHT_WRIST), "right_wrist"),
    (lm(pose::LEFT_PINKY), "left_pinky"),
    (lm(pose::RIGHT_PINKY), "right_pinky"),
    (lm(pose::LEFT_INDEX), "left_index"),
    (lm(pose::RIGHT_INDEX), "right_index"),
    (lm(pose::LEFT_THUMB), "left_thumb"),
    (lm(pose::RIGHT_THUMB), "right_thumb"),
    (lm(pose::LEFT_HIP), "left_hip"),
    (lm(pose::RIGHT_HIP), "right_hip"),
    (lm(pose::LEFT_KNEE), "left_knee"),
    (lm(pose::RIGHT_KNEE), "right_knee"),
    (lm(pose::LEFT_ANKLE), "left_ankle"),
    (lm(pose::RIGHT_ANKLE), "right_ankle"),
    (lm(pose::LEFT_HEEL), "left_heel"),
    (lm(pose::RIGHT_HEEL), "right_heel"),
    (lm(pose::LEFT_FOOT_INDEX), "left_foot_index"),
    (lm(pose::RIGHT_FOOT_INDEX), "right_foot_index"),
    (PosePoint::HipCenter, "hip_center"),
    (PosePoint::ShoulderCenter, "shoulder_center"),
    (PosePoint::MiddleTorsoCenter, "middle_torso_center"),
    (PosePoint::UpperTorsoCenter, "upper_torso_center"),
    (PosePoint::LowerTorsoCenter, "lower_torso_center"),
    (PosePoint::HeadCenter, "head_center"),
];

pub static POSE_CHAINS: &[PoseChain] = &[
    PoseChain {
        joint: PosePoint::LowerTorsoCenter,
        orientation: Orientation::LookAt {
            target: PosePoint::MiddleTorsoCenter,
            up: UpHint::HeadDirection,
        },
    },
    PoseChain {
        joint: PosePoint::MiddleTorsoCenter,
        orientation: Orientation::LookAt {
            target: PosePoint::UpperTorsoCenter,
            up: UpHint::HeadDirection,
        },
    },
    PoseChain {
        joint: PosePoint::UpperTorsoCenter,
        orientation: Orientation::LookAt {
            target: PosePoint::ShoulderCenter,
            up: UpHint::HeadDirection,
        },
    },
    PoseChain {
        joint: PosePoint::ShoulderCenter,
        orientation: Orientation::LookAlong {
            from: lm(pose::RIGHT_SHOULDER),
            to: lm(pose::LEFT_SHOULDER),
            up: UpHint::HeadDirection,
        },
    },
    PoseChain {
        joint: PosePoint::HipCenter,
        orientation: Orientation::Yaw {
            from: lm(pose::RIGHT_HIP),
            to: lm(pose::LEFT_HIP),
        },
    },
    PoseChain {
        joint: PosePoint::HeadCenter,
        orientation: Orientation::LookAt {
            target: lm(pose::NOSE),
            up: UpHint::World,
        },
    },
    PoseChain {
        joint: lm(pose::LEFT_SHOULDER),
        orientation: Orientation::LookAt { target: lm(pose::LEFT_ELBOW), up: UpHint::World },
    },
    PoseChain {
        joint: lm(pose::RIGHT_SHOULDER),
        orientation: Orientation::LookAt { target: lm(pose::RIGHT_ELBOW), up: UpHint::World },
    },
    PoseChain {
        joint: lm(pose::LEFT_ELBOW),
        orientation: Orientation::LookAt { target: lm(pose::LEFT_WRIST), up: UpHint::World },
    },
    PoseChain {
        joint: lm(pose::RIGHT_ELBOW),
        orientation: Orientation::LookAt { target: lm(pose::RIGHT_WRIST), up: UpHint::World },
    },
    PoseChain {
        joint: lm(pose::LEFT_WRIST),
        orientation: Orientation::LookAt {
            target: lm(pose::LEFT_INDEX),
            up: UpHint::Toward(lm(pose::LEFT_PINKY)),
        },
    },
    PoseChain {
        joint: lm(pose::RIGHT_WRIST),
        orientation: Orientation::LookAt {
            target: lm(pose::RIGHT_INDEX),
            up: UpHint::Toward(lm(pose::RIGHT_PINKY)),
        },
    },
];

pub static HAND_SLOTS: &[(usize, &str)] = &[
    (hand::WRIST, "wrist"),
    (hand::THUMB_CMC, "thumb_cmc"),
    (hand::THUMB_MCP, "thumb_mcp"),
    (hand::THUMB_IP, "thumb_ip"),
    (hand::THUMB_TIP, "thumb_tip"),
    (hand::INDEX_FINGER_MCP, "index_finger_mcp"),
    (hand::INDEX_FINGER_PIP, "index_finger_pip"),
    (hand::INDEX_FINGER_DIP, "index_finger_dip"),
    (hand::INDEX_FINGER_TIP, "index_finger_tip"),
    (hand::MIDDLE_FINGER_MCP, "middle_finger_mcp"),
    (hand::MIDDLE_FINGER_PIP, "middle_finger_pip"),
    (hand::MIDDLE_FINGER_DIP, "middle_finger_dip"),
    (hand::MIDDLE_FINGER_TIP, "middle_finger_tip"),
    (hand::RING_FINGER_MCP, "ring_finger_mcp"),
    (hand::RING_FINGER_PIP, "ring_finger_pip"),
    (hand::RING_FINGER_DIP, "ring_finger_dip"),
    (hand::RING_FINGER_TIP, "ring_finger_tip"),
    (hand::PINKY_MCP, "pinky_mcp"),
    (hand::PINKY_PIP, "pinky_pip"),
    (hand::PINKY_DIP, "pinky_dip"),
    (hand::PINKY_TIP, "pinky_tip"),
];

/// Finger segments, each looking at its child segment.
pub static FINGER_CHAINS: &[(usize, usize)] = &[
    (hand::THUMB_CMC, hand::THUMB_MCP),
    (hand::THUMB_MCP, hand::THUMB_IP),
    (hand::THUMB_IP, hand::THUMB_TIP),
    (hand::INDEX_FINGER_MCP, hand::INDEX_FINGER_PIP),
    (hand::INDEX_FINGER_PIP, hand::INDEX_FINGER_DIP),
    (hand::INDEX_FINGER_DIP, hand::INDEX_FINGER_TIP),
    (hand::MIDDLE_FINGER_MCP, hand::MIDDLE_FINGER_PIP),
    (hand::MIDDLE_FINGER_PIP, hand::MIDDLE_FINGER_DIP),
    (hand::MIDDLE_FINGER_DIP, hand::MIDDLE_FINGER_TIP),
    (hand::RING_FINGER_MCP, hand::RING_FINGER_PIP),
    (hand::RING_FINGER_PIP, hand::RING_FINGER_DIP),
    (hand::RING_FINGER_DIP, hand::RING_FINGER_TIP),
    (hand::PINKY_MCP, hand::PINKY_PIP),
    (hand::PINKY_PIP, hand::PINKY_DIP),
    (hand::PINKY_DIP, hand::PINKY_TIP),
];

pub fn pose_slot_names() -> impl Iterator<Item=&'static str> {
    POSE_SLOTS.iter().map(|(_, name)| *name)
}

pub fn hand_slot_names() -> impl Iterator<Item=&'static str> {
    HAND_SLOTS.iter().map(|(_, name)| *name)
}

pub fn pose_slot_name(point: PosePoint) -> Option<&'static str> {
    POSE_SLOTS.iter()
        .find(|(p, _)| *p == point)
        .map(|(_, name)| *name)
}

pub fn hand_slot_name(index: usize) -> Option<&'static str> {
    HAND_SLOTS.iter()
        .find(|(i, _)| *i == index)
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_chain_joint_is_placed() {
        for chain in POSE_CHAINS {
            assert!(pose_slot_name(chain.joint).is_some(), "{:?} has no slot", chain.joint);
        }
        for (joint, child) in FINGER_CHAINS {
            assert!(hand_slot_name(*joint).is_some());
            assert!(hand_slot_name(*child).is_some());
        }
    }

    #[test]
    fn test_every_hand_landmark_has_a_slot() {
        assert_eq!(HAND_SLOTS.len(), 21);
        for index in 0..21 {
            assert!(hand_slot_name(index).is_some());
        }
    }

    #[test]
    fn test_five_fingers_three_segments() {
        assert_eq!(FINGER_CHAINS.len(), 15);
    }
}
