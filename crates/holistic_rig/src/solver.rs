use glam::{Quat, Vec3};
use tracing::debug;

use crate::error::RigError;
use crate::geometry::{look_rotation, palm_normal, yaw_rotation};
use crate::joints::{
    FINGER_CHAINS, HAND_SLOTS, Orientation, POSE_CHAINS, POSE_SLOTS, PoseChain, PosePoint,
    UpHint, hand_slot_name, pose_slot_name,
};
use crate::landmark::{hand, Hand, LandmarkFrame, Stream};
use crate::reference::ReferencePoints;
use crate::rig::{RigGroup, RigTarget};

/// A rotated joint together with the last rotation that solved cleanly.
#[derive(Debug, Clone)]
struct OrientedJoint<H> {
    name: &'static str,
    handle: H,
    rotation: Option<Quat>,
}

impl<H: Copy> OrientedJoint<H> {
    fn new(name: &'static str, handle: H) -> Self {
        Self {
            name,
            handle,
            rotation: None,
        }
    }

    /// Writes `solved`, or the previous rotation when the solve degenerated.
    fn write<R: RigTarget<Handle=H>>(
        &mut self,
        rig: &mut R,
        solved: Option<Quat>,
    ) -> Result<(), RigError> {
        match solved.filter(|q| q.is_finite()) {
            Some(rotation) => self.rotation = Some(rotation),
            None => debug!("degenerate orientation for {}, keeping previous rotation", self.name),
        }

        if let Some(rotation) = self.rotation {
            rig.set_local_rotation(self.handle, rotation)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct SolvedChain<H> {
    chain: PoseChain,
    joint: OrientedJoint<H>,
}

/// Places and orients the body constraint slots.
#[derive(Debug, Clone)]
pub struct PoseSolver<H> {
    slots: Vec<(PosePoint, H)>,
    chains: Vec<SolvedChain<H>>,
}

impl<H: Copy> PoseSolver<H> {
    pub fn new<R: RigTarget<Handle=H>>(rig: &R) -> Result<Self, RigError> {
        let slots = POSE_SLOTS.iter()
            .map(|&(point, name)| Ok((point, rig.joint(RigGroup::Pose, name)?)))
            .collect::<Result<Vec<_>, RigError>>()?;

        let chains = POSE_CHAINS.iter()
            .map(|&chain| {
                let name = pose_slot_name(chain.joint)
                    .ok_or_else(|| RigError::missing_joint(RigGroup::Pose, format!("{:?}", chain.joint)))?;
                Ok(SolvedChain {
                    chain,
                    joint: OrientedJoint::new(name, rig.joint(RigGroup::Pose, name)?),
                })
            })
            .collect::<Result<Vec<_>, RigError>>()?;

        Ok(Self { slots, chains })
    }

    pub fn apply<R: RigTarget<Handle=H>>(
        &mut self,
        rig: &mut R,
        frame: &LandmarkFrame,
        points: &ReferencePoints,
    ) -> Result<(), RigError> {
        debug_assert_eq!(frame.stream(), Stream::Pose);

        for &(point, handle) in &self.slots {
            rig.set_local_position(handle, point.resolve(frame, points))?;
        }

        for solved in &mut self.chains {
            let rotation = orient(solved.chain, frame, points);
            solved.joint.write(rig, rotation)?;
        }

        Ok(())
    }

    /// Last rotation that solved cleanly for the slot named `name`.
    pub fn rotation(&self, name: &str) -> Option<Quat> {
        self.chains.iter()
            .find(|c| c.joint.name == name)
            .and_then(|c| c.joint.rotation)
    }

    pub fn handle(&self, point: PosePoint) -> Option<H> {
        self.slots.iter()
            .find(|(p, _)| *p == point)
            .map(|(_, handle)| *handle)
    }
}

fn orient(chain: PoseChain, frame: &LandmarkFrame, points: &ReferencePoints) -> Option<Quat> {
    let origin = chain.joint.resolve(frame, points);
    let up_hint = |up: UpHint| match up {
        UpHint::World => Vec3::Y,
        UpHint::HeadDirection => points.head_direction(),
        UpHint::Toward(point) => point.resolve(frame, points) - origin,
    };

    match chain.orientation {
        Orientation::LookAt { target, up } => {
            look_rotation(target.resolve(frame, points) - origin, up_hint(up))
        }
        Orientation::LookAlong { from, to, up } => {
            let forward = to.resolve(frame, points) - from.resolve(frame, points);
            look_rotation(forward, up_hint(up))
        }
        Orientation::Yaw { from, to } => {
            yaw_rotation(to.resolve(frame, points) - from.resolve(frame, points))
        }
    }
}

/// Places and orients one hand's constraint slots, then anchors the hand to
/// the body's wrist.
#[derive(Debug, Clone)]
pub struct HandSolver<H> {
    root: H,
    anchor: H,
    slots: Vec<(usize, H)>,
    wrist: OrientedJoint<H>,
    fingers: Vec<(usize, usize, OrientedJoint<H>)>,
}

impl<H: Copy> HandSolver<H> {
    pub fn new<R: RigTarget<Handle=H>>(rig: &R, side: Hand) -> Result<Self, RigError> {
        let group = match side {
            Hand::Left => RigGroup::LeftHand,
            Hand::Right => RigGroup::RightHand,
        };
        let anchor_name = pose_slot_name(PosePoint::Landmark(side.pose_wrist()))
            .ok_or_else(|| RigError::missing_joint(RigGroup::Pose, "wrist"))?;

        let slots = HAND_SLOTS.iter()
            .map(|&(index, name)| Ok((index, rig.joint(group, name)?)))
            .collect::<Result<Vec<_>, RigError>>()?;

        let fingers = FINGER_CHAINS.iter()
            .map(|&(joint, child)| {
                let name = hand_slot_name(joint)
                    .ok_or_else(|| RigError::missing_joint(group, joint.to_string()))?;
                Ok((joint, child, OrientedJoint::new(name, rig.joint(group, name)?)))
            })
            .collect::<Result<Vec<_>, RigError>>()?;

        Ok(Self {
            root: rig.root(group)?,
            anchor: rig.joint(RigGroup::Pose, anchor_name)?,
            slots,
            wrist: OrientedJoint::new("wrist", rig.joint(group, "wrist")?),
            fingers,
        })
    }

    /// Solves the hand. The pose must already be placed this tick, since the
    /// hand root follows the body wrist.
    pub fn apply<R: RigTarget<Handle=H>>(
        &mut self,
        rig: &mut R,
        frame: &LandmarkFrame,
    ) -> Result<(), RigError> {
        for &(index, handle) in &self.slots {
            rig.set_local_position(handle, frame.position(index))?;
        }

        for (joint, child, oriented) in &mut self.fingers {
            let forward = frame.position(*child) - frame.position(*joint);
            oriented.write(rig, look_rotation(forward, Vec3::Y))?;
        }

        self.wrist.write(rig, wrist_rotation(frame))?;

        let body_wrist = rig.world_position(self.anchor)?;
        rig.set_local_position(self.root, body_wrist - frame.position(hand::WRIST))?;
        Ok(())
    }

    pub fn wrist_rotation(&self) -> Option<Quat> {
        self.wrist.rotation
    }
}

/// Orientation of the hand root from the spread of thumb, index and pinky.
pub fn wrist_rotation(frame: &LandmarkFrame) -> Option<Quat> {
    let wrist = frame.position(hand::WRIST);
    let to_thumb = (frame.position(hand::THUMB_CMC) - wrist).try_normalize()?;
    let to_index = (frame.position(hand::INDEX_FINGER_MCP) - wrist).try_normalize()?;
    let to_pinky = (frame.position(hand::PINKY_MCP) - wrist).try_normalize()?;
    let normal = palm_normal(to_thumb, to_index, to_pinky)?;
    look_rotation(to_index, normal)
}
