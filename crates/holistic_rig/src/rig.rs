use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::RigError;

/// The independently rooted hierarchies the engine writes into or reads from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RigGroup {
    /// Constraint targets for the body.
    Pose,
    /// Constraint targets for the left hand, positioned in hand-local space.
    LeftHand,
    /// Constraint targets for the right hand, positioned in hand-local space.
    RightHand,
    /// The character model itself. Only read, except for its root scale.
    Model,
}

/// Access to the host's scene graph.
///
/// Joints are resolved by name once and addressed by handle afterwards.
/// Names under [`RigGroup::Model`] are `/`-separated paths below the model
/// root.
pub trait RigTarget {
    type Handle: Copy;

    fn root(&self, group: RigGroup) -> Result<Self::Handle, RigError>;

    fn joint(&self, group: RigGroup, name: &str) -> Result<Self::Handle, RigError>;

    fn set_local_position(&mut self, joint: Self::Handle, position: Vec3) -> Result<(), RigError>;

    fn set_local_rotation(&mut self, joint: Self::Handle, rotation: Quat) -> Result<(), RigError>;

    fn world_position(&self, joint: Self::Handle) -> Result<Vec3, RigError>;

    /// Position of a model bone relative to the model root, ignoring the
    /// root's own transform.
    fn bind_position(&self, joint: Self::Handle) -> Result<Vec3, RigError>;

    fn uniform_scale(&self, joint: Self::Handle) -> Result<f32, RigError>;

    fn set_uniform_scale(&mut self, joint: Self::Handle, scale: f32) -> Result<(), RigError>;
}
