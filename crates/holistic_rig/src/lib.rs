//! Landmark retargeting for humanoid rigs.
//!
//! Feed one [`TrackingInput`] per animation tick into a [`RetargetEngine`];
//! the engine writes joint positions, rotations and the model scale through
//! the host's [`RigTarget`].

pub mod cache;
pub mod calibrate;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod interpolate;
pub mod joints;
pub mod landmark;
pub mod normalize;
pub mod reference;
pub mod rig;
pub mod solver;

pub use config::{RetargetConfig, ScaleMode};
pub use engine::{RetargetEngine, TickOutcome, TrackingInput};
pub use error::{ConfigError, FrameError, RigError};
pub use landmark::{Hand, Landmark, LandmarkFrame, Stream};
pub use reference::ReferencePoints;
pub use rig::{RigGroup, RigTarget};
