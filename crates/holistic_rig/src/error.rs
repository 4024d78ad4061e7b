use std::borrow::Cow;

use thiserror::Error;

use crate::landmark::Stream;
use crate::rig::RigGroup;

/// An error raised by the rig collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RigError {
    #[error("rig has no joint slot {name:?} in group {group:?}")]
    MissingJointSlot {
        group: RigGroup,
        name: Cow<'static, str>,
    },
    #[error("rig has no root for group {0:?}")]
    MissingRoot(RigGroup),
    #[error("joint {0} no longer exists")]
    StaleHandle(String),
}

impl RigError {
    pub fn missing_joint(group: RigGroup, name: impl Into<Cow<'static, str>>) -> Self {
        Self::MissingJointSlot {
            group,
            name: name.into(),
        }
    }
}

/// An error raised when a landmark frame does not match its stream's shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("{stream:?} frame has {actual} landmarks, expected {expected}")]
    InvalidLength {
        stream: Stream,
        expected: usize,
        actual: usize,
    },
}

/// An error raised when loading a retargeting configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}
