use glam::Vec3;
use serde::{Deserialize, Serialize};

pub use holistic_api::Landmark;
use holistic_api::{HAND_LANDMARK_COUNT, POSE_LANDMARK_COUNT};

use crate::error::FrameError;

/// Landmark indices of the pose stream.
pub mod pose {
    pub const NOSE: usize = 0;
    pub const LEFT_EYE_INNER: usize = 1;
    pub const LEFT_EYE: usize = 2;
    pub const LEFT_EYE_OUTER: usize = 3;
    pub const RIGHT_EYE_INNER: usize = 4;
    pub const RIGHT_EYE: usize = 5;
    pub const RIGHT_EYE_OUTER: usize = 6;
    pub const LEFT_EAR: usize = 7;
    pub const RIGHT_EAR: usize = 8;
    pub const MOUTH_LEFT: usize = 9;
    pub const MOUTH_RIGHT: usize = 10;
    pub const LEFT_SHOULDER: usize = 11;
    pub const RIGHT_SHOULDER: usize = 12;
    pub const LEFT_ELBOW: usize = 13;
    pub const RIGHT_ELBOW: usize = 14;
    pub const LEFT_WRIST: usize = 15;
    pub const RIGHT_WRIST: usize = 16;
    pub const LEFT_PINKY: usize = 17;
    pub const RIGHT_PINKY: usize = 18;
    pub const LEFT_INDEX: usize = 19;
    pub const RIGHT_INDEX: usize = 20;
    pub const LEFT_THUMB: usize = 21;
    pub const RIGHT_THUMB: usize = 22;
    pub const LEFT_HIP: usize = 23;
    pub const RIGHT_HIP: usize = 24;
    pub const LEFT_KNEE: usize = 25;
    pub const RIGHT_KNEE: usize = 26;
    pub const LEFT_ANKLE: usize = 27;
    pub const RIGHT_ANKLE: usize = 28;
    pub const LEFT_HEEL: usize = 29;
    pub const RIGHT_HEEL: usize = 30;
    pub const LEFT_FOOT_INDEX: usize = 31;
    pub const RIGHT_FOOT_INDEX: usize = 32;
}

/// Landmark indices of a hand stream.
pub mod hand {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_MCP: usize = 5;
    pub const INDEX_FINGER_PIP: usize = 6;
    pub const INDEX_FINGER_DIP: usize = 7;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_PIP: usize = 10;
    pub const MIDDLE_FINGER_DIP: usize = 11;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_MCP: usize = 13;
    pub const RING_FINGER_PIP: usize = 14;
    pub const RING_FINGER_DIP: usize = 15;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stream {
    Pose,
    LeftHand,
    RightHand,
}

impl Stream {
    pub const ALL: [Stream; 3] = [Stream::Pose, Stream::LeftHand, Stream::RightHand];

    pub fn landmark_count(self) -> usize {
        match self {
            Stream::Pose => POSE_LANDMARK_COUNT,
            Stream::LeftHand | Stream::RightHand => HAND_LANDMARK_COUNT,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Stream::Pose => 0,
            Stream::LeftHand => 1,
            Stream::RightHand => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub const BOTH: [Hand; 2] = [Hand::Left, Hand::Right];

    pub fn stream(self) -> Stream {
        match self {
            Hand::Left => Stream::LeftHand,
            Hand::Right => Stream::RightHand,
        }
    }

    /// The pose landmark this hand hangs off.
    pub fn pose_wrist(self) -> usize {
        match self {
            Hand::Left => pose::LEFT_WRIST,
            Hand::Right => pose::RIGHT_WRIST,
        }
    }
}

/// A complete, fixed-order set of landmarks for one stream.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkFrame {
    stream: Stream,
    landmarks: Vec<Landmark>,
}

impl LandmarkFrame {
    pub fn new(stream: Stream, landmarks: Vec<Landmark>) -> Result<Self, FrameError> {
        let expected = stream.landmark_count();
        if landmarks.len() != expected {
            return Err(FrameError::InvalidLength {
                stream,
                expected,
                actual: landmarks.len(),
            });
        }
        Ok(Self { stream, landmarks })
    }

    pub fn from_positions(
        stream: Stream,
        positions: impl IntoIterator<Item=Vec3>,
    ) -> Result<Self, FrameError> {
        Self::new(stream, positions.into_iter().map(Landmark::new).collect())
    }

    /// A frame with every landmark at the origin.
    pub fn zeroed(stream: Stream) -> Self {
        Self {
            stream,
            landmarks: vec![Landmark::default(); stream.landmark_count()],
        }
    }

    pub fn stream(&self) -> Stream {
        self.stream
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn landmarks_mut(&mut self) -> &mut [Landmark] {
        &mut self.landmarks
    }

    pub fn position(&self, index: usize) -> Vec3 {
        self.landmarks[index].position
    }

    pub fn set_position(&mut self, index: usize, position: Vec3) {
        self.landmarks[index].position = position;
    }

    /// Overwrites this frame with `other` without reallocating.
    ///
    /// Both frames belong to the same stream, so their lengths match.
    pub fn copy_from(&mut self, other: &LandmarkFrame) {
        debug_assert_eq!(self.stream, other.stream);
        self.landmarks.copy_from_slice(&other.landmarks);
    }
}
