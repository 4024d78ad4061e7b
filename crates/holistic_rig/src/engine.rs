use holistic_api::SetLandmarksRequest;
use tracing::info;

use crate::cache::FrameCache;
use crate::calibrate::ScaleCalibrator;
use crate::config::RetargetConfig;
use crate::error::{FrameError, RigError};
use crate::interpolate::StreamInterpolator;
use crate::joints::PosePoint;
use crate::landmark::{pose, Hand, LandmarkFrame, Stream};
use crate::normalize::normalize;
use crate::reference::{ReferencePoints, ReferenceSynthesizer};
use crate::rig::{RigGroup, RigTarget};
use crate::solver::{HandSolver, PoseSolver};

/// Frames received for one tick. Missing streams keep their cached frame.
#[derive(Debug, Clone, Default)]
pub struct TrackingInput {
    pub pose: Option<LandmarkFrame>,
    pub left_hand: Option<LandmarkFrame>,
    pub right_hand: Option<LandmarkFrame>,
}

impl TrackingInput {
    pub fn get(&self, stream: Stream) -> Option<&LandmarkFrame> {
        match stream {
            Stream::Pose => self.pose.as_ref(),
            Stream::LeftHand => self.left_hand.as_ref(),
            Stream::RightHand => self.right_hand.as_ref(),
        }
    }

    /// Keeps the newest frame per stream, so several requests arriving
    /// within one tick collapse into one input.
    pub fn merge(&mut self, newer: TrackingInput) {
        if newer.pose.is_some() {
            self.pose = newer.pose;
        }
        if newer.left_hand.is_some() {
            self.left_hand = newer.left_hand;
        }
        if newer.right_hand.is_some() {
            self.right_hand = newer.right_hand;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pose.is_none() && self.left_hand.is_none() && self.right_hand.is_none()
    }
}

impl TryFrom<SetLandmarksRequest> for TrackingInput {
    type Error = FrameError;

    fn try_from(request: SetLandmarksRequest) -> Result<Self, Self::Error> {
        let frame = |stream, landmarks: Option<Vec<_>>| {
            landmarks.map(|l| LandmarkFrame::new(stream, l)).transpose()
        };
        Ok(Self {
            pose: frame(Stream::Pose, request.pose)?,
            left_hand: frame(Stream::LeftHand, request.left_hand)?,
            right_hand: frame(Stream::RightHand, request.right_hand)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Some stream has never reported; nothing was written.
    NotReady,
    /// The rig was updated. `scale_factor` is `None` when calibration was
    /// skipped for degenerate shoulders.
    Retargeted { scale_factor: Option<f32> },
}

/// Retargets holistic landmark streams onto one rig.
///
/// Joint handles are resolved when the engine is built; every tick then
/// runs cache, smoothing, normalization, reference synthesis, joint solving
/// and scale calibration in that order.
#[derive(Debug, Clone)]
pub struct RetargetEngine<H> {
    cache: FrameCache,
    interpolators: [StreamInterpolator; 3],
    synthesizer: ReferenceSynthesizer,
    pose: PoseSolver<H>,
    hands: [HandSolver<H>; 2],
    calibrator: ScaleCalibrator<H>,
    left_shoulder: H,
    right_shoulder: H,
    points: ReferencePoints,
}

impl<H: Copy> RetargetEngine<H> {
    pub fn new<R: RigTarget<Handle=H>>(rig: &R, config: &RetargetConfig) -> Result<Self, RigError> {
        let pose = PoseSolver::new(rig)?;
        let shoulder = |index| {
            pose.handle(PosePoint::Landmark(index))
                .ok_or_else(|| RigError::missing_joint(RigGroup::Pose, "shoulder"))
        };
        let left_shoulder = shoulder(pose::LEFT_SHOULDER)?;
        let right_shoulder = shoulder(pose::RIGHT_SHOULDER)?;

        let factor = config.interpolation_factor;
        let engine = Self {
            cache: FrameCache::new(),
            interpolators: [
                StreamInterpolator::new(Stream::Pose, factor, config.pinned_pose.clone()),
                StreamInterpolator::new(Stream::LeftHand, factor, config.pinned_hand.clone()),
                StreamInterpolator::new(Stream::RightHand, factor, config.pinned_hand.clone()),
            ],
            synthesizer: ReferenceSynthesizer::new(config.head_offset),
            hands: [
                HandSolver::new(rig, Hand::Left)?,
                HandSolver::new(rig, Hand::Right)?,
            ],
            calibrator: ScaleCalibrator::new(rig, config)?,
            pose,
            left_shoulder,
            right_shoulder,
            points: ReferencePoints::default(),
        };

        info!(
            "retarget engine ready: factor={} head_offset={} scale_mode={:?}",
            factor, config.head_offset, config.scale_mode,
        );
        Ok(engine)
    }

    pub fn tick<R: RigTarget<Handle=H>>(
        &mut self,
        rig: &mut R,
        input: &TrackingInput,
    ) -> Result<TickOutcome, RigError> {
        for stream in Stream::ALL {
            self.cache.update(stream, input.get(stream));
        }
        if !self.cache.is_ready() {
            return Ok(TickOutcome::NotReady);
        }

        if let Some(current) = self.cache.get(Stream::Pose) {
            let frame = self.interpolators[Stream::Pose.index()].process(current);
            normalize(frame);
            self.points = self.synthesizer.synthesize(frame);
            self.pose.apply(rig, frame, &self.points)?;
        }

        for (hand, solver) in Hand::BOTH.into_iter().zip(self.hands.iter_mut()) {
            let stream = hand.stream();
            let Some(current) = self.cache.get(stream) else {
                continue;
            };
            let frame = self.interpolators[stream.index()].process(current);
            normalize(frame);
            solver.apply(rig, frame)?;
        }

        let scale_factor = self.calibrator.apply(rig, self.left_shoulder, self.right_shoulder)?;
        Ok(TickOutcome::Retargeted { scale_factor })
    }

    pub fn is_ready(&self) -> bool {
        self.cache.is_ready()
    }

    /// Reference points synthesized on the last retargeted tick.
    pub fn reference_points(&self) -> &ReferencePoints {
        &self.points
    }

    pub fn pose_rotation(&self, joint: &str) -> Option<glam::Quat> {
        self.pose.rotation(joint)
    }

    pub fn wrist_rotation(&self, hand: Hand) -> Option<glam::Quat> {
        match hand {
            Hand::Left => self.hands[0].wrist_rotation(),
            Hand::Right => self.hands[1].wrist_rotation(),
        }
    }
}
