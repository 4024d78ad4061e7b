use crate::landmark::{LandmarkFrame, Stream};

/// Blends `previous` toward `current` into `out`.
///
/// Pinned indices take `current` verbatim. Without a previous frame the
/// result is `current`.
pub fn interpolate_into(
    previous: Option<&LandmarkFrame>,
    current: &LandmarkFrame,
    factor: f32,
    pinned: &[usize],
    out: &mut LandmarkFrame,
) {
    out.copy_from(current);
    let Some(previous) = previous else {
        return;
    };

    for (index, (landmark, from)) in out.landmarks_mut()
        .iter_mut()
        .zip(previous.landmarks())
        .enumerate() {
        if pinned.contains(&index) {
            continue;
        }
        landmark.position = from.position + (landmark.position - from.position) * factor;
    }
}

pub fn interpolate(
    previous: Option<&LandmarkFrame>,
    current: &LandmarkFrame,
    factor: f32,
    pinned: &[usize],
) -> LandmarkFrame {
    let mut out = LandmarkFrame::zeroed(current.stream());
    interpolate_into(previous, current, factor, pinned, &mut out);
    out
}

/// Per-stream smoothing state: the frame blended from last tick and a
/// reusable output buffer.
#[derive(Debug, Clone)]
pub struct StreamInterpolator {
    previous: Option<LandmarkFrame>,
    output: LandmarkFrame,
    factor: f32,
    pinned: Vec<usize>,
}

impl StreamInterpolator {
    pub fn new(stream: Stream, factor: f32, pinned: Vec<usize>) -> Self {
        Self {
            previous: None,
            output: LandmarkFrame::zeroed(stream),
            factor,
            pinned,
        }
    }

    /// Blends `current` against the previous tick and remembers `current`
    /// as the lower bound for the next one.
    pub fn process(&mut self, current: &LandmarkFrame) -> &mut LandmarkFrame {
        interpolate_into(
            self.previous.as_ref(),
            current,
            self.factor,
            &self.pinned,
            &mut self.output,
        );

        match &mut self.previous {
            Some(previous) => previous.copy_from(current),
            slot => *slot = Some(current.clone()),
        }

        &mut self.output
    }

    pub fn previous(&self) -> Option<&LandmarkFrame> {
        self.previous.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::landmark::pose;

    use super::*;

    fn pose_frame(f: impl Fn(usize) -> Vec3) -> LandmarkFrame {
        LandmarkFrame::from_positions(Stream::Pose, (0..33).map(f)).unwrap()
    }

    #[test]
    fn test_pinned_ignores_factor_and_previous() {
        let previous = pose_frame(|i| Vec3::splat(i as f32 * 10.0));
        let current = pose_frame(|i| Vec3::new(i as f32, -1.0, 2.0));
        let pinned = [pose::LEFT_SHOULDER, pose::RIGHT_SHOULDER];

        for factor in [0.0, 0.3, 0.5, 1.0] {
            let result = interpolate(Some(&previous), &current, factor, &pinned);
            for index in pinned {
                assert_eq!(result.position(index), current.position(index));
            }
        }
    }

    #[test]
    fn test_factor_boundaries() {
        let previous = pose_frame(|i| Vec3::new(i as f32, 1.0, -3.0));
        let current = pose_frame(|i| Vec3::new(-(i as f32), 5.0, 7.0));
        let pinned = [pose::LEFT_SHOULDER];

        let at_zero = interpolate(Some(&previous), &current, 0.0, &pinned);
        let at_one = interpolate(Some(&previous), &current, 1.0, &pinned);
        for index in (0..33).filter(|i| !pinned.contains(i)) {
            assert!(at_zero.position(index).abs_diff_eq(previous.position(index), 1e-6));
            assert!(at_one.position(index).abs_diff_eq(current.position(index), 1e-6));
        }
    }

    #[test]
    fn test_halfway_blend() {
        let previous = pose_frame(|_| Vec3::ZERO);
        let current = pose_frame(|_| Vec3::new(2.0, 4.0, 6.0));
        let result = interpolate(Some(&previous), &current, 0.5, &[]);
        assert!(result.position(pose::NOSE).abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-6));
    }

    #[test]
    fn test_first_tick_passthrough() {
        let current = pose_frame(|i| Vec3::new(i as f32, 2.0 * i as f32, 0.5));
        let result = interpolate(None, &current, 0.5, &[]);
        assert_eq!(result, current);
    }

    #[test]
    fn test_stream_interpolator_tracks_raw_previous() {
        let mut interpolator = StreamInterpolator::new(Stream::Pose, 0.5, vec![]);
        let first = pose_frame(|_| Vec3::ZERO);
        let second = pose_frame(|_| Vec3::splat(2.0));

        assert_eq!(*interpolator.process(&first), first);
        let blended = interpolator.process(&second).position(0);
        assert!(blended.abs_diff_eq(Vec3::ONE, 1e-6));
        assert_eq!(interpolator.previous(), Some(&second));
    }
}
