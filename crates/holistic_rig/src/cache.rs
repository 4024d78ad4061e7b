use crate::landmark::{LandmarkFrame, Stream};

/// Holds the most recent complete frame for each stream.
///
/// A frame is only ever replaced, never cleared, so a stream that stops
/// reporting keeps serving its last observation.
#[derive(Debug, Clone, Default)]
pub struct FrameCache {
    frames: [Option<LandmarkFrame>; 3],
}

impl FrameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, stream: Stream, frame: Option<&LandmarkFrame>) {
        let Some(frame) = frame else {
            return;
        };
        debug_assert_eq!(frame.stream(), stream);

        match &mut self.frames[stream.index()] {
            Some(cached) => cached.copy_from(frame),
            slot => *slot = Some(frame.clone()),
        }
    }

    /// True once every stream has delivered at least one frame.
    pub fn is_ready(&self) -> bool {
        self.frames.iter().all(Option::is_some)
    }

    pub fn get(&self, stream: Stream) -> Option<&LandmarkFrame> {
        self.frames[stream.index()].as_ref()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn hand(value: f32, stream: Stream) -> LandmarkFrame {
        LandmarkFrame::from_positions(stream, (0..21).map(|_| Vec3::splat(value))).unwrap()
    }

    #[test]
    fn test_ready_needs_every_stream() {
        let mut cache = FrameCache::new();
        assert!(!cache.is_ready());

        cache.update(Stream::Pose, Some(&LandmarkFrame::zeroed(Stream::Pose)));
        cache.update(Stream::LeftHand, Some(&hand(1.0, Stream::LeftHand)));
        assert!(!cache.is_ready());

        cache.update(Stream::RightHand, None);
        assert!(!cache.is_ready());

        cache.update(Stream::RightHand, Some(&hand(2.0, Stream::RightHand)));
        assert!(cache.is_ready());
    }

    #[test]
    fn test_absent_frame_keeps_stale_data() {
        let mut cache = FrameCache::new();
        cache.update(Stream::LeftHand, Some(&hand(1.0, Stream::LeftHand)));
        cache.update(Stream::LeftHand, None);
        assert_eq!(cache.get(Stream::LeftHand).unwrap().position(3), Vec3::ONE);

        cache.update(Stream::LeftHand, Some(&hand(4.0, Stream::LeftHand)));
        assert_eq!(cache.get(Stream::LeftHand).unwrap().position(3), Vec3::splat(4.0));
        assert!(cache.get(Stream::RightHand).is_none());
    }
}
