use crate::landmark::LandmarkFrame;

/// Converts a frame from the tracker's y-down convention to the rig's y-up
/// convention. Apply once per frame.
pub fn normalize(frame: &mut LandmarkFrame) {
    for landmark in frame.landmarks_mut() {
        landmark.position.y = -landmark.position.y;
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::landmark::Stream;

    use super::*;

    #[test]
    fn test_flips_only_vertical() {
        let original = LandmarkFrame::from_positions(
            Stream::LeftHand,
            (0..21).map(|i| Vec3::new(i as f32, 1.0 + i as f32, -(i as f32))),
        ).unwrap();

        let mut frame = original.clone();
        normalize(&mut frame);
        for (a, b) in frame.landmarks().iter().zip(original.landmarks()) {
            assert_eq!(a.position.x, b.position.x);
            assert_eq!(a.position.y, -b.position.y);
            assert_eq!(a.position.z, b.position.z);
        }

        normalize(&mut frame);
        assert_eq!(frame, original);
    }
}
