//! Vector helpers shared by the synthesizer and the solver.
//!
//! Functions that normalize return `None` on degenerate input instead of a
//! non-finite value; callers decide what to fall back to.

use glam::{Mat3, Quat, Vec3};

/// Lengths below this are treated as zero.
pub const EPSILON: f32 = 1e-6;

pub fn midpoint(a: Vec3, b: Vec3) -> Vec3 {
    (a + b) * 0.5
}

/// Rotation whose local +Z points along `forward` and whose local +Y lies in
/// the plane of `forward` and `up`.
///
/// If `up` is zero or parallel to `forward` the roll is left to the shortest arc
/// from +Z. Returns `None` when `forward` has no length.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Option<Quat> {
    let forward = forward.try_normalize()?;
    let right = up.normalize_or_zero().cross(forward);
    if right.length_squared() < EPSILON {
        return Some(Quat::from_rotation_arc(Vec3::Z, forward));
    }
    let right = right.normalize();
    let up = forward.cross(right);
    Some(Quat::from_mat3(&Mat3::from_cols(right, up, forward)).normalize())
}

/// Rotation about the vertical axis facing along `direction`, with pitch and
/// roll forced to zero.
pub fn yaw_rotation(direction: Vec3) -> Option<Quat> {
    if direction.x.abs() < EPSILON && direction.z.abs() < EPSILON {
        return None;
    }
    Some(Quat::from_rotation_y(direction.x.atan2(direction.z)))
}

/// Palm normal of a hand, averaged from two cross products so that a hand
/// lying edge-on to the camera still yields a stable direction.
pub fn palm_normal(to_thumb: Vec3, to_index: Vec3, to_pinky: Vec3) -> Option<Vec3> {
    let thumb_side = to_thumb.cross(to_index);
    let pinky_side = to_index.cross(to_pinky);
    if thumb_side.length_squared() < EPSILON || pinky_side.length_squared() < EPSILON {
        return None;
    }
    ((thumb_side + pinky_side) * 0.5).try_normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint_is_symmetric() {
        let pairs = [
            (Vec3::new(1.0, 2.0, 3.0), Vec3::new(-4.0, 0.5, 9.0)),
            (Vec3::ZERO, Vec3::new(0.1, -0.2, 0.3)),
            (Vec3::splat(-7.5), Vec3::splat(7.5)),
        ];
        for (a, b) in pairs {
            let m = midpoint(a, b);
            assert_eq!(m, midpoint(b, a));
            assert!((m.distance(a) - m.distance(b)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_look_rotation_axes() {
        let forward = Vec3::new(1.0, 0.0, 1.0);
        let rotation = look_rotation(forward, Vec3::Y).unwrap();
        assert!((rotation * Vec3::Z).abs_diff_eq(forward.normalize(), 1e-5));
        assert!((rotation * Vec3::Y).abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn test_look_rotation_identity() {
        let rotation = look_rotation(Vec3::Z, Vec3::Y).unwrap();
        assert!(rotation.abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn test_look_rotation_parallel_up() {
        let rotation = look_rotation(Vec3::Y * 2.0, Vec3::Y).unwrap();
        assert!(rotation.is_finite());
        assert!((rotation * Vec3::Z).abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn test_look_rotation_nearly_parallel_up() {
        let forward = Vec3::new(0.3, 0.9, -0.2);
        let up = forward * 0.5 + Vec3::new(1e-7, 0.0, 0.0);
        let rotation = look_rotation(forward, up).unwrap();
        let expected = Quat::from_rotation_arc(Vec3::Z, forward.normalize());
        assert!(rotation.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn test_look_rotation_zero_forward() {
        assert!(look_rotation(Vec3::ZERO, Vec3::Y).is_none());
    }

    #[test]
    fn test_yaw_rotation() {
        let direction = Vec3::new(-0.2, 0.0, -0.4);
        let rotation = yaw_rotation(direction).unwrap();
        let expected = Quat::from_rotation_y((-0.2f32).atan2(-0.4));
        assert!(rotation.abs_diff_eq(expected, 1e-6));
        assert!(yaw_rotation(Vec3::Y).is_none());
    }

    #[test]
    fn test_palm_normal_collinear() {
        let d = Vec3::new(0.0, 1.0, 0.0);
        assert!(palm_normal(d, d * 2.0, d * 3.0).is_none());
    }

    #[test]
    fn test_palm_normal_flat_hand() {
        let normal = palm_normal(
            Vec3::new(-1.0, 0.5, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 0.8, 0.0),
        ).unwrap();
        assert!(normal.abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }
}
