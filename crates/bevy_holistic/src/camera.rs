use std::f32::consts::PI;

use bevy::log;
use bevy::prelude::*;

use crate::tracking::HolisticRig;

const HEAD_SLOT: &str = "head_center";

/// A camera that can ride along with a rig's head.
#[derive(Debug, Component)]
pub struct FirstPersonCamera {
    pub enabled: bool,
    /// Entity carrying the [`HolisticRig`].
    pub rig: Entity,
    pub home: Transform,
    head: Option<Entity>,
}

impl FirstPersonCamera {
    pub fn new(rig: Entity, home: Transform) -> Self {
        Self {
            enabled: false,
            rig,
            home,
            head: None,
        }
    }
}

pub fn toggle_first_person(
    keys: Res<ButtonInput<KeyCode>>,
    mut cameras: Query<(&mut FirstPersonCamera, &mut Transform)>,
) {
    if !keys.just_pressed(KeyCode::KeyV) {
        return;
    }

    for (mut camera, mut transform) in &mut cameras {
        camera.enabled = !camera.enabled;
        if !camera.enabled {
            *transform = camera.home;
        }
        log::info!("first person camera {}", if camera.enabled { "on" } else { "off" });
    }
}

pub fn follow_head(
    rigs: Query<&HolisticRig>,
    names: Query<&Name>,
    children: Query<&Children>,
    joints: Query<&Transform, Without<FirstPersonCamera>>,
    mut cameras: Query<(&mut FirstPersonCamera, &mut Transform)>,
) {
    for (mut camera, mut transform) in &mut cameras {
        if !camera.enabled {
            continue;
        }
        let Ok(rig) = rigs.get(camera.rig) else {
            continue;
        };

        if camera.head.is_none() {
            camera.head = children.get(rig.pose).ok()
                .and_then(|c| c.iter().copied()
                    .find(|e| names.get(*e).is_ok_and(|n| n.as_str() == HEAD_SLOT)));
        }
        let Some(head) = camera.head else {
            continue;
        };

        let (Ok(root), Ok(head)) = (joints.get(rig.pose), joints.get(head)) else {
            camera.head = None;
            continue;
        };

        // The head faces +Z, cameras look down -Z.
        transform.translation = root.transform_point(head.translation);
        transform.rotation = root.rotation * head.rotation * Quat::from_rotation_y(PI);
    }
}
