use bevy::ecs::system::SystemParam;
use bevy::hierarchy::HierarchyQueryExt;
use bevy::log;
use bevy::prelude::*;
use holistic_rig::{
    RetargetConfig, RetargetEngine, RigError, RigGroup, RigTarget, TickOutcome, TrackingInput,
};

/// Landmarks received since the last frame, newest per stream.
#[derive(Debug, Default, Resource)]
pub struct PendingLandmarks {
    pub input: TrackingInput,
}

#[derive(Debug, Clone, Resource)]
pub struct RetargetSettings(pub RetargetConfig);

/// The four hierarchies one tracked character is made of.
#[derive(Debug, Clone, Copy, Component)]
pub struct HolisticRig {
    pub pose: Entity,
    pub left_hand: Entity,
    pub right_hand: Entity,
    pub model: Entity,
}

impl HolisticRig {
    pub fn root(&self, group: RigGroup) -> Entity {
        match group {
            RigGroup::Pose => self.pose,
            RigGroup::LeftHand => self.left_hand,
            RigGroup::RightHand => self.right_hand,
            RigGroup::Model => self.model,
        }
    }
}

/// Per-character engine. Built lazily because the model scene spawns
/// asynchronously.
#[derive(Default, Component)]
pub struct Retargeter {
    engine: Option<RetargetEngine<Entity>>,
    last_error: Option<RigError>,
}

#[derive(SystemParam)]
pub struct SceneGraph<'w, 's> {
    names: Query<'w, 's, &'static Name>,
    children: Query<'w, 's, &'static Children>,
    parents: Query<'w, 's, &'static Parent>,
    transforms: Query<'w, 's, &'static mut Transform>,
}

impl SceneGraph<'_, '_> {
    fn has_name(&self, entity: Entity, name: &str) -> bool {
        self.names.get(entity).is_ok_and(|n| n.as_str() == name)
    }

    fn find_child(&self, parent: Entity, name: &str) -> Option<Entity> {
        self.children.get(parent).ok()?
            .iter()
            .copied()
            .find(|child| self.has_name(*child, name))
    }

    fn find_descendant(&self, root: Entity, name: &str) -> Option<Entity> {
        self.children.iter_descendants(root)
            .find(|entity| self.has_name(*entity, name))
    }

    /// Resolves a `/`-separated path below `root`.
    ///
    /// The first segment may sit at any depth, since scene loaders wrap the
    /// named node hierarchy in unnamed roots. Later segments are direct
    /// children.
    pub fn find_path(&self, root: Entity, path: &str) -> Option<Entity> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let mut entity = self.find_descendant(root, segments.next()?)?;
        for segment in segments {
            entity = self.find_child(entity, segment)?;
        }
        Some(entity)
    }

    fn transform(&self, entity: Entity) -> Result<Transform, RigError> {
        self.transforms.get(entity)
            .copied()
            .map_err(|_| RigError::StaleHandle(format!("{:?}", entity)))
    }

    fn transform_mut(&mut self, entity: Entity) -> Result<Mut<'_, Transform>, RigError> {
        self.transforms.get_mut(entity)
            .map_err(|_| RigError::StaleHandle(format!("{:?}", entity)))
    }

    /// Composes local transforms from `entity` up to, but excluding, `stop`.
    ///
    /// Reads `Transform` rather than `GlobalTransform` so that writes made
    /// earlier in the same frame are visible.
    fn compose_until(&self, entity: Entity, stop: Option<Entity>) -> Result<Transform, RigError> {
        let mut result = self.transform(entity)?;
        let mut current = entity;
        while let Ok(parent) = self.parents.get(current) {
            current = parent.get();
            if Some(current) == stop {
                return Ok(result);
            }
            result = self.transform(current)?.mul_transform(result);
        }

        match stop {
            Some(stop) => Err(RigError::StaleHandle(format!("{:?} is not below {:?}", entity, stop))),
            None => Ok(result),
        }
    }
}

/// A [`SceneGraph`] seen through one character's roots.
pub struct BoundRig<'a, 'w, 's> {
    rig: &'a HolisticRig,
    graph: &'a mut SceneGraph<'w, 's>,
}

impl RigTarget for BoundRig<'_, '_, '_> {
    type Handle = Entity;

    fn root(&self, group: RigGroup) -> Result<Entity, RigError> {
        let root = self.rig.root(group);
        self.graph.transforms.get(root)
            .map(|_| root)
            .map_err(|_| RigError::MissingRoot(group))
    }

    fn joint(&self, group: RigGroup, name: &str) -> Result<Entity, RigError> {
        self.graph.find_path(self.rig.root(group), name)
            .ok_or_else(|| RigError::missing_joint(group, name.to_owned()))
    }

    fn set_local_position(&mut self, joint: Entity, position: Vec3) -> Result<(), RigError> {
        self.graph.transform_mut(joint)?.translation = position;
        Ok(())
    }

    fn set_local_rotation(&mut self, joint: Entity, rotation: Quat) -> Result<(), RigError> {
        self.graph.transform_mut(joint)?.rotation = rotation;
        Ok(())
    }

    fn world_position(&self, joint: Entity) -> Result<Vec3, RigError> {
        Ok(self.graph.compose_until(joint, None)?.translation)
    }

    fn bind_position(&self, joint: Entity) -> Result<Vec3, RigError> {
        Ok(self.graph.compose_until(joint, Some(self.rig.model))?.translation)
    }

    fn uniform_scale(&self, joint: Entity) -> Result<f32, RigError> {
        Ok(self.graph.transform(joint)?.scale.x)
    }

    fn set_uniform_scale(&mut self, joint: Entity, scale: f32) -> Result<(), RigError> {
        self.graph.transform_mut(joint)?.scale = Vec3::splat(scale);
        Ok(())
    }
}

pub fn retarget_rigs(
    settings: Res<RetargetSettings>,
    mut pending: ResMut<PendingLandmarks>,
    mut rigs: Query<(&HolisticRig, &mut Retargeter)>,
    mut graph: SceneGraph,
) {
    for (rig, mut retargeter) in &mut rigs {
        if retargeter.engine.is_some() {
            continue;
        }

        let target = BoundRig {
            rig,
            graph: &mut graph,
        };
        match RetargetEngine::new(&target, &settings.0) {
            Ok(engine) => {
                retargeter.engine = Some(engine);
                retargeter.last_error = None;
            }
            Err(err) => {
                if retargeter.last_error.as_ref() != Some(&err) {
                    log::warn!("rig is not ready for retargeting: {}", err);
                    retargeter.last_error = Some(err);
                }
            }
        }
    }

    // Landmarks keep accumulating until some rig can consume them.
    if rigs.iter().all(|(_, retargeter)| retargeter.engine.is_none()) {
        return;
    }
    let input = std::mem::take(&mut pending.input);

    for (rig, mut retargeter) in &mut rigs {
        let Some(engine) = retargeter.engine.as_mut() else {
            continue;
        };
        let mut target = BoundRig {
            rig,
            graph: &mut graph,
        };
        match engine.tick(&mut target, &input) {
            Ok(TickOutcome::NotReady) => {}
            Ok(TickOutcome::Retargeted { scale_factor }) => {
                log::trace!("retargeted, scale factor {:?}", scale_factor);
            }
            Err(err) => log::error!("retargeting failed: {}", err),
        }
    }
}

/// Spawns a group root with one named child per slot, each drawn as a small
/// sphere.
pub fn spawn_constraint_group<'a>(
    commands: &mut Commands,
    name: &str,
    slots: impl IntoIterator<Item=&'a str>,
    mesh: &Handle<Mesh>,
    material: &Handle<StandardMaterial>,
) -> Entity {
    commands
        .spawn((SpatialBundle::default(), Name::new(name.to_owned())))
        .with_children(|parent| {
            for slot in slots {
                parent.spawn((
                    PbrBundle {
                        mesh: mesh.clone(),
                        material: material.clone(),
                        ..default()
                    },
                    Name::new(slot.to_owned()),
                ));
            }
        })
        .id()
}
