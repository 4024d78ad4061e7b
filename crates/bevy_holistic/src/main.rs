use std::path::PathBuf;

use bevy::gltf::GltfAssetLabel;
use bevy::log::{self, LogPlugin};
use bevy::prelude::*;
use clap::Parser;
use holistic_rig::joints::{hand_slot_names, pose_slot_names};
use holistic_rig::RetargetConfig;
use tracing_subscriber::EnvFilter;

use crate::camera::FirstPersonCamera;
use crate::tracking::{HolisticRig, PendingLandmarks, RetargetSettings, Retargeter};

mod api;
mod camera;
mod tracking;

#[derive(Parser, Resource)]
struct Options {
    #[arg(long, default_value = "127.0.0.1:8888")]
    pub api_bind: String,
    /// JSON retargeting config.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
    /// glTF scene to drive, relative to the asset directory.
    #[arg(long, short = 'm')]
    pub model: Option<String>,
    #[arg(long, short = 'f')]
    pub interpolation_factor: Option<f32>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let options = Options::parse();

    let mut config = match &options.config {
        Some(path) => RetargetConfig::load(path)?,
        None => RetargetConfig::default(),
    };
    if let Some(factor) = options.interpolation_factor {
        config.interpolation_factor = factor;
        config = config.sanitized();
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let api_addr: std::net::SocketAddr = options.api_bind.parse()?;
    let (api_state, api_resource) = api::ApiState::new();
    runtime.spawn(async move {
        let listener = match tokio::net::TcpListener::bind(api_addr).await {
            Ok(listener) => listener,
            Err(err) => {
                log::error!("failed to bind API on {}: {}", api_addr, err);
                return;
            }
        };

        log::info!("serving API on {}", api_addr);
        if let Err(err) = axum::serve(listener, api::new_api().with_state(api_state)).await {
            log::error!("failed to serve API: {}", err);
        }
    });

    App::new()
        .add_plugins(DefaultPlugins.build().disable::<LogPlugin>())
        .insert_resource(api_resource)
        .insert_resource(RetargetSettings(config))
        .insert_resource(options)
        .init_resource::<PendingLandmarks>()
        .add_systems(Update, (
            api::update_api,
            tracking::retarget_rigs,
            camera::toggle_first_person,
            camera::follow_head,
        ).chain())
        .add_systems(Startup, init)
        .run();

    Ok(())
}

fn init(
    mut commands: Commands,
    options: Res<Options>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn(DirectionalLightBundle {
        transform: Transform::from_xyz(10., 100., 0.)
            .looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });

    let marker = meshes.add(Sphere::new(0.015));
    let pose_material = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 0.0, 1.0),
        ..default()
    });
    let hand_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.0, 1.0, 1.0),
        ..default()
    });

    let pose = tracking::spawn_constraint_group(
        &mut commands, "pose", pose_slot_names(), &marker, &pose_material);
    let left_hand = tracking::spawn_constraint_group(
        &mut commands, "left_hand", hand_slot_names(), &marker, &hand_material);
    let right_hand = tracking::spawn_constraint_group(
        &mut commands, "right_hand", hand_slot_names(), &marker, &hand_material);

    let model = match &options.model {
        Some(path) => commands.spawn((
            SceneBundle {
                scene: asset_server.load(GltfAssetLabel::Scene(0).from_asset(path.clone())),
                ..default()
            },
            Name::new("model"),
        )).id(),
        None => {
            log::warn!("no model given, retargeting stays idle until model bones exist");
            commands.spawn((SpatialBundle::default(), Name::new("model"))).id()
        }
    };

    let rig = commands.spawn((
        HolisticRig {
            pose,
            left_hand,
            right_hand,
            model,
        },
        Retargeter::default(),
    )).id();

    let home = Transform::from_xyz(0., 1., -3.)
        .looking_at(Vec3::new(0., 0.5, 0.), Vec3::Y);
    commands.spawn((
        Camera3dBundle {
            transform: home,
            ..default()
        },
        FirstPersonCamera::new(rig, home),
    ));
}
