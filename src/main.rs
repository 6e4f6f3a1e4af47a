use tess_terrain::{
    settings::{TerrainSettings, SETTINGS_PATH},
    TessTerrainPlugin,
};

use bevy::{
    pbr::wireframe::WireframePlugin,
    prelude::*,
    render::{
        settings::{WgpuFeatures, WgpuSettings},
        RenderPlugin,
    },
};
use bevy_fly_camera::{FlyCamera, FlyCameraPlugin};

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(RenderPlugin {
        wgpu_settings: WgpuSettings {
            features: WgpuFeatures::POLYGON_MODE_LINE,
            ..default()
        },
    }))
    .add_plugin(WireframePlugin)
    .add_plugin(FlyCameraPlugin);

    // LogPlugin is installed by DefaultPlugins, so settings loading can log from here on
    let settings = match TerrainSettings::load_or_default(SETTINGS_PATH) {
        Ok(settings) => settings,
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    };

    app.add_plugin(TessTerrainPlugin { settings })
        .add_startup_system(setup_scene)
        .run();
}

const CAMERA_START_HEIGHT: f32 = 300.;

fn setup_scene(mut commands: Commands) {
    add_camera(&mut commands, CAMERA_START_HEIGHT);
    add_lights(&mut commands);
}

fn add_camera(commands: &mut Commands, start_height: f32) {
    commands
        .spawn(Camera3dBundle {
            transform: Transform::from_translation(Vec3 {
                x: 0.0,
                y: start_height,
                z: 0.0,
            }),
            ..default()
        })
        .insert(FlyCamera::default());
}

fn add_lights(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.1,
    });

    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 10000.,
            shadows_enabled: false,
            ..default()
        },
        transform: Transform::from_rotation(Quat::from_rotation_x(-0.25 * std::f32::consts::PI)),
        ..default()
    });
}
