use bevy::{asset::LoadState, pbr::wireframe::Wireframe, prelude::*};

use crate::{
    heightmap::HeightMapDimensions,
    meshing::{build_grid_mesh, QuadMesh},
    settings::TerrainSettings,
    TerrainError,
};

/// Something that can hold or display a finished terrain mesh.
pub trait MeshSink {
    fn attach(&mut self, mesh: QuadMesh);
}

impl MeshSink for Vec<QuadMesh> {
    fn attach(&mut self, mesh: QuadMesh) {
        self.push(mesh);
    }
}

/// Builds the terrain grid sized to the height-map and hands it to `sink`.
/// On error the sink is left untouched.
pub fn init_terrain(
    settings: &TerrainSettings,
    dims: HeightMapDimensions,
    sink: &mut impl MeshSink,
) -> Result<(), TerrainError> {
    let (width, height) = dims.as_extent();
    let mesh = build_grid_mesh(settings.resolution, width, height)?;

    info!(
        "Built {}x{} terrain grid over {}x{}: {} vertices, {} quads",
        settings.resolution,
        settings.resolution,
        dims.width,
        dims.height,
        mesh.vertex_count(),
        mesh.quad_count()
    );

    sink.attach(mesh);
    Ok(())
}

/// Spawns the terrain as a `PbrBundle`.
pub struct PbrSpawner<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub meshes: &'a mut Assets<Mesh>,
    pub material: Handle<StandardMaterial>,
    pub wireframe: bool,
}

impl MeshSink for PbrSpawner<'_, '_, '_> {
    fn attach(&mut self, mesh: QuadMesh) {
        let mut entity = self.commands.spawn(PbrBundle {
            mesh: self.meshes.add(mesh.into_render_mesh()),
            material: self.material.clone(),
            ..default()
        });

        if self.wireframe {
            entity.insert(Wireframe);
        }
    }
}

#[derive(Resource)]
struct PendingHeightMap(Handle<Image>);

/// Loads the configured height-map and spawns a grid mesh matching its size
/// once the image is available.
#[derive(Default)]
pub struct TessTerrainPlugin {
    pub settings: TerrainSettings,
}

impl Plugin for TessTerrainPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.settings.clone())
            .add_startup_system(load_heightmap)
            .add_system(spawn_terrain);
    }
}

fn load_heightmap(
    mut commands: Commands,
    settings: Res<TerrainSettings>,
    asset_server: Res<AssetServer>,
) {
    debug!("Loading height-map {}", settings.heightmap);
    let handle: Handle<Image> = asset_server.load(settings.heightmap.as_str());
    commands.insert_resource(PendingHeightMap(handle));
}

fn spawn_terrain(
    mut commands: Commands,
    pending: Option<Res<PendingHeightMap>>,
    settings: Res<TerrainSettings>,
    asset_server: Res<AssetServer>,
    images: Res<Assets<Image>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(pending) = pending else {
        return;
    };

    let Some(image) = images.get(&pending.0) else {
        if asset_server.get_load_state(&pending.0) == LoadState::Failed {
            error!("Failed to load height-map {}", settings.heightmap);
            commands.remove_resource::<PendingHeightMap>();
        }
        return;
    };

    let dims = HeightMapDimensions::from_image(image);
    let material = materials.add(StandardMaterial {
        base_color_texture: Some(pending.0.clone()),
        perceptual_roughness: 0.9,
        ..default()
    });

    let mut spawner = PbrSpawner {
        commands: &mut commands,
        meshes: &mut meshes,
        material,
        wireframe: settings.wireframe,
    };

    // A bad resolution won't fix itself on the next frame, so stop polling either way
    if let Err(err) = init_terrain(&settings, dims, &mut spawner) {
        error!("Failed to build terrain: {err}");
    }

    commands.remove_resource::<PendingHeightMap>();
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::{
        asset::AssetPlugin,
        render::render_resource::{Extent3d, TextureDimension, TextureFormat},
    };
    use std::time::Duration;

    fn settings_with_resolution(resolution: i32) -> TerrainSettings {
        TerrainSettings {
            resolution,
            ..default()
        }
    }

    #[test]
    fn sink_receives_mesh_sized_to_heightmap() {
        let mut sink: Vec<QuadMesh> = Vec::new();

        init_terrain(
            &settings_with_resolution(4),
            HeightMapDimensions::new(256, 128),
            &mut sink,
        )
        .unwrap();

        assert_eq!(sink.len(), 1);
        let mesh = &sink[0];
        assert_eq!(mesh.vertex_count(), 25);
        assert_eq!(mesh.quad_count(), 16);
        assert_eq!(mesh.vertices[0], Vec3::new(-128., 0., -64.));
        assert_eq!(mesh.vertices[24], Vec3::new(128., 0., 64.));
    }

    #[test]
    fn default_resolution_is_twenty() {
        let mut sink: Vec<QuadMesh> = Vec::new();

        init_terrain(
            &TerrainSettings::default(),
            HeightMapDimensions::new(512, 512),
            &mut sink,
        )
        .unwrap();

        assert_eq!(sink[0].vertex_count(), 21 * 21);
    }

    #[test]
    fn failed_build_leaves_sink_empty() {
        let mut sink: Vec<QuadMesh> = Vec::new();

        let result = init_terrain(
            &settings_with_resolution(0),
            HeightMapDimensions::new(64, 64),
            &mut sink,
        );

        assert!(matches!(result, Err(TerrainError::InvalidArgument(_))));
        assert!(sink.is_empty());
    }

    fn terrain_app(settings: TerrainSettings) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugin(AssetPlugin::default())
            .add_asset::<Image>()
            .add_asset::<Mesh>()
            .add_asset::<StandardMaterial>()
            .insert_resource(settings)
            .add_system(spawn_terrain);
        app
    }

    fn insert_heightmap(app: &mut App, width: u32, height: u32) {
        let image = Image::new_fill(
            Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            &[0, 0, 0, 255],
            TextureFormat::Rgba8Unorm,
        );
        let handle = app.world.resource_mut::<Assets<Image>>().add(image);
        app.insert_resource(PendingHeightMap(handle));
    }

    fn terrain_entities(app: &mut App) -> usize {
        app.world
            .query::<&Handle<Mesh>>()
            .iter(&app.world)
            .count()
    }

    fn wireframe_entities(app: &mut App) -> usize {
        app.world.query::<&Wireframe>().iter(&app.world).count()
    }

    #[test]
    fn loaded_heightmap_spawns_one_terrain() {
        let mut app = terrain_app(settings_with_resolution(4));
        insert_heightmap(&mut app, 32, 16);

        app.update();

        assert!(!app.world.contains_resource::<PendingHeightMap>());
        assert_eq!(terrain_entities(&mut app), 1);
        assert_eq!(wireframe_entities(&mut app), 0);
        assert_eq!(app.world.resource::<Assets<Mesh>>().len(), 1);

        // Nothing is pending anymore, so later frames spawn nothing new
        app.update();
        assert_eq!(terrain_entities(&mut app), 1);
    }

    #[test]
    fn wireframe_setting_marks_the_terrain() {
        let mut app = terrain_app(TerrainSettings {
            resolution: 2,
            wireframe: true,
            ..default()
        });
        insert_heightmap(&mut app, 8, 8);

        app.update();

        assert_eq!(terrain_entities(&mut app), 1);
        assert_eq!(wireframe_entities(&mut app), 1);
    }

    #[test]
    fn bad_resolution_stops_polling_without_spawning() {
        let mut app = terrain_app(settings_with_resolution(0));
        insert_heightmap(&mut app, 8, 8);

        app.update();

        assert!(!app.world.contains_resource::<PendingHeightMap>());
        assert_eq!(terrain_entities(&mut app), 0);
    }

    #[test]
    fn unloadable_heightmap_stops_polling() {
        let mut app = terrain_app(TerrainSettings::default());
        let handle: Handle<Image> = app
            .world
            .resource::<AssetServer>()
            .load("no/such/heightmap.png");
        app.insert_resource(PendingHeightMap(handle));

        // Loading runs on the io task pool; give it a bounded number of frames to fail
        for _ in 0..200 {
            app.update();
            if !app.world.contains_resource::<PendingHeightMap>() {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }

        assert!(!app.world.contains_resource::<PendingHeightMap>());
        assert_eq!(terrain_entities(&mut app), 0);
    }
}
