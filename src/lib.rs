pub mod error;
pub mod heightmap;
pub mod meshing;
pub mod settings;
pub mod terrain;

pub use error::TerrainError;
pub use heightmap::HeightMapDimensions;
pub use settings::TerrainSettings;
pub use terrain::{init_terrain, MeshSink, TessTerrainPlugin};
