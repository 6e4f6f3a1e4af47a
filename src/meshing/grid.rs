use bevy::prelude::{Vec2, Vec3};

use super::QuadMesh;
use crate::TerrainError;

// Largest resolution whose (rez + 1)^2 vertices are still addressable by u32 indices
pub const MAX_RESOLUTION: i32 = u16::MAX as i32;

/// Builds a flat `rez` x `rez` quad grid on the XZ plane, centered at the origin
/// and spanning `width` along X and `height` along Z.
///
/// Vertex `(i, j)` sits at linear index `i * (rez + 1) + j`; its UV is
/// `(i / rez, j / rez)`. Each quad is emitted as four indices in the order
/// `(i, j), (i, j + 1), (i + 1, j + 1), (i + 1, j)`.
///
/// Returns [`TerrainError::InvalidArgument`] when `rez` is below 1 or above
/// [`MAX_RESOLUTION`]. `width` and `height` are not checked.
pub fn build_grid_mesh(rez: i32, width: f32, height: f32) -> Result<QuadMesh, TerrainError> {
    if rez < 1 {
        return Err(TerrainError::invalid_argument(format!(
            "rez should be greater than or equal to 1, got {rez}"
        )));
    }
    if rez > MAX_RESOLUTION {
        return Err(TerrainError::invalid_argument(format!(
            "rez should be at most {MAX_RESOLUTION}, got {rez}"
        )));
    }

    let rez = rez as u32;
    let rez_f = rez as f32;
    let num_row_verts = rez + 1;
    let num_verts = (num_row_verts as usize).pow(2);

    let mut vertices = Vec::with_capacity(num_verts);
    let mut uvs = Vec::with_capacity(num_verts);

    for i in 0..=rez {
        for j in 0..=rez {
            vertices.push(Vec3 {
                x: -width / 2. + width * i as f32 / rez_f,
                y: 0.,
                z: -height / 2. + height * j as f32 / rez_f,
            });
            uvs.push(Vec2::new(i as f32 / rez_f, j as f32 / rez_f));
        }
    }

    let mut indices = Vec::with_capacity((rez as usize).pow(2) * 4);
    let idx = |i: u32, j: u32| -> u32 { i * num_row_verts + j };

    for i in 0..rez {
        for j in 0..rez {
            // (i,j+1)    (i+1,j+1)
            //   +----------+        ^ z
            //   |          |        |
            //   |          |        o--> x
            //   +----------+
            // (i,j)     (i+1,j)
            indices.extend([idx(i, j), idx(i, j + 1), idx(i + 1, j + 1), idx(i + 1, j)]);
        }
    }

    Ok(QuadMesh {
        vertices,
        uvs,
        indices,
    })
}
