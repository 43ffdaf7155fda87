use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;

use glam::{Vec2, Vec3};

use crate::mesh::{MeshP3NT2, VertexP3NT2};

/// Smallest grid that still closes into a sphere-like shape
pub const MIN_PRECISION: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TessellationError {
    PrecisionTooLow { precision: u32 },
}

impl fmt::Display for TessellationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TessellationError::PrecisionTooLow { precision } => write!(
                f,
                "sphere precision {precision} is below the minimum of {MIN_PRECISION}"
            ),
        }
    }
}

impl std::error::Error for TessellationError {}

/// Unit sphere centered at the origin, Y up.
///
/// Vertices form a `precision x precision` longitude/latitude grid; the
/// first and last columns overlap so texture coordinates can span 0..1.
/// Triangles wind counter-clockwise seen from outside.
pub fn tessellate_sphere(precision: u32) -> Result<MeshP3NT2, TessellationError> {
    if precision < MIN_PRECISION {
        return Err(TessellationError::PrecisionTooLow { precision });
    }

    let count = precision as usize;
    let step = 1.0 / (precision - 1) as f32;
    let mut mesh = MeshP3NT2 {
        vertices: Vec::with_capacity(count * count),
        indices: Vec::with_capacity(6 * (count - 1) * (count - 1)),
    };

    for column in 0..precision {
        let u = column as f32 * step;
        for row in 0..precision {
            let v = row as f32 * step;
            let position = point_on_sphere(u, v);
            mesh.vertices
                .push(VertexP3NT2::new(position, position, Vec2::new(u, v)));
        }
    }

    for column in 0..precision - 1 {
        for row in 0..precision - 1 {
            let a = column * precision + row;
            let b = a + precision;
            let c = b + 1;
            let d = a + 1;
            mesh.indices.extend([a, d, c, a, c, b]);
        }
    }

    Ok(mesh)
}

/// `u` walks longitude around Y, `v` walks latitude from the south pole up
fn point_on_sphere(u: f32, v: f32) -> Vec3 {
    let longitude = TAU * u;
    let latitude = PI * v - FRAC_PI_2;
    Vec3::new(
        latitude.cos() * longitude.cos(),
        latitude.sin(),
        latitude.cos() * longitude.sin(),
    )
}
