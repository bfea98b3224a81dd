//! Static cube geometry and the orientation helpers shared by the roll state and the renderer.

use std::f64::consts::{FRAC_PI_2, PI};
use std::sync::Arc;

use bevy::math::{DVec3, Vec2};
use image::RgbaImage;

use crate::utils::constants::cube_constants::{FACE_COUNT, VERTEX_COUNT};

/// Shared, immutable RGBA texture bound to a face.
pub type Texture = Arc<RgbaImage>;

/// One quad of the cube.
#[derive(Clone, Debug)]
pub struct Face {
    /// Vertex indices of the quad, in winding order.
    pub indices: [usize; 4],
    /// Texture coordinates, one per index and in the same order.
    pub uvs: [Vec2; 4],
    /// Image currently shown on the face.
    pub texture: Texture,
}

/// Eight vertices centred on the origin plus six textured quads.
#[derive(Clone, Debug)]
pub struct Cube {
    pub vertices: [DVec3; VERTEX_COUNT],
    pub faces: [Face; FACE_COUNT],
}

// Indices of each face: back, front, right, left, top, bottom.
const FACE_INDICES: [[usize; 4]; FACE_COUNT] = [
    [0, 1, 2, 3],
    [5, 4, 7, 6],
    [1, 5, 6, 2],
    [4, 0, 3, 7],
    [3, 2, 6, 7],
    [4, 5, 1, 0],
];

const UNIT_QUAD_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

impl Cube {
    /// Builds an axis aligned cube of edge `cube_size`, every face showing `texture`.
    pub fn new(cube_size: f64, texture: Texture) -> Self {
        let h = cube_size / 2.0;
        let vertices = [
            DVec3::new(-h, -h, -h),
            DVec3::new(h, -h, -h),
            DVec3::new(h, h, -h),
            DVec3::new(-h, h, -h),
            DVec3::new(-h, -h, h),
            DVec3::new(h, -h, h),
            DVec3::new(h, h, h),
            DVec3::new(-h, h, h),
        ];
        let faces = FACE_INDICES.map(|indices| Face {
            indices,
            uvs: UNIT_QUAD_UVS,
            texture: texture.clone(),
        });
        Self { vertices, faces }
    }
}

/// Rotation by X, Y and Z angles, applied in the order Y, then X, then Z.
#[derive(Clone, Copy, Debug)]
pub struct Rotation {
    cos_x: f64,
    sin_x: f64,
    cos_y: f64,
    sin_y: f64,
    cos_z: f64,
    sin_z: f64,
}

impl Rotation {
    pub fn new(angle_x: f64, angle_y: f64, angle_z: f64) -> Self {
        let (sin_x, cos_x) = angle_x.sin_cos();
        let (sin_y, cos_y) = angle_y.sin_cos();
        let (sin_z, cos_z) = angle_z.sin_cos();
        Self {
            cos_x,
            sin_x,
            cos_y,
            sin_y,
            cos_z,
            sin_z,
        }
    }

    pub fn apply(&self, v: DVec3) -> DVec3 {
        // Around Y
        let y_rot = DVec3::new(
            v.x * self.cos_y - v.z * self.sin_y,
            v.y,
            v.x * self.sin_y + v.z * self.cos_y,
        );
        // Around X
        let x_rot = DVec3::new(
            y_rot.x,
            y_rot.y * self.cos_x - y_rot.z * self.sin_x,
            y_rot.y * self.sin_x + y_rot.z * self.cos_x,
        );
        // Final roll around Z
        DVec3::new(
            x_rot.x * self.cos_z - x_rot.y * self.sin_z,
            x_rot.x * self.sin_z + x_rot.y * self.cos_z,
            x_rot.z,
        )
    }
}

/// Orientation (X, Y) that turns face `face_index` towards the viewer.
/// Unknown indices map to (0, 0).
pub fn target_angles_for_face(face_index: usize) -> (f64, f64) {
    match face_index {
        0 => (0.0, PI),
        1 => (0.0, 0.0),
        2 => (0.0, -FRAC_PI_2),
        3 => (0.0, FRAC_PI_2),
        4 => (FRAC_PI_2, 0.0),
        5 => (-FRAC_PI_2, 0.0),
        _ => (0.0, 0.0),
    }
}

/// Z roll that makes the face's "up" point to the top of the screen once the cube
/// sits at (`angle_x`, `angle_y`). Result lies in (-PI, PI], unknown indices give 0.
pub fn alignment_angle(face_index: usize, angle_x: f64, angle_y: f64) -> f64 {
    let up = match face_index {
        0..=3 => DVec3::new(0.0, -1.0, 0.0),
        4 => DVec3::new(0.0, 0.0, 1.0),
        5 => DVec3::new(0.0, 0.0, -1.0),
        _ => return 0.0,
    };

    let rotated = Rotation::new(angle_x, angle_y, 0.0).apply(up);
    let current = rotated.y.atan2(rotated.x);

    let mut angle = -FRAC_PI_2 - current;
    while angle <= -PI {
        angle += 2.0 * PI;
    }
    while angle > PI {
        angle -= 2.0 * PI;
    }
    angle
}
