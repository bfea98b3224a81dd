//! Orthographic projection of the cube and painter's-algorithm drawing.

use bevy::math::{DVec2, DVec3, Vec2};

use crate::config::RollerConfig;
use crate::geometry::{Cube, Rotation, Texture};
use crate::utils::constants::cube_constants::VERTEX_COUNT;

/// The two triangles a face quad is split into, as corner indices.
pub const QUAD_TRIANGLES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Corner of a textured quad: where it lands and which texel it samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TexturedVertex {
    /// Destination position on the surface, in pixels.
    pub dst: Vec2,
    /// Source position in the texture, in texels.
    pub src: Vec2,
}

/// Sink receiving the renderer's output.
pub trait RenderSurface {
    /// Forgets everything drawn so far.
    fn clear(&mut self);
    /// Draws one face as the triangles in [`QUAD_TRIANGLES`], either winding,
    /// with `texture` mapped affinely.
    fn draw_quad(&mut self, corners: &[TexturedVertex; 4], texture: &Texture);
}

/// A face ready to be drawn.
#[derive(Clone, Debug)]
pub struct FaceQuad {
    pub corners: [TexturedVertex; 4],
    pub texture: Texture,
}

/// Quads collected for one frame, back to front.
#[derive(Clone, Debug, Default)]
pub struct FaceBatch {
    pub quads: Vec<FaceQuad>,
}

impl RenderSurface for FaceBatch {
    fn clear(&mut self) {
        self.quads.clear();
    }

    fn draw_quad(&mut self, corners: &[TexturedVertex; 4], texture: &Texture) {
        self.quads.push(FaceQuad {
            corners: *corners,
            texture: texture.clone(),
        });
    }
}

/// A face that survived back-face culling.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibleFace {
    pub face_index: usize,
    /// Mean rotated Z of the four corners.
    pub average_z: f64,
    /// Projected corners, in the face's index order.
    pub corners: [DVec2; 4],
}

/// Draws the cube at a given orientation onto a [`RenderSurface`].
#[derive(Clone, Debug)]
pub struct CubeRenderer {
    center: DVec2,
    scale: f64,
}

impl CubeRenderer {
    pub fn new(config: &RollerConfig) -> Self {
        Self {
            center: DVec2::new(
                config.screen_width as f64 / 2.0,
                config.screen_height as f64 / 2.0,
            ),
            scale: config.projection_scale,
        }
    }

    /// Faces facing the viewer, back to front.
    pub fn visible_faces(
        &self,
        cube: &Cube,
        angle_x: f64,
        angle_y: f64,
        angle_z: f64,
        offset_y: f64,
    ) -> Vec<VisibleFace> {
        let rotation = Rotation::new(angle_x, angle_y, angle_z);
        let rotated: [DVec3; VERTEX_COUNT] = cube.vertices.map(|v| rotation.apply(v));
        let projected: [DVec2; VERTEX_COUNT] = rotated.map(|v| {
            DVec2::new(
                v.x * self.scale + self.center.x,
                v.y * self.scale + self.center.y + offset_y,
            )
        });

        let mut visible: Vec<VisibleFace> = cube
            .faces
            .iter()
            .enumerate()
            .filter_map(|(face_index, face)| {
                let [i0, i1, i2, i3] = face.indices;
                let normal = (rotated[i1] - rotated[i0]).cross(rotated[i2] - rotated[i0]);
                if normal.z <= 0.0 {
                    return None;
                }
                let average_z =
                    (rotated[i0].z + rotated[i1].z + rotated[i2].z + rotated[i3].z) / 4.0;
                Some(VisibleFace {
                    face_index,
                    average_z,
                    corners: face.indices.map(|i| projected[i]),
                })
            })
            .collect();

        // Painter's algorithm, stable for equal depths
        visible.sort_by(|a, b| a.average_z.total_cmp(&b.average_z));
        visible
    }

    /// Clears `surface` and draws every visible face, farthest first.
    pub fn draw_cube<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        cube: &Cube,
        angle_x: f64,
        angle_y: f64,
        angle_z: f64,
        offset_y: f64,
    ) {
        surface.clear();

        for visible in self.visible_faces(cube, angle_x, angle_y, angle_z, offset_y) {
            let face = &cube.faces[visible.face_index];
            let (width, height) = face.texture.dimensions();
            let texture_size = Vec2::new(width as f32, height as f32);

            let corners = std::array::from_fn(|i| TexturedVertex {
                dst: visible.corners[i].as_vec2(),
                src: face.uvs[i] * texture_size,
            });
            surface.draw_quad(&corners, &face.texture);
        }
    }
}
