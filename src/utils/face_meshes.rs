//! Turns the renderer's face quads into Bevy 2D meshes and materials.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use image::RgbaImage;
use std::sync::Arc;

use crate::geometry::{Cube, Texture};
use crate::renderer::{FaceQuad, QUAD_TRIANGLES};

/// Builds the mesh of one face.
///
/// Quad corners are in screen pixels (origin top left, y down) and are moved into
/// the world space of a default `Camera2d` (origin at the centre, y up). Texel
/// coordinates become normalized UVs.
pub fn quad_mesh(quad: &FaceQuad, screen_size: Vec2) -> Mesh {
    let half = screen_size / 2.0;
    let (width, height) = quad.texture.dimensions();
    let texture_size = Vec2::new(width as f32, height as f32);

    let positions: Vec<[f32; 3]> = quad
        .corners
        .iter()
        .map(|corner| [corner.dst.x - half.x, half.y - corner.dst.y, 0.0])
        .collect();
    let uvs: Vec<[f32; 2]> = quad
        .corners
        .iter()
        .map(|corner| (corner.src / texture_size).to_array())
        .collect();

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U32(QUAD_TRIANGLES.to_vec()))
}

/// Uploadable copy of a face texture.
pub fn texture_image(texture: &RgbaImage) -> Image {
    let (width, height) = texture.dimensions();
    Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        texture.as_raw().clone(),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    )
}

/// One `ColorMaterial` per texture currently on the cube.
#[derive(Default)]
pub struct FaceMaterials {
    entries: Vec<(Texture, Handle<ColorMaterial>)>,
}

impl FaceMaterials {
    /// Returns the material showing `texture`, uploading it the first time it is seen.
    pub fn material_for(
        &mut self,
        texture: &Texture,
        images: &mut Assets<Image>,
        materials: &mut Assets<ColorMaterial>,
    ) -> Handle<ColorMaterial> {
        if let Some((_, handle)) = self
            .entries
            .iter()
            .find(|(known, _)| Arc::ptr_eq(known, texture))
        {
            return handle.clone();
        }

        let image = images.add(texture_image(texture));
        let handle = materials.add(ColorMaterial::from(image));
        self.entries.push((texture.clone(), handle.clone()));
        handle
    }

    /// Drops the materials of textures no face shows anymore.
    pub fn retain_on(&mut self, cube: &Cube) {
        self.entries.retain(|(texture, _)| {
            cube.faces
                .iter()
                .any(|face| Arc::ptr_eq(&face.texture, texture))
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
