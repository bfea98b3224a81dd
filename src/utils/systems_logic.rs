//! Per tick roll advance and per frame presentation.

use bevy::prelude::*;

use crate::utils::face_meshes::quad_mesh;
use crate::utils::objects::{CubeFace, CubeView, RollSession};

/// Advances the roll state by one fixed tick.
pub fn advance_roll(mut session: ResMut<RollSession>) {
    if session.state.update() {
        match session.state.last_winner {
            Some(face) => info!("Spin finished, face {face} wins"),
            None => info!("Spin finished"),
        }
    }
}

/// Replaces last frame's face meshes with one `Mesh2d` per visible face,
/// stacked back to front.
pub fn render_cube(
    mut commands: Commands,
    session: Res<RollSession>,
    mut view: ResMut<CubeView>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut images: ResMut<Assets<Image>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    drawn: Query<Entity, With<CubeFace>>,
) {
    for entity in &drawn {
        commands.entity(entity).despawn();
    }

    let CubeView {
        renderer,
        batch,
        screen_size,
        materials: face_materials,
    } = &mut *view;
    let state = &session.state;

    renderer.draw_cube(
        batch,
        &session.cube,
        state.angle_x,
        state.angle_y,
        state.angle_z,
        state.offset_y,
    );
    face_materials.retain_on(&session.cube);

    for (depth, quad) in batch.quads.iter().enumerate() {
        let material = face_materials.material_for(&quad.texture, &mut images, &mut materials);
        commands.spawn((
            Mesh2d(meshes.add(quad_mesh(quad, *screen_size))),
            MeshMaterial2d(material),
            Transform::from_xyz(0.0, 0.0, depth as f32),
            CubeFace,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RollerConfig;
    use bevy::ecs::system::RunSystemOnce;

    fn render_app(angles: (f64, f64, f64)) -> App {
        let config = RollerConfig::default();
        let mut session = RollSession::new(&config);
        (session.state.angle_x, session.state.angle_y, session.state.angle_z) = angles;

        let mut app = App::new();
        app.insert_resource(session)
            .insert_resource(CubeView::new(&config))
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<Image>>()
            .init_resource::<Assets<ColorMaterial>>();
        app
    }

    fn render(app: &mut App) {
        app.world_mut()
            .run_system_once(render_cube)
            .expect("render_cube runs");
    }

    fn face_depths(app: &mut App) -> Vec<f32> {
        let world = app.world_mut();
        let mut faces = world.query_filtered::<&Transform, With<CubeFace>>();
        let mut depths: Vec<f32> = faces.iter(world).map(|t| t.translation.z).collect();
        depths.sort_by(f32::total_cmp);
        depths
    }

    /// One entity per visible face, the nearest one on top.
    #[test]
    fn each_visible_face_gets_a_mesh() {
        let mut app = render_app((0.5, 0.6, 0.2));
        render(&mut app);

        let visible = app.world().resource::<CubeView>().batch.quads.len();
        assert!(visible > 1);
        let expected: Vec<f32> = (0..visible).map(|depth| depth as f32).collect();
        assert_eq!(face_depths(&mut app), expected);

        // every face shares the "empty" placeholder
        assert_eq!(app.world().resource::<CubeView>().materials.len(), 1);
    }

    /// Meshes from the previous frame do not linger.
    #[test]
    fn new_frame_replaces_old_meshes() {
        let mut app = render_app((0.5, 0.6, 0.2));
        render(&mut app);

        {
            let mut session = app.world_mut().resource_mut::<RollSession>();
            session.state.angle_x = 0.0;
            session.state.angle_y = 0.0;
            session.state.angle_z = 0.0;
        }
        render(&mut app);

        assert_eq!(face_depths(&mut app), vec![0.0]);
    }
}
