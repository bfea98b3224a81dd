use std::path::Path;

use bevy::prelude::*;

use crate::config::RollerConfig;
use crate::utils::constants::game_constants::HINT_TEXT;
use crate::utils::objects::{CubeView, HintText, RandomGen, RollSession};

/// Spawns the camera and the hint, then builds the session from the texture directory.
pub fn setup(
    mut commands: Commands,
    config: Res<RollerConfig>,
    mut random_gen: ResMut<RandomGen>,
) {
    // Camera, one world unit per pixel with the origin at the window centre
    commands.spawn(Camera2d);

    // Key hint, top left like a debug print
    commands.spawn((
        Text::new(HINT_TEXT),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(4.0),
            left: Val::Px(4.0),
            ..default()
        },
        HintText,
    ));

    // Session
    let mut session = RollSession::new(&config);
    session
        .pool
        .load_from_directory(Path::new(&config.texture_dir), &mut random_gen.random_gen);
    session.assign_initial_textures();
    info!(
        "Cube ready: {} of 6 faces textured, {} textures waiting",
        session.state.active_count(),
        session.pool.available_count()
    );

    commands.insert_resource(session);
    commands.insert_resource(CubeView::new(&config));
}
