use bevy::prelude::*;

use crate::utils::objects::{PendingTextureLoad, RandomGen, RollSession};
use crate::utils::texture_loading::spawn_texture_reload;

/// Handle keyboard inputs
pub fn handle_keyboard_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<RollSession>,
    mut random_gen: ResMut<RandomGen>,
    mut pending: ResMut<PendingTextureLoad>,
    mut exit: MessageWriter<AppExit>,
) {
    // S spins the cube
    if keyboard.just_pressed(KeyCode::KeyS) {
        let RollSession { cube, pool, state } = &mut *session;
        if state.is_rolling() {
            debug!("Roll in progress, ignoring spin request");
        } else {
            state.start_rotation(cube, pool, &mut random_gen.random_gen);
            info!("Spin requested, phase is now {:?}", state.phase);
        }
    }

    // L opens the file picker in the background
    if keyboard.just_pressed(KeyCode::KeyL) {
        if pending.start(spawn_texture_reload) {
            info!("Opening file dialog to select textures...");
        } else {
            info!("Texture reload already in progress");
        }
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
