use bevy::prelude::*;

use crate::utils::inputs::handle_keyboard_input;
use crate::utils::objects::PendingTextureLoad;
use crate::utils::setup::setup;
use crate::utils::systems_logic::{advance_roll, render_cube};
use crate::utils::texture_loading::apply_loaded_textures;

/// Plugins
pub struct RollerPlugin;

impl Plugin for RollerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingTextureLoad>()
            .add_systems(Startup, setup)
            // Finished reloads land before the tick that follows them
            .add_systems(FixedUpdate, (apply_loaded_textures, advance_roll).chain())
            .add_systems(Update, (handle_keyboard_input, render_cube).chain());
    }
}
