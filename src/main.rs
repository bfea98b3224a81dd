//! Start-up for the cube dice roller, with window, plugins, and resources.

use bevy::{prelude::*, window::*};

use cube_dice_roller::{
    config::RollerConfig,
    plugins::roller_plugin::RollerPlugin,
    utils::{
        constants::game_constants::{CONFIG_PATH, REFRESH_RATE_HZ, WINDOW_TITLE},
        objects::RandomGen,
    },
};

/// Entry point for the application
fn main() {
    let config = RollerConfig::load_or_default(CONFIG_PATH);

    let window = Some(Window {
        title: WINDOW_TITLE.into(),
        resolution: (config.screen_width, config.screen_height).into(),
        resizable: false,
        decorations: false,
        transparent: true,
        present_mode: PresentMode::AutoVsync,
        ..default()
    });

    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: window,
                ..default()
            }),
            RollerPlugin,
        ))
        .insert_resource(ClearColor(Color::NONE))
        .insert_resource(Time::<Fixed>::from_hz(REFRESH_RATE_HZ))
        .insert_resource(RandomGen::from_config(&config))
        .insert_resource(config)
        .run();
}
