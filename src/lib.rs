//! Dice roller: a textured cube that spins, snaps and picks a winning face.

/// Settings file and placeholder images
pub mod config;

/// Cube geometry and orientation helpers
pub mod geometry;

/// Face textures: loading and dealing
pub mod texture_pool;

/// The roll state machine
pub mod roll_state;

/// Projection and painter's-algorithm drawing
pub mod renderer;

/// Bevy glue: resources, systems and constants
pub mod utils {
    pub mod constants;
    pub mod face_meshes;
    pub mod inputs;
    pub mod objects;
    pub mod setup;
    pub mod systems_logic;
    pub mod texture_loading;
}

pub mod plugins {
    pub mod roller_plugin;
}
