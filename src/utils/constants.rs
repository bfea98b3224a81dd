// Constants used by the roller, structured into modules.

/// Screen / render sink
pub mod screen_constants {
    pub const SCREEN_WIDTH: u32 = 960;
    pub const SCREEN_HEIGHT: u32 = 720;

    // Orthographic scale applied to rotated vertices before centering.
    pub const PROJECTION_SCALE: f64 = 1.5;
}

/// Cube object
pub mod cube_constants {
    // Edge length of the cube in model units.
    pub const CUBE_SIZE: f64 = 150.0;

    pub const FACE_COUNT: usize = 6;
    pub const VERTEX_COUNT: usize = 8;

    // Luma of the placeholder shown on faces the pool could not fill.
    pub const GREY_LUMA: u8 = 128;
    // Side of the "empty" placeholder image, in pixels.
    pub const EMPTY_IMAGE_SIZE: u32 = 3;
}

/// Roll animation, all values are per tick
pub mod roll_constants {
    // Ambient spin shown before the first roll.
    pub const IDLE_SPEED_X: f64 = 0.005;
    pub const IDLE_SPEED_Y: f64 = 0.01;

    // Random spin speeds are drawn from (-MAX_SPIN_SPEED, MAX_SPIN_SPEED).
    pub const MAX_SPIN_SPEED: f64 = 0.2;
    // Below this on both axes the spin gets a forced kick on X.
    pub const MIN_VISIBLE_SPEED: f64 = 0.05;
    pub const KICK_SPEED_MIN: f64 = 0.15;
    pub const KICK_SPEED_RANGE: f64 = 0.1;

    pub const SPIN_DAMPING: f64 = 0.99;
    pub const STOP_SPEED: f64 = 0.01;

    // Exponential approach factor for snapping and aligning.
    pub const SNAP_SMOOTHING: f64 = 0.1;
    pub const SNAP_EPSILON: f64 = 0.001;

    // Jump physics (screen pixels, y grows downwards).
    pub const JUMP_VELOCITY: f64 = -20.0;
    pub const JUMP_GRAVITY: f64 = 1.0;
    pub const JUMP_BOUNCE: f64 = 0.6;

    // "No faces left" shake.
    pub const SHAKE_SPEED: f64 = 0.5;
    pub const SHAKE_MAGNITUDE: f64 = 0.03;
    pub const SHAKE_DURATION: f64 = 4.0 * std::f64::consts::PI; // two full periods
}

/// Generic game constants
pub mod game_constants {
    pub const REFRESH_RATE_HZ: f64 = 60.0; // Hz

    // Directory scanned for textures at start-up.
    pub const TEXTURE_DIR: &str = "img";
    // Optional settings file, defaults are used when it is missing.
    pub const CONFIG_PATH: &str = "config/roller.toml";

    // Accepted texture file extensions (lowercase).
    pub const TEXTURE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

    pub const WINDOW_TITLE: &str = "Rotating 3D Cube";
    pub const HINT_TEXT: &str = "Press 'L' to load textures, 'S' to spin";
}
