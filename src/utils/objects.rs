//! This file defines the resources and components shared by the roller systems.
use std::time::{SystemTime, UNIX_EPOCH};

use bevy::prelude::*;
use bevy::tasks::Task;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::config::RollerConfig;
use crate::geometry::{Cube, Texture};
use crate::renderer::{CubeRenderer, FaceBatch};
use crate::roll_state::RollState;
use crate::texture_pool::TexturePool;
use crate::utils::face_meshes::FaceMaterials;

/// A resource for random number generation.
#[derive(Resource)]
pub struct RandomGen {
    pub random_gen: ChaCha8Rng,
}

impl RandomGen {
    // Creates a new `RandomGen` from a given seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            random_gen: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Uses the configured seed, or the current time when none is set.
    pub fn from_config(config: &RollerConfig) -> Self {
        Self::from_seed(config.seed.unwrap_or_else(time_seed))
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/// The cube, its texture pool and its roll state, always mutated together.
#[derive(Resource)]
pub struct RollSession {
    pub cube: Cube,
    pub pool: TexturePool,
    pub state: RollState,
}

impl RollSession {
    /// Fresh session: every face shows the "empty" placeholder, idle spin on.
    pub fn new(config: &RollerConfig) -> Self {
        let placeholders = config.placeholders();
        Self {
            cube: Cube::new(config.cube_size, placeholders.empty.clone()),
            pool: TexturePool::new(placeholders),
            state: RollState::new(),
        }
    }

    /// Hands out textures from the pool to every face.
    pub fn assign_initial_textures(&mut self) {
        self.pool
            .assign_initial_textures(&mut self.cube.faces, &mut self.state.is_grey);
    }

    /// Applies a finished reload. Picked files replace the whole pool, even when
    /// none of them decoded; a cancelled pick keeps it. Either way every face is
    /// dealt again and the last winner is forgotten.
    pub fn apply_reload<R: Rng + ?Sized>(&mut self, picked: PickedTextures, rng: &mut R) {
        match picked {
            Some(textures) => {
                if self.pool.replace_all(textures, rng) {
                    info!("Texture pool reloaded with {} images", self.pool.total_count());
                }
            }
            None => info!("Texture selection cancelled, keeping the current pool"),
        }
        self.assign_initial_textures();
        self.state.reset_after_reload();
    }
}

/// Projection settings, the frame's face quads and their materials.
#[derive(Resource)]
pub struct CubeView {
    pub renderer: CubeRenderer,
    pub batch: FaceBatch,
    pub screen_size: Vec2,
    pub materials: FaceMaterials,
}

impl CubeView {
    pub fn new(config: &RollerConfig) -> Self {
        Self {
            renderer: CubeRenderer::new(config),
            batch: FaceBatch::default(),
            screen_size: Vec2::new(config.screen_width as f32, config.screen_height as f32),
            materials: FaceMaterials::default(),
        }
    }
}

/// Decoded textures from the file picker, `None` when the dialog was cancelled.
pub type PickedTextures = Option<Vec<Texture>>;

/// Texture reload running in the background, if any.
#[derive(Resource, Default)]
pub struct PendingTextureLoad {
    pub task: Option<Task<PickedTextures>>,
}

impl PendingTextureLoad {
    pub fn is_loading(&self) -> bool {
        self.task.is_some()
    }

    /// Starts a reload with `spawn` unless one is already in flight.
    /// Returns whether a new one started.
    pub fn start(&mut self, spawn: impl FnOnce() -> Task<PickedTextures>) -> bool {
        if self.is_loading() {
            return false;
        }
        self.task = Some(spawn());
        true
    }
}

/// A component that marks one drawn face of the cube.
#[derive(Component)]
pub struct CubeFace;

/// A component that marks the key hint text.
#[derive(Component)]
pub struct HintText;
